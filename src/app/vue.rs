// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran + pavé + panneau scientifique (repliable) + historique cliquable
// - Sélecteur de thème (persisté par le noyau)
//
// Note :
// - Le clavier physique est géré dans app.rs (événements globaux, pas de champ texte).

use eframe::egui;

use super::etat::{Action, AppCalc, ToucheFonction};
use crate::noyau::{EntreeHistorique, Theme};

const TAILLE_TOUCHE: [f32; 2] = [56.0, 40.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        ui.horizontal(|ui| {
            ui.heading("Calculatrice");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.ui_theme(ui);
            });
        });
        ui.add_space(6.0);

        self.ui_ecran(ui);
        ui.add_space(8.0);

        self.ui_pave(ui);
        ui.add_space(6.0);

        let libelle = if self.scientifique {
            "Masquer les fonctions"
        } else {
            "Fonctions scientifiques"
        };
        if ui.button(libelle).clicked() {
            self.basculer_scientifique();
        }
        if self.scientifique {
            ui.add_space(6.0);
            self.ui_scientifique(ui);
        }

        ui.add_space(8.0);
        ui.separator();
        self.ui_historique(ui);
    }

    fn ui_theme(&mut self, ui: &mut egui::Ui) {
        let mut choix = self.calc.theme();
        egui::ComboBox::from_id_salt("theme_select")
            .selected_text(choix.libelle())
            .show_ui(ui, |ui| {
                for t in Theme::TOUS {
                    ui.selectable_value(&mut choix, t, t.libelle());
                }
            });
        self.changer_theme(choix);
    }

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let texte = egui::RichText::new(self.affichage()).monospace().size(32.0);
                    if self.erreur {
                        ui.label(texte.color(ui.visuals().error_fg_color));
                    } else {
                        ui.label(texte);
                    }
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", Action::Effacer);
                self.bouton_action(ui, "⌫", Action::RetourArriere);
                self.bouton_saisie(ui, "(", "(");
                self.bouton_saisie(ui, ")", ")");
                ui.end_row();

                self.bouton_saisie(ui, "7", "7");
                self.bouton_saisie(ui, "8", "8");
                self.bouton_saisie(ui, "9", "9");
                self.bouton_saisie(ui, "÷", "÷");
                ui.end_row();

                self.bouton_saisie(ui, "4", "4");
                self.bouton_saisie(ui, "5", "5");
                self.bouton_saisie(ui, "6", "6");
                self.bouton_saisie(ui, "×", "×");
                ui.end_row();

                self.bouton_saisie(ui, "1", "1");
                self.bouton_saisie(ui, "2", "2");
                self.bouton_saisie(ui, "3", "3");
                self.bouton_saisie(ui, "-", "-");
                ui.end_row();

                self.bouton_saisie(ui, "0", "0");
                self.bouton_saisie(ui, ".", ".");
                self.bouton_action(ui, "=", Action::Egal);
                self.bouton_saisie(ui, "+", "+");
                ui.end_row();
            });
    }

    fn ui_scientifique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for f in ToucheFonction::TOUTES {
                    if ui
                        .add_sized(TAILLE_TOUCHE, egui::Button::new(f.libelle()))
                        .clicked()
                    {
                        self.fonction(f);
                    }
                }
                ui.end_row();

                self.bouton_action(ui, "x²", Action::Carre);
                self.bouton_action(ui, "x³", Action::Cube);
                self.bouton_action(ui, "xʸ", Action::Puissance);
                self.bouton_action(ui, "n!", Action::Factorielle);
                self.bouton_saisie(ui, "π", "π");
                self.bouton_saisie(ui, "e", "e");
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Historique");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Effacer l’historique").clicked() {
                    self.effacer_historique();
                }
            });
        });

        if self.calc.historique().is_empty() {
            ui.weak("Aucun calcul");
            return;
        }

        // Clic pendant l’itération : on note l’index, on agit après.
        let mut rappel: Option<usize> = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height(240.0)
            .show(ui, |ui| {
                for (i, e) in self.calc.historique().iter().enumerate() {
                    if ligne_historique(ui, e) {
                        rappel = Some(i);
                    }
                }
            });

        if let Some(i) = rappel {
            self.rappeler(i);
        }
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, action: Action) {
        if ui
            .add_sized(TAILLE_TOUCHE, egui::Button::new(label))
            .clicked()
        {
            self.action(action);
        }
    }

    fn bouton_saisie(&mut self, ui: &mut egui::Ui, label: &str, valeur: &str) {
        if ui
            .add_sized(TAILLE_TOUCHE, egui::Button::new(label))
            .clicked()
        {
            self.saisir(valeur);
        }
    }
}

/// Une ligne "expr result" + date locale. Retourne true si cliquée.
fn ligne_historique(ui: &mut egui::Ui, e: &EntreeHistorique) -> bool {
    let texte = format!("{} {}", e.expr, e.result);
    let clic = ui
        .add(egui::Button::new(egui::RichText::new(texte).monospace().strong()).frame(false))
        .on_hover_text("Reprendre cette expression")
        .clicked();
    ui.small(date_locale(e.time));
    clic
}

fn date_locale(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%d.%m.%Y %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

/// Thème noyau -> visuels egui.
pub fn visuels(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Clair => egui::Visuals::light(),
        Theme::Sombre => egui::Visuals::dark(),
    }
}
