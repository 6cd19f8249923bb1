// src/app.rs
//
// Calculatrice — module App (racine)
// ----------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Clavier global : chiffres, + - * / . , Enter (=), Backspace, Escape (C)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::{Action, AppCalc};

use eframe::egui;

/// Ce que le clavier physique demande pour cette frame.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Commande {
    Saisie(String),
    Action(Action),
}

/// Caractères tapés acceptés tels quels.
fn caractere_accepte(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '.')
}

fn lire_clavier(events: &[egui::Event]) -> Vec<Commande> {
    let mut out = Vec::new();
    for ev in events {
        match ev {
            egui::Event::Text(t) => {
                for c in t.chars().filter(|c| caractere_accepte(*c)) {
                    out.push(Commande::Saisie(c.to_string()));
                }
            }
            egui::Event::Key {
                key,
                pressed: true,
                ..
            } => match key {
                egui::Key::Enter => out.push(Commande::Action(Action::Egal)),
                egui::Key::Backspace => out.push(Commande::Action(Action::RetourArriere)),
                egui::Key::Escape => out.push(Commande::Action(Action::Effacer)),
                _ => {}
            },
            _ => {}
        }
    }
    out
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(vue::visuels(self.calc.theme()));

        let commandes = ctx.input(|i| lire_clavier(&i.events));
        for c in commandes {
            match c {
                Commande::Saisie(v) => self.saisir(&v),
                Commande::Action(a) => self.action(a),
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.ui(ui); // méthode publique (dans vue.rs)
                });
        });
    }
}
