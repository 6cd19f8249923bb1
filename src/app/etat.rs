//! src/app/etat.rs
//!
//! État UI (sans vue) : la session de calcul + ce que l’écran doit montrer.
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par noyau::Calculatrice.
//! - Une erreur s’affiche "Erreur" jusqu’à la prochaine saisie ; tampon et historique intacts.
//! - Actions déterministes, sans effet de bord caché (hors persistance faite par le noyau).

use tracing::debug;

use crate::noyau::pipeline::Calcul;
use crate::noyau::{Calculatrice, ErreurCalcul, Stockage, Theme};

/// Texte affiché après un échec d’évaluation.
pub const AFFICHAGE_ERREUR: &str = "Erreur";

/// Touches d’action (hors saisie de caractères).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Effacer,
    RetourArriere,
    Egal,
    Carre,
    Cube,
    Puissance,
    Factorielle,
}

/// Touches de fonction : insèrent un préfixe "nom(".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToucheFonction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Racine,
}

impl ToucheFonction {
    pub const TOUTES: [ToucheFonction; 6] = [
        ToucheFonction::Sin,
        ToucheFonction::Cos,
        ToucheFonction::Tan,
        ToucheFonction::Log,
        ToucheFonction::Ln,
        ToucheFonction::Racine,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            ToucheFonction::Sin => "sin",
            ToucheFonction::Cos => "cos",
            ToucheFonction::Tan => "tan",
            ToucheFonction::Log => "log",
            ToucheFonction::Ln => "ln",
            ToucheFonction::Racine => "√",
        }
    }

    fn prefixe(self) -> &'static str {
        match self {
            ToucheFonction::Racine => "√(",
            ToucheFonction::Sin => "sin(",
            ToucheFonction::Cos => "cos(",
            ToucheFonction::Tan => "tan(",
            ToucheFonction::Log => "log(",
            ToucheFonction::Ln => "ln(",
        }
    }
}

pub struct AppCalc {
    pub calc: Calculatrice,

    // --- affichage ---
    pub erreur: bool,

    // --- UX ---
    pub scientifique: bool,
}

impl AppCalc {
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        Self {
            calc: Calculatrice::new(stockage),
            erreur: false,
            scientifique: false,
        }
    }

    /// Texte de l’écran : "Erreur", ou le tampon ("0" si vide).
    pub fn affichage(&self) -> &str {
        if self.erreur {
            AFFICHAGE_ERREUR
        } else {
            self.calc.tampon().affichage()
        }
    }

    /* ------------------------ Saisie ------------------------ */

    pub fn saisir(&mut self, v: &str) {
        self.erreur = false;
        self.calc.saisir(v);
    }

    pub fn fonction(&mut self, f: ToucheFonction) {
        self.erreur = false;
        self.calc.prolonger(f.prefixe());
    }

    pub fn action(&mut self, action: Action) {
        match action {
            Action::Effacer => {
                self.erreur = false;
                self.calc.vider();
            }
            Action::RetourArriere => {
                self.erreur = false;
                self.calc.effacer_dernier();
            }
            Action::Egal => {
                // tampon vide : rien (l’écran garde son état)
                if let Some(r) = self.calc.egal() {
                    self.issue(r);
                }
            }
            Action::Carre | Action::Cube => {
                let exposant = if action == Action::Carre { 2 } else { 3 };
                let buffer = self.calc.tampon().contenu().to_string();
                let c = self.calc.apply_power(&buffer, exposant);
                self.issue(Ok(c));
            }
            Action::Puissance => {
                self.erreur = false;
                self.calc.prolonger("^");
            }
            Action::Factorielle => {
                let buffer = self.calc.tampon().contenu().to_string();
                let r = self.calc.apply_factorial(&buffer);
                self.issue(r);
            }
        }
    }

    fn issue(&mut self, r: Result<Calcul, ErreurCalcul>) {
        match r {
            Ok(c) => {
                debug!(expr = %c.entree.expr, affichage = %c.affichage, "calcul");
                self.erreur = false;
            }
            Err(e) => {
                debug!(erreur = %e, "calcul refusé");
                self.erreur = true;
            }
        }
    }

    /* ------------------------ Historique + thème ------------------------ */

    pub fn rappeler(&mut self, index: usize) {
        if self.calc.rappeler(index).is_some() {
            self.erreur = false;
        }
    }

    pub fn effacer_historique(&mut self) {
        self.calc.effacer_historique();
    }

    pub fn changer_theme(&mut self, theme: Theme) {
        if theme != self.calc.theme() {
            self.calc.choisir_theme(theme);
        }
    }

    pub fn basculer_scientifique(&mut self) {
        self.scientifique = !self.scientifique;
    }
}
