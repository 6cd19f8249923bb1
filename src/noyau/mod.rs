//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - normalise.rs  : ×, ÷, π, e, ^, √(, log(… -> vocabulaire de l’évaluateur
//! - jetons.rs     : tokenisation f64
//! - rpn.rs        : shunting-yard + évaluation RPN
//! - format.rs     : affichage des nombres, arrondi 12 chiffres, lecture du tampon
//! - eval.rs       : pipeline normalise -> auto-fermeture -> RPN -> arrondi
//! - tampon.rs     : saisie en cours (vide = "0")
//! - historique.rs : journal borné (200), plus récent en tête, JSON
//! - stockage.rs   : trait clé/valeur + mémoire / fichier / localStorage
//! - theme.rs      : thème clair/sombre persisté
//! - pipeline.rs   : session (tampon + historique + thème + stockage)

pub mod erreur;
pub mod eval;
pub mod format;
pub mod historique;
pub mod jetons;
pub mod normalise;
pub mod pipeline;
pub mod rpn;
pub mod stockage;
pub mod tampon;
pub mod theme;

#[cfg(test)]
mod tests_pipeline;

#[cfg(test)]
mod tests_proptest;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use historique::EntreeHistorique;
pub use pipeline::Calculatrice;
pub use stockage::{Stockage, StockageMemoire};
pub use theme::Theme;

#[cfg(not(target_arch = "wasm32"))]
pub use stockage::StockageFichier;

#[cfg(target_arch = "wasm32")]
pub use stockage::StockageNavigateur;
