// src/noyau/erreur.rs
//
// Erreurs visibles à la frontière du noyau.
// Les couches internes (jetons, rpn) restent en Result<_, String> ;
// on enveloppe leurs messages ici.

use thiserror::Error;

/// Échec d’un calcul. Jamais enregistré dans l’historique.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalcul {
    /// Expression mal formée, ou résultat NaN.
    #[error("expression non évaluable: {0}")]
    Evaluation(String),

    /// Factorielle d’un entier négatif (ou tampon non numérique).
    #[error("hors domaine: {0}")]
    Domaine(String),
}

/// Échec d’accès au stockage clé/valeur (non fatal : on reste en mémoire).
#[derive(Debug, Error)]
pub enum ErreurStockage {
    #[error("entrée/sortie: {0}")]
    Io(#[from] std::io::Error),

    #[error("stockage indisponible: {0}")]
    Indisponible(String),
}
