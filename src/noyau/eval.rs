//! Noyau — évaluation (pipeline réel)
//!
//! brut -> normalize -> auto-fermeture des parenthèses -> jetons -> RPN -> f64 -> arrondi
//!
//! Aucune trace dans l’historique ici : l’enregistrement est fait par la session
//! (pipeline.rs) une fois le résultat validé.

use tracing::debug;

use super::erreur::ErreurCalcul;
use super::format::arrondir;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normalize;
use super::rpn::{eval_rpn, to_rpn};

/// Ajoute exactement le nombre de ')' manquants.
/// N’ouvre jamais, ne retire jamais de ')' en trop.
pub fn fermer_parentheses(expr: &str) -> String {
    let ouvrantes = expr.matches('(').count();
    let fermantes = expr.matches(')').count();

    let mut out = expr.to_string();
    if ouvrantes > fermantes {
        out.push_str(&")".repeat(ouvrantes - fermantes));
    }
    out
}

/// Évalue un texte DÉJÀ normalisé (parenthèses comprises), sans arrondi.
/// NaN => erreur ; ±Infinity est un résultat valide.
pub fn calculer(normalise: &str) -> Result<f64, ErreurCalcul> {
    let jetons = tokenize(normalise).map_err(ErreurCalcul::Evaluation)?;
    let rpn = to_rpn(&jetons).map_err(ErreurCalcul::Evaluation)?;
    debug!(rpn = %format_tokens(&rpn), "rpn");

    let v = eval_rpn(&rpn).map_err(ErreurCalcul::Evaluation)?;
    if v.is_nan() {
        return Err(ErreurCalcul::Evaluation("résultat indéfini (NaN)".into()));
    }
    Ok(v)
}

/// API publique : entrée brute -> valeur arrondie (12 chiffres significatifs si non entière).
pub fn evaluer_expression(brut: &str) -> Result<f64, ErreurCalcul> {
    if brut.trim().is_empty() {
        return Err(ErreurCalcul::Evaluation("entrée vide".into()));
    }

    let prepare = fermer_parentheses(&normalize(brut));
    debug!(brut, prepare = %prepare, "évaluation");

    calculer(&prepare).map(arrondir)
}
