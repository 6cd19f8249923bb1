// src/noyau/normalise.rs
//
// Normalisation : texte saisi (×, ÷, π, e, ^, √(, log(...) -> vocabulaire de l’évaluateur.
//
// Ordre fixe (une règle ne doit jamais re-capturer le texte produit par une règle précédente) :
//   1) × ÷        -> * /
//   2) π          -> (3.141592653589793)
//   3) e isolé    -> (2.718281828459045)   (frontière de mot : "sqrt", "1e5" intacts)
//   4) ^          -> **
//   5) fonctions  -> sin( cos( tan( log10( ln( sqrt(   (une seule passe regex)
//
// Les constantes sont parenthésées : "2π" donne "2(3.14…)", refusé par l’évaluateur
// (pas de multiplication implicite) au lieu d’un "23.14…" silencieux.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::format::format_nombre;

static E_ISOLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\be\b").expect("regex e"));

static FONCTIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(sin|cos|tan|log|ln|sqrt|√)\(").expect("regex fonctions"));

fn constante(x: f64) -> String {
    format!("({})", format_nombre(x))
}

/// Nom canonique (côté évaluateur) d’un préfixe de fonction saisi.
fn fonction_canonique(nom: &str) -> &'static str {
    match nom {
        "sin" => "sin(",
        "cos" => "cos(",
        "tan" => "tan(",
        "log" => "log10(",
        "ln" => "ln(",
        // "sqrt" | "√"
        _ => "sqrt(",
    }
}

/// Réécrit une entrée brute en texte directement évaluable.
pub fn normalize(brut: &str) -> String {
    let t = brut.replace('×', "*").replace('÷', "/");
    let t = t.replace('π', &constante(std::f64::consts::PI));
    let t = E_ISOLE
        .replace_all(&t, constante(std::f64::consts::E).as_str())
        .into_owned();
    let t = t.replace('^', "**");

    FONCTIONS
        .replace_all(&t, |c: &Captures| fonction_canonique(&c[1]))
        .into_owned()
}
