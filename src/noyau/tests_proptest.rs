//! Propriétés (proptest) : l’évaluateur doit coïncider avec l’arithmétique f64 standard.
//!
//! - Arbres aléatoires entièrement parenthésés : structure respectée.
//! - Suites plates "a op b op c …" : précédence (* / avant + -) et gauche -> droite.
//! La référence est calculée directement en Rust, sans passer par le noyau.

use proptest::prelude::*;

use super::eval::{calculer, fermer_parentheses};
use super::format::arrondir;
use super::normalise::normalize;
use super::Calculatrice;
use super::StockageMemoire;

#[derive(Clone, Debug)]
enum Arbre {
    Feuille(u32),
    Op(Box<Arbre>, char, Box<Arbre>),
}

impl Arbre {
    fn texte(&self) -> String {
        match self {
            Arbre::Feuille(n) => n.to_string(),
            Arbre::Op(a, op, b) => format!("({}{op}{})", a.texte(), b.texte()),
        }
    }

    fn valeur(&self) -> f64 {
        match self {
            Arbre::Feuille(n) => f64::from(*n),
            Arbre::Op(a, op, b) => applique(a.valeur(), *op, b.valeur()),
        }
    }
}

fn applique(a: f64, op: char, b: f64) -> f64 {
    match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        _ => a / b,
    }
}

fn operateur() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')]
}

fn arbre() -> impl Strategy<Value = Arbre> {
    let feuille = (0u32..1000).prop_map(Arbre::Feuille);
    feuille.prop_recursive(4, 32, 2, |inner| {
        (inner.clone(), operateur(), inner)
            .prop_map(|(a, op, b)| Arbre::Op(Box::new(a), op, Box::new(b)))
    })
}

/// Référence pour une suite plate : d’abord * /, puis + -, chacun de gauche à droite.
fn reference_plate(nombres: &[f64], ops: &[char]) -> f64 {
    let mut termes = vec![nombres[0]];
    let mut signes = Vec::new();
    for (op, &n) in ops.iter().zip(&nombres[1..]) {
        match op {
            '*' | '/' => {
                if let Some(dernier) = termes.last_mut() {
                    *dernier = applique(*dernier, *op, n);
                }
            }
            _ => {
                signes.push(*op);
                termes.push(n);
            }
        }
    }
    let mut acc = termes[0];
    for (op, t) in signes.iter().zip(&termes[1..]) {
        acc = applique(acc, *op, *t);
    }
    acc
}

fn meme_f64(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

proptest! {
    #[test]
    fn arbre_parenthese_coincide(a in arbre()) {
        let attendu = a.valeur();
        match calculer(&a.texte()) {
            Ok(v) => prop_assert!(meme_f64(v, attendu), "{} => {v} != {attendu}", a.texte()),
            // seul NaN (0/0) est refusé
            Err(_) => prop_assert!(attendu.is_nan(), "{} refusé, attendu {attendu}", a.texte()),
        }
    }

    #[test]
    fn suite_plate_respecte_la_precedence(
        (nombres, ops) in (2usize..8).prop_flat_map(|n| (
            prop::collection::vec((1u32..500).prop_map(f64::from), n),
            prop::collection::vec(operateur(), n - 1),
        ))
    ) {
        let mut texte = format!("{}", nombres[0]);
        for (op, n) in ops.iter().zip(&nombres[1..]) {
            texte.push(*op);
            texte.push_str(&n.to_string());
        }
        let attendu = reference_plate(&nombres, &ops);
        let v = calculer(&texte).unwrap();
        prop_assert!(meme_f64(v, attendu), "{texte} => {v} != {attendu}");
    }

    #[test]
    fn normalisation_idempotente(s in "[0-9+*/().^×÷πe -]{0,24}") {
        let une = normalize(&s);
        prop_assert_eq!(normalize(&une), une);
    }

    #[test]
    fn fermeture_jamais_deficitaire(s in "[0-9()+]{0,24}") {
        let f = fermer_parentheses(&s);
        prop_assert!(f.starts_with(&s));
        prop_assert!(f.matches('(').count() <= f.matches(')').count());
    }

    #[test]
    fn evaluate_enregistre_la_valeur_arrondie(a in arbre()) {
        let attendu = a.valeur();
        prop_assume!(!attendu.is_nan());

        let mut c = Calculatrice::new(Box::<StockageMemoire>::default());
        let r = c.evaluate(&a.texte()).unwrap();
        prop_assert_eq!(r.affichage.parse::<f64>().ok().or(
            match r.affichage.as_str() {
                "Infinity" => Some(f64::INFINITY),
                "-Infinity" => Some(f64::NEG_INFINITY),
                _ => None,
            }
        ), Some(arrondir(attendu)));
        prop_assert_eq!(c.historique().len(), 1);
    }
}
