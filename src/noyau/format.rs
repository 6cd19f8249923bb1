// src/noyau/format.rs
//
// Nombres <-> texte.
// - format_nombre : forme décimale la plus courte qui relit le même f64,
//                   notation exponentielle hors de [1e-6, 1e21) (comme un affichage de calculatrice web)
// - arrondir      : 12 chiffres significatifs pour les non-entiers (bruit flottant)
// - lecture_souple / lecture_stricte : tampon -> f64 pour les opérations immédiates

use once_cell::sync::Lazy;
use regex::Regex;

/// Chiffres significatifs conservés pour un résultat non entier.
pub const CHIFFRES_SIGNIFICATIFS: usize = 12;

/// Littéral numérique en tête de chaîne (signe, Infinity, fraction, exposant).
static PREFIXE_NOMBRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("regex nombre")
});

/* ------------------------ f64 -> texte ------------------------ */

/// Affichage d’un f64 :
/// 1024, 0.3, 1e+21, 1e-7, Infinity, -Infinity, NaN. `-0` s’affiche "0".
pub fn format_nombre(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    // {:e} donne déjà les chiffres minimaux : "1.2345e3", "5e-7"
    let sci = format!("{:e}", x.abs());
    let Some((mantisse, exposant)) = sci.split_once('e') else {
        return x.to_string();
    };
    let Ok(exposant) = exposant.parse::<i32>() else {
        return x.to_string();
    };

    let chiffres: String = mantisse.chars().filter(|c| *c != '.').collect();
    let k = chiffres.len() as i32;
    let n = exposant + 1; // position de la virgule

    let corps = if k <= n && n <= 21 {
        format!("{chiffres}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (ent, frac) = chiffres.split_at(n as usize);
        format!("{ent}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{chiffres}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let signe = if e >= 0 { '+' } else { '-' };
        let (tete, reste) = chiffres.split_at(1);
        if reste.is_empty() {
            format!("{tete}e{signe}{}", e.abs())
        } else {
            format!("{tete}.{reste}e{signe}{}", e.abs())
        }
    };

    if x < 0.0 {
        format!("-{corps}")
    } else {
        corps
    }
}

/* ------------------------ Arrondi ------------------------ */

/// Assez de chiffres pour le développement décimal exact de tout f64.
const CHIFFRES_EXACTS: usize = 800;

/// Non-entier fini => 12 chiffres significatifs, égalité arrondie loin de zéro
/// (1234567890.125 -> 1234567890.13). Entiers et infinis inchangés.
pub fn arrondir(x: f64) -> f64 {
    if !x.is_finite() || x.fract() == 0.0 {
        return x;
    }

    // développement exact : "d.ddd…e±n"
    let exact = format!("{:.*e}", CHIFFRES_EXACTS, x.abs());
    let Some((mantisse, exposant)) = exact.split_once('e') else {
        return x;
    };
    let Ok(mut exposant) = exposant.parse::<i32>() else {
        return x;
    };

    let mut chiffres: Vec<u8> = mantisse
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    let vers_le_haut = chiffres
        .get(CHIFFRES_SIGNIFICATIFS)
        .is_some_and(|d| *d >= 5);
    chiffres.truncate(CHIFFRES_SIGNIFICATIFS);

    if vers_le_haut {
        // retenue ; 999…9 devient 100…0 avec un exposant de plus
        let mut i = chiffres.len();
        loop {
            if i == 0 {
                chiffres.insert(0, 1);
                chiffres.pop();
                exposant += 1;
                break;
            }
            i -= 1;
            if chiffres[i] == 9 {
                chiffres[i] = 0;
            } else {
                chiffres[i] += 1;
                break;
            }
        }
    }

    let texte: String = chiffres.iter().map(|d| char::from(b'0' + d)).collect();
    let signe = if x < 0.0 { "-" } else { "" };
    format!("{signe}{}.{}e{exposant}", &texte[..1], &texte[1..])
        .parse::<f64>()
        .unwrap_or(x)
}

/* ------------------------ texte -> f64 ------------------------ */

fn lire_litteral(s: &str) -> Option<f64> {
    let (signe, corps) = match s.strip_prefix('-') {
        Some(r) => (-1.0, r),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    if corps == "Infinity" {
        return Some(signe * f64::INFINITY);
    }
    corps.parse::<f64>().ok().map(|v| signe * v)
}

/// Lecture souple : plus long préfixe numérique ("12+3" -> 12).
/// Vide, invalide, NaN ou -0 => 0.
pub fn lecture_souple(s: &str) -> f64 {
    let s = s.trim_start();
    let v = PREFIXE_NOMBRE
        .find(s)
        .and_then(|m| lire_litteral(m.as_str()))
        .unwrap_or(0.0);
    if v.is_nan() || v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Lecture stricte : toute la chaîne doit être un nombre. Vide => 0.
pub fn lecture_stricte(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match PREFIXE_NOMBRE.find(s) {
        Some(m) if m.end() == s.len() => lire_litteral(s),
        _ => None,
    }
}
