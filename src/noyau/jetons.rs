// src/noyau/jetons.rs
//
// Tokenisation du texte normalisé (voir normalise.rs) en jetons f64.

use super::format::format_nombre;

/// Fonctions unaires connues de l’évaluateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log10,
    Ln,
    Sqrt,
}

impl Fonction {
    fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "log10" => Some(Self::Log10),
            "ln" => Some(Self::Ln),
            "sqrt" => Some(Self::Sqrt),
            _ => None,
        }
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log10 => "log10",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Log10 => x.log10(),
            Self::Ln => x.ln(),
            Self::Sqrt => x.sqrt(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Fonction(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Pow, // ** (ou ^ si le texte n’est pas normalisé)

    // Moins unaire : produit par to_rpn seulement, jamais par tokenize.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne normalisée.
/// Supporte:
/// - littéraux 12, 1.5, .5, 5., 1e5, 1e+21, 2.5E-3
/// - Infinity (pour enchaîner un résultat infini)
/// - opérateurs + - * / ** ^
/// - parenthèses ( )
/// - fonctions sin cos tan log10 ln sqrt, obligatoirement suivies de '('
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Pow);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Littéral numérique
        if c.is_ascii_digit() || c == '.' {
            let (v, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(v));
            i = fin;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            if word == "Infinity" {
                out.push(Tok::Num(f64::INFINITY));
                continue;
            }

            let f = Fonction::depuis_nom(&word)
                .ok_or_else(|| format!("identifiant inconnu: '{word}'"))?;
            if chars.get(i) != Some(&'(') {
                return Err(format!("'{word}' doit être suivi de '('"));
            }
            out.push(Tok::Fonction(f));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Lit un littéral à partir de `start`. Retourne (valeur, index après le littéral).
/// Un exposant incomplet ("2e", "2e+") n’est pas consommé.
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), String> {
    let mut i = start;
    let mut chiffres = 0usize;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        chiffres += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            chiffres += 1;
        }
    }
    if chiffres == 0 {
        return Err("nombre invalide: '.'".into());
    }

    // exposant : e[+-]?\d+
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        let debut_exp = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j > debut_exp {
            i = j;
        }
    }

    let txt: String = chars[start..i].iter().collect();
    let v = txt
        .parse::<f64>()
        .map_err(|_| format!("nombre invalide: '{txt}'"))?;
    Ok((v, i))
}

/// Format utilitaire (debug/journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format_nombre(*v),
            Tok::Fonction(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Pow => "**".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
