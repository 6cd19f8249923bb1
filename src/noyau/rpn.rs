// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer en double précision IEEE-754
//
// Règles:
// - Précédence : moins unaire (4) > ** (3, associatif à droite) > * / (2) > + - (1)
// - Plus unaire : ignoré. Moins unaire : Tok::Neg (préfixe, jamais dépilé par un préfixe)
// - "--" et "++" (décrément / incrément) sont refusés ; "+-" et "-+" passent
// - Fonction : gardée sur la pile, sortie après sa parenthèse fermante
// - Pas de multiplication implicite : une valeur suivie d’une valeur est une erreur
//
// NOTE:
// - Les parenthèses manquantes sont déjà complétées par eval.rs (auto-fermeture).
//   Ici, une '(' restante ou une ')' orpheline est une erreur.

use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Pow => 3,
        Tok::Neg => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Pow)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction(Sqrt), LPar, Num(16), RPar, Plus, Minus, Num(1)]
///   rpn:    [Num(16), Fonction(Sqrt), Num(1), Neg, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter les opérateurs unaires et les valeurs juxtaposées.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().copied().enumerate() {
        let precedent = i.checked_sub(1).and_then(|j| tokens.get(j)).copied();
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err("opérateur manquant".into());
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(_) | Tok::LPar => {
                if prev_was_value {
                    return Err("opérateur manquant".into());
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err("parenthèse vide ou opérande manquant".into());
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(f @ Tok::Fonction(_)) = ops.last().copied() {
                    ops.pop();
                    out.push(f);
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus if !prev_was_value => {
                if precedent == Some(tok) {
                    return Err("signe répété".into());
                }
                // préfixe : rien à dépiler (un préfixe lie à droite)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                if !prev_was_value {
                    return Err("opérande manquant".into());
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar | Tok::Fonction(_)) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err("jeton Neg inattendu en entrée".into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Puissance f64, avec 1 ** ±Infinity = NaN (powf renverrait 1).
pub fn puissance(base: f64, exposant: f64) -> f64 {
    if base.abs() == 1.0 && exposant.is_infinite() {
        return f64::NAN;
    }
    base.powf(exposant)
}

/// Évalue une RPN.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, String> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn.iter().copied() {
        match tok {
            Tok::Num(v) => st.push(v),

            Tok::Neg => {
                let x = st.pop().ok_or("expression invalide")?;
                st.push(-x);
            }

            Tok::Fonction(f) => {
                let x = st.pop().ok_or("fonction sans argument")?;
                st.push(f.appliquer(x));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => a / b,
                    _ => puissance(a, b),
                };
                st.push(v);
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err("expression invalide".into()),
    }
}
