// src/noyau/tampon.rs
//
// Tampon de saisie : l’expression en cours d’édition.
// États : vide (affiché "0") / non vide (affiché tel quel).

/// Affichage d’un tampon vide.
pub const AFFICHAGE_VIDE: &str = "0";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tampon {
    contenu: String,
}

impl Tampon {
    pub fn contenu(&self) -> &str {
        &self.contenu
    }

    pub fn est_vide(&self) -> bool {
        self.contenu.is_empty()
    }

    /// Texte à afficher : "0" si vide.
    pub fn affichage(&self) -> &str {
        if self.contenu.is_empty() {
            AFFICHAGE_VIDE
        } else {
            &self.contenu
        }
    }

    /// Saisie d’une touche (chiffre, opérateur, '.').
    /// Un affichage "0" est remplacé, sauf par '.' qui donne "0.".
    pub fn saisir(&mut self, v: &str) {
        if v == "." {
            if self.contenu.is_empty() {
                self.contenu.push_str(AFFICHAGE_VIDE);
            }
        } else if self.contenu == AFFICHAGE_VIDE {
            self.contenu.clear();
        }
        self.contenu.push_str(v);
    }

    /// Ajout brut, sans règle du zéro (touche x^y, préfixes de fonctions).
    pub fn prolonger(&mut self, v: &str) {
        self.contenu.push_str(v);
    }

    /// Retour arrière : un caractère.
    pub fn effacer_dernier(&mut self) {
        self.contenu.pop();
    }

    pub fn vider(&mut self) {
        self.contenu.clear();
    }

    /// Remplace tout le contenu (résultat à enchaîner, rappel d’historique).
    pub fn remplacer(&mut self, v: impl Into<String>) {
        self.contenu = v.into();
    }
}
