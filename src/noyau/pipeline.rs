//! Session de calcul : tampon + historique + thème + stockage.
//!
//! Toutes les mutations passent par ici, une à la fois (pas de concurrence) :
//! - evaluate        : normalise, ferme, évalue, arrondit, enregistre, enchaîne
//! - apply_power     : x², x³ immédiats (ne peut pas échouer)
//! - apply_factorial : n! immédiat (DomainError si n < 0)
//!
//! Un échec ne touche ni au tampon ni à l’historique.
//! Un stockage défaillant n’est jamais fatal : l’historique reste en mémoire.

use tracing::{debug, warn};

use super::erreur::ErreurCalcul;
use super::eval::evaluer_expression;
use super::format::{arrondir, format_nombre, lecture_souple, lecture_stricte};
use super::historique::{EntreeHistorique, Historique, MARQUEUR_EGAL};
use super::rpn::puissance;
use super::stockage::Stockage;
use super::tampon::Tampon;
use super::theme::Theme;

/// Clé du journal JSON.
pub const CLE_HISTORIQUE: &str = "calc-history";

/// Clé du nom de thème.
pub const CLE_THEME: &str = "calc-theme";

/// Résultat d’un calcul réussi : texte à afficher + entrée enregistrée.
#[derive(Clone, Debug, PartialEq)]
pub struct Calcul {
    pub affichage: String,
    pub entree: EntreeHistorique,
}

/// Horloge en millisecondes epoch (injectable pour les tests).
pub type Horloge = fn() -> i64;

fn maintenant_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct Calculatrice {
    tampon: Tampon,
    historique: Historique,
    theme: Theme,
    stockage: Box<dyn Stockage>,
    horloge: Horloge,
}

impl Calculatrice {
    /// Charge historique + thème depuis le stockage (absent/corrompu => vide / clair).
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        let historique = charger_historique(stockage.as_ref());
        let theme = Theme::depuis_nom(stockage.lire(CLE_THEME).as_deref());
        debug!(entrees = historique.len(), theme = theme.nom(), "session chargée");

        Self {
            tampon: Tampon::default(),
            historique,
            theme,
            stockage,
            horloge: maintenant_ms,
        }
    }

    #[cfg(test)]
    pub fn avec_horloge(mut self, horloge: Horloge) -> Self {
        self.horloge = horloge;
        self
    }

    /* ------------------------ Accès ------------------------ */

    pub fn tampon(&self) -> &Tampon {
        &self.tampon
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[cfg(test)]
    pub fn stockage(&self) -> &dyn Stockage {
        self.stockage.as_ref()
    }

    /* ------------------------ Édition du tampon ------------------------ */

    pub fn saisir(&mut self, v: &str) {
        self.tampon.saisir(v);
    }

    pub fn prolonger(&mut self, v: &str) {
        self.tampon.prolonger(v);
    }

    pub fn effacer_dernier(&mut self) {
        self.tampon.effacer_dernier();
    }

    pub fn vider(&mut self) {
        self.tampon.vider();
    }

    /// Remet une entrée d’historique dans le tampon (sans le " =").
    pub fn rappeler(&mut self, index: usize) -> Option<&str> {
        let expr = self.historique.get(index)?.expression_rappel().to_string();
        self.tampon.remplacer(expr);
        Some(self.tampon.contenu())
    }

    /* ------------------------ Calculs ------------------------ */

    /// Évalue `buffer` ; en cas de succès, enregistre "<buffer> =" et enchaîne sur le résultat.
    pub fn evaluate(&mut self, buffer: &str) -> Result<Calcul, ErreurCalcul> {
        let valeur = evaluer_expression(buffer)?;
        let affichage = format_nombre(valeur);
        let entree = self.enregistrer(format!("{buffer} {MARQUEUR_EGAL}"), &affichage);
        self.tampon.remplacer(affichage.clone());
        Ok(Calcul { affichage, entree })
    }

    /// Évalue le tampon courant. Tampon vide => rien.
    pub fn egal(&mut self) -> Option<Result<Calcul, ErreurCalcul>> {
        if self.tampon.est_vide() {
            return None;
        }
        let buffer = self.tampon.contenu().to_string();
        Some(self.evaluate(&buffer))
    }

    /// x^exposant immédiat sur la valeur numérique en tête du tampon (invalide => 0).
    pub fn apply_power(&mut self, buffer: &str, exposant: i32) -> Calcul {
        let x = lecture_souple(buffer);
        let valeur = arrondir(puissance(x, f64::from(exposant)));
        let affichage = format_nombre(valeur);
        let entree = self.enregistrer(format!("{}^{exposant}", format_nombre(x)), &affichage);
        self.tampon.remplacer(affichage.clone());
        Calcul { affichage, entree }
    }

    /// n! immédiat, n = tampon tronqué vers zéro. n < 0 (ou tampon non numérique) => Domaine.
    pub fn apply_factorial(&mut self, buffer: &str) -> Result<Calcul, ErreurCalcul> {
        let n = lecture_stricte(buffer)
            .ok_or_else(|| ErreurCalcul::Domaine(format!("'{buffer}' n’est pas un nombre")))?
            .trunc();
        if n < 0.0 {
            return Err(ErreurCalcul::Domaine(format!(
                "factorielle de {}",
                format_nombre(n)
            )));
        }

        let affichage = format_nombre(factorielle(n));
        let entree = self.enregistrer(format!("{}!", format_nombre(n)), &affichage);
        self.tampon.remplacer(affichage.clone());
        Ok(Calcul { affichage, entree })
    }

    /* ------------------------ Historique + préférences ------------------------ */

    pub fn effacer_historique(&mut self) {
        self.historique.vider();
        self.persister_historique();
    }

    pub fn choisir_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.stockage.ecrire(CLE_THEME, theme.nom()) {
            warn!(erreur = %e, "thème non persisté");
        }
    }

    fn enregistrer(&mut self, expr: String, resultat: &str) -> EntreeHistorique {
        let entree = EntreeHistorique {
            expr: expr.trim().to_string(),
            result: resultat.to_string(),
            time: (self.horloge)(),
        };
        debug!(expr = %entree.expr, result = %entree.result, "calcul enregistré");

        self.historique.ajouter(entree.clone());
        self.persister_historique();
        entree
    }

    fn persister_historique(&mut self) {
        let json = match self.historique.to_json() {
            Ok(j) => j,
            Err(e) => {
                warn!(erreur = %e, "sérialisation de l’historique impossible");
                return;
            }
        };
        if let Err(e) = self.stockage.ecrire(CLE_HISTORIQUE, &json) {
            warn!(erreur = %e, "historique non persisté (mémoire seulement)");
        }
    }
}

fn charger_historique(stockage: &dyn Stockage) -> Historique {
    let Some(brut) = stockage.lire(CLE_HISTORIQUE) else {
        return Historique::default();
    };
    Historique::depuis_json(&brut).unwrap_or_else(|e| {
        warn!(erreur = %e, "historique persisté illisible, on repart de zéro");
        Historique::default()
    })
}

/// Produit itératif 1×2×…×n en f64 ; s’arrête dès que le produit vaut Infinity.
fn factorielle(n: f64) -> f64 {
    let mut r = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n && r.is_finite() {
        r *= i;
        i += 1.0;
    }
    r
}
