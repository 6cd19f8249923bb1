//! Tests de la session : enregistrement, échecs sans effet, persistance.
//!
//! Horloge figée pour des entrées reproductibles.
//! Le stockage est inspecté à travers `Calculatrice::stockage()`.

use super::erreur::{ErreurCalcul, ErreurStockage};
use super::historique::{EntreeHistorique, HISTORIQUE_MAX};
use super::pipeline::{Calculatrice, CLE_HISTORIQUE, CLE_THEME};
use super::stockage::{Stockage, StockageMemoire};
use super::theme::Theme;

const T0: i64 = 1_700_000_000_000;

fn horloge_figee() -> i64 {
    T0
}

fn session() -> Calculatrice {
    Calculatrice::new(Box::<StockageMemoire>::default()).avec_horloge(horloge_figee)
}

fn session_avec(cle: &str, valeur: &str) -> Calculatrice {
    let mut s = StockageMemoire::default();
    s.ecrire(cle, valeur).unwrap();
    Calculatrice::new(Box::new(s)).avec_horloge(horloge_figee)
}

/// Stockage qui refuse toute écriture.
struct StockageLectureSeule;

impl Stockage for StockageLectureSeule {
    fn lire(&self, _cle: &str) -> Option<String> {
        None
    }
    fn ecrire(&mut self, _cle: &str, _valeur: &str) -> Result<(), ErreurStockage> {
        Err(ErreurStockage::Indisponible("lecture seule".into()))
    }
}

/* ------------------------ evaluate ------------------------ */

#[test]
fn puissance_enregistree() {
    let mut c = session();
    let r = c.evaluate("2^10").unwrap();

    assert_eq!(r.affichage, "1024");
    assert_eq!(
        r.entree,
        EntreeHistorique {
            expr: "2^10 =".into(),
            result: "1024".into(),
            time: T0,
        }
    );
    assert_eq!(c.historique().len(), 1);
    assert_eq!(c.tampon().contenu(), "1024");
}

#[test]
fn parenthese_auto_fermee() {
    let mut c = session();
    assert_eq!(c.evaluate("(1+2").unwrap().affichage, "3");
    assert_eq!(c.historique().get(0).unwrap().expr, "(1+2 =");
}

#[test]
fn bruit_flottant_supprime() {
    let mut c = session();
    assert_eq!(c.evaluate("0.1+0.2").unwrap().affichage, "0.3");
    assert_eq!(c.evaluate("2+2").unwrap().affichage, "4");
}

#[test]
fn arrondi_egalite_vers_le_haut() {
    let mut c = session();
    assert_eq!(c.evaluate("1234567890.125").unwrap().affichage, "1234567890.13");
    assert_eq!(c.evaluate("-1234567890.125").unwrap().affichage, "-1234567890.13");
}

#[test]
fn enchainement_sur_le_resultat() {
    let mut c = session();
    c.saisir("6");
    c.saisir("×");
    c.saisir("7");
    assert_eq!(c.egal().unwrap().unwrap().affichage, "42");

    c.saisir("÷");
    c.saisir("4");
    assert_eq!(c.tampon().contenu(), "42÷4");
    assert_eq!(c.egal().unwrap().unwrap().affichage, "10.5");
    assert_eq!(c.historique().get(0).unwrap().expr, "42÷4 =");
}

#[test]
fn enchainement_apres_infini() {
    let mut c = session();
    assert_eq!(c.evaluate("1/0").unwrap().affichage, "Infinity");
    c.saisir("-");
    c.saisir("1");
    assert_eq!(c.egal().unwrap().unwrap().affichage, "Infinity");
}

#[test]
fn egal_sur_tampon_vide_ne_fait_rien() {
    let mut c = session();
    assert!(c.egal().is_none());
    assert!(c.historique().is_empty());
}

#[test]
fn echec_sans_effet() {
    let mut c = session();
    c.saisir("2");
    c.saisir("+");
    let avant = c.tampon().clone();

    assert!(matches!(c.egal(), Some(Err(ErreurCalcul::Evaluation(_)))));
    assert_eq!(c.tampon(), &avant);
    assert!(c.historique().is_empty());
    assert_eq!(c.stockage().lire(CLE_HISTORIQUE), None);

    assert!(matches!(c.evaluate("√(-1)"), Err(ErreurCalcul::Evaluation(_))));
    assert!(c.historique().is_empty());
}

/* ------------------------ immédiats ------------------------ */

#[test]
fn carre_et_cube() {
    let mut c = session();
    let r = c.apply_power("3", 2);
    assert_eq!(r.affichage, "9");
    assert_eq!(r.entree.expr, "3^2");

    let r = c.apply_power("1.5", 3);
    assert_eq!(r.affichage, "3.375");
    assert_eq!(r.entree.expr, "1.5^3");
    assert_eq!(c.tampon().contenu(), "3.375");
    assert_eq!(c.historique().len(), 2);
}

#[test]
fn carre_arrondi() {
    let mut c = session();
    assert_eq!(c.apply_power("0.1", 2).affichage, "0.01");
}

#[test]
fn puissance_sur_tampon_invalide_vaut_zero() {
    let mut c = session();
    let r = c.apply_power("", 3);
    assert_eq!(r.affichage, "0");
    assert_eq!(r.entree.expr, "0^3");

    let r = c.apply_power("12+3", 2);
    assert_eq!(r.affichage, "144");
    assert_eq!(r.entree.expr, "12^2");
}

#[test]
fn factorielle_de_cinq() {
    let mut c = session();
    let r = c.apply_factorial("5").unwrap();
    assert_eq!(r.affichage, "120");
    assert_eq!(r.entree.expr, "5!");
    assert_eq!(c.tampon().contenu(), "120");
}

#[test]
fn factorielle_tronquee_vers_zero() {
    let mut c = session();
    assert_eq!(c.apply_factorial("4.9").unwrap().entree.expr, "4!");
    assert_eq!(c.apply_factorial("0").unwrap().affichage, "1");
    assert_eq!(c.apply_factorial("-0.5").unwrap().entree.expr, "0!");
}

#[test]
fn factorielle_negative_refusee() {
    let mut c = session();
    c.saisir("-");
    c.saisir("1");

    let r = c.apply_factorial("-1");
    assert!(matches!(r, Err(ErreurCalcul::Domaine(_))));
    assert_eq!(c.tampon().contenu(), "-1");
    assert!(c.historique().is_empty());
}

#[test]
fn factorielle_non_numerique_refusee() {
    let mut c = session();
    assert!(matches!(c.apply_factorial("2+3"), Err(ErreurCalcul::Domaine(_))));
    assert!(c.historique().is_empty());
}

/* ------------------------ historique ------------------------ */

#[test]
fn historique_borne() {
    let mut c = session();
    for i in 0..=HISTORIQUE_MAX {
        c.evaluate(&format!("{i}+0")).unwrap();
    }
    let h = c.historique();
    assert_eq!(h.len(), HISTORIQUE_MAX);
    assert_eq!(h.get(0).unwrap().expr, format!("{HISTORIQUE_MAX}+0 ="));
    assert_eq!(h.get(HISTORIQUE_MAX - 1).unwrap().expr, "1+0 =");

    // le JSON persisté respecte aussi la borne
    let brut = c.stockage().lire(CLE_HISTORIQUE).unwrap();
    let v: Vec<EntreeHistorique> = serde_json::from_str(&brut).unwrap();
    assert_eq!(v.len(), HISTORIQUE_MAX);
}

#[test]
fn persiste_apres_chaque_calcul() {
    let mut c = session();
    c.evaluate("1+1").unwrap();
    c.apply_factorial("3").unwrap();

    let brut = c.stockage().lire(CLE_HISTORIQUE).unwrap();
    let v: Vec<EntreeHistorique> = serde_json::from_str(&brut).unwrap();
    let exprs: Vec<&str> = v.iter().map(|e| e.expr.as_str()).collect();
    assert_eq!(exprs, vec!["3!", "1+1 ="]);
}

#[test]
fn rechargement_depuis_le_stockage() {
    let json = r#"[{"expr":"2^10 =","result":"1024","time":1},{"expr":"5!","result":"120","time":0}]"#;
    let c = session_avec(CLE_HISTORIQUE, json);
    assert_eq!(c.historique().len(), 2);
    assert_eq!(c.historique().get(0).unwrap().result, "1024");
}

#[test]
fn historique_corrompu_donne_vide() {
    for brut in ["", "null", "{", "[1,2,3]", r#"{"expr":"x"}"#] {
        let c = session_avec(CLE_HISTORIQUE, brut);
        assert!(c.historique().is_empty(), "brut={brut:?}");
    }
}

#[test]
fn rappel_retire_le_marqueur() {
    let mut c = session();
    c.evaluate("2^10").unwrap();
    c.apply_factorial("3").unwrap();

    assert_eq!(c.rappeler(1), Some("2^10"));
    assert_eq!(c.tampon().contenu(), "2^10");
    assert_eq!(c.rappeler(0), Some("3!"));
    assert_eq!(c.rappeler(9), None);
    assert_eq!(c.tampon().contenu(), "3!");
}

#[test]
fn effacer_historique_persiste() {
    let mut c = session();
    c.evaluate("1+1").unwrap();
    c.effacer_historique();
    assert!(c.historique().is_empty());
    assert_eq!(c.stockage().lire(CLE_HISTORIQUE).as_deref(), Some("[]"));
}

#[test]
fn stockage_defaillant_non_fatal() {
    let mut c = Calculatrice::new(Box::new(StockageLectureSeule)).avec_horloge(horloge_figee);
    assert_eq!(c.evaluate("2*3").unwrap().affichage, "6");
    assert_eq!(c.historique().len(), 1);
    c.choisir_theme(Theme::Sombre);
    assert_eq!(c.theme(), Theme::Sombre);
}

/* ------------------------ thème ------------------------ */

#[test]
fn theme_par_defaut_puis_persiste() {
    let mut c = session();
    assert_eq!(c.theme(), Theme::Clair);
    c.choisir_theme(Theme::Sombre);
    assert_eq!(c.stockage().lire(CLE_THEME).as_deref(), Some("dark"));
}

#[test]
fn theme_relu_au_demarrage() {
    let c = session_avec(CLE_THEME, "dark");
    assert_eq!(c.theme(), Theme::Sombre);
}
