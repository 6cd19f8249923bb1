// src/main.rs
//
// Calculatrice — point d’entrée NATIF + WEB (WASM)
// ------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//                                 historique/thème dans un dossier de données (config.rs)
//                                 journal tracing (RUST_LOG, défaut "info")
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//                                 historique/thème dans window.localStorage
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
#[cfg(not(target_arch = "wasm32"))]
mod config;
mod noyau;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn init_journal() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filtre = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::FILTRE_LOG_DEFAUT));
    fmt().with_env_filter(filtre).init();
}

/// Stockage fichier si possible ; sinon mémoire (historique perdu à la fermeture).
#[cfg(not(target_arch = "wasm32"))]
fn ouvrir_stockage(cfg: &config::Config) -> Box<dyn noyau::Stockage> {
    let Some(dossier) = &cfg.dossier_donnees else {
        tracing::warn!("aucun dossier de données, historique en mémoire seulement");
        return Box::<noyau::StockageMemoire>::default();
    };
    match noyau::StockageFichier::ouvrir(dossier) {
        Ok(s) => {
            tracing::info!(dossier = %dossier.display(), "stockage fichier");
            Box::new(s)
        }
        Err(e) => {
            tracing::warn!(dossier = %dossier.display(), erreur = %e, "stockage fichier indisponible, historique en mémoire seulement");
            Box::<noyau::StockageMemoire>::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    init_journal();

    let cfg = config::Config::depuis_env();
    let stockage = ouvrir_stockage(&cfg);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([420.0, 720.0])
            .with_min_inner_size([360.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(stockage)))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{noyau, AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// localStorage si disponible ; sinon mémoire pour la session.
    fn ouvrir_stockage() -> Box<dyn noyau::Stockage> {
        match noyau::StockageNavigateur::ouvrir() {
            Ok(s) => Box::new(s),
            Err(e) => {
                tracing::warn!(erreur = %e, "localStorage indisponible, historique en mémoire seulement");
                Box::<noyau::StockageMemoire>::default()
            }
        }
    }

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let stockage = ouvrir_stockage();
        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |_cc| Ok(Box::new(AppCalc::new(stockage)))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
