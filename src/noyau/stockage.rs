// src/noyau/stockage.rs
//
// Stockage clé/valeur (texte) derrière un petit trait :
// - StockageMemoire    : HashMap (tests, repli si rien d’autre n’est disponible)
// - StockageFichier    : un fichier par clé dans un dossier (natif)
// - StockageNavigateur : window.localStorage (wasm32)
//
// Contrat : `lire` ne panique jamais (absent ou illisible => None) ;
// `ecrire` peut échouer, l’appelant reste alors en mémoire.

use std::collections::HashMap;

use super::erreur::ErreurStockage;

pub trait Stockage {
    fn lire(&self, cle: &str) -> Option<String>;
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
}

/* ------------------------ Mémoire ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct StockageMemoire {
    valeurs: HashMap<String, String>,
}

impl Stockage for StockageMemoire {
    fn lire(&self, cle: &str) -> Option<String> {
        self.valeurs.get(cle).cloned()
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.valeurs.insert(cle.to_string(), valeur.to_string());
        Ok(())
    }
}

/* ------------------------ Fichier (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
pub use fichier::StockageFichier;

#[cfg(not(target_arch = "wasm32"))]
mod fichier {
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    use tracing::warn;

    use super::{ErreurStockage, Stockage};

    /// Un fichier `<dossier>/<cle>.txt` par clé, écrit via tmp + rename.
    #[derive(Clone, Debug)]
    pub struct StockageFichier {
        dossier: PathBuf,
    }

    impl StockageFichier {
        /// Crée le dossier si besoin.
        pub fn ouvrir(dossier: impl Into<PathBuf>) -> Result<Self, ErreurStockage> {
            let dossier = dossier.into();
            fs::create_dir_all(&dossier)?;
            Ok(Self { dossier })
        }

        #[cfg(test)]
        pub fn dossier(&self) -> &std::path::Path {
            &self.dossier
        }

        fn chemin(&self, cle: &str) -> PathBuf {
            self.dossier.join(format!("{}.txt", assainir(cle)))
        }
    }

    /// Nom de fichier sûr à partir d’une clé.
    fn assainir(cle: &str) -> String {
        let s = cle
            .trim()
            .replace(['<', '>', ':', '"', '/', '\\', '|', '?', '*'], "_");
        if s.is_empty() {
            "defaut".to_string()
        } else {
            s
        }
    }

    impl Stockage for StockageFichier {
        fn lire(&self, cle: &str) -> Option<String> {
            let chemin = self.chemin(cle);
            if !chemin.exists() {
                return None;
            }
            match fs::read_to_string(&chemin) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(chemin = %chemin.display(), erreur = %e, "lecture impossible");
                    None
                }
            }
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            let chemin = self.chemin(cle);
            let mut tmp = chemin.clone();
            tmp.set_extension("txt.tmp");
            {
                let mut f = fs::File::create(&tmp)?;
                f.write_all(valeur.as_bytes())?;
                f.flush()?;
            }
            fs::rename(&tmp, &chemin)?;
            Ok(())
        }
    }

}

/* ------------------------ Navigateur (wasm32) ------------------------ */

#[cfg(target_arch = "wasm32")]
pub use navigateur::StockageNavigateur;

#[cfg(target_arch = "wasm32")]
mod navigateur {
    use super::{ErreurStockage, Stockage};

    /// window.localStorage
    pub struct StockageNavigateur {
        local: web_sys::Storage,
    }

    impl StockageNavigateur {
        pub fn ouvrir() -> Result<Self, ErreurStockage> {
            let w = web_sys::window()
                .ok_or_else(|| ErreurStockage::Indisponible("window() indisponible".into()))?;
            let local = w
                .local_storage()
                .map_err(|_| ErreurStockage::Indisponible("localStorage refusé".into()))?
                .ok_or_else(|| ErreurStockage::Indisponible("localStorage absent".into()))?;
            Ok(Self { local })
        }
    }

    impl Stockage for StockageNavigateur {
        fn lire(&self, cle: &str) -> Option<String> {
            self.local.get_item(cle).ok().flatten()
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            self.local
                .set_item(cle, valeur)
                .map_err(|_| ErreurStockage::Indisponible(format!("écriture refusée: {cle}")))
        }
    }
}
