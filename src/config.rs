// src/config.rs
//
// Configuration native : où ranger l’historique et le thème.
// 1) variable d’environnement CALCULATRICE_DATA_DIR
// 2) dossier de données de l’utilisateur (directories)
// Sinon : None => stockage en mémoire pour la session.

use std::ffi::OsString;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Variable d’environnement qui force le dossier de données.
pub const VAR_DOSSIER_DONNEES: &str = "CALCULATRICE_DATA_DIR";

/// Filtre de journalisation si RUST_LOG est absent.
pub const FILTRE_LOG_DEFAUT: &str = "info";

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub dossier_donnees: Option<PathBuf>,
}

impl Config {
    pub fn depuis_env() -> Self {
        Self {
            dossier_donnees: resoudre_dossier(std::env::var_os(VAR_DOSSIER_DONNEES)),
        }
    }
}

fn resoudre_dossier(force: Option<OsString>) -> Option<PathBuf> {
    match force {
        Some(v) if !v.is_empty() => Some(PathBuf::from(v)),
        _ => ProjectDirs::from("", "", "calculatrice").map(|d| d.data_dir().to_path_buf()),
    }
}
