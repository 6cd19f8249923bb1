// src/noyau/theme.rs
//
// Thème d’affichage, persisté sous son propre nom ("light", "dark").
// Le rendu egui est dans app/vue.rs.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Clair,
    Sombre,
}

impl Theme {
    pub const TOUS: [Theme; 2] = [Theme::Clair, Theme::Sombre];

    /// Nom persisté.
    pub fn nom(self) -> &'static str {
        match self {
            Theme::Clair => "light",
            Theme::Sombre => "dark",
        }
    }

    pub fn libelle(self) -> &'static str {
        match self {
            Theme::Clair => "Clair",
            Theme::Sombre => "Sombre",
        }
    }

    /// Nom inconnu ou absent => thème de base.
    pub fn depuis_nom(nom: Option<&str>) -> Self {
        match nom.map(str::trim) {
            Some("dark") => Theme::Sombre,
            _ => Theme::Clair,
        }
    }
}
