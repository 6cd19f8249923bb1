// src/noyau/historique.rs
//
// Historique des calculs : plus récent en tête, borné à HISTORIQUE_MAX.
// Format persisté : tableau JSON de {expr, result, time} (time en ms epoch).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Capacité : au-delà, l’entrée la plus ancienne (en queue) est évincée.
pub const HISTORIQUE_MAX: usize = 200;

/// Marqueur final d’une expression évaluée ("2^10 =").
pub const MARQUEUR_EGAL: &str = "=";

/// Un calcul passé. Immuable une fois créé.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    pub expr: String,
    pub result: String,
    pub time: i64,
}

impl EntreeHistorique {
    /// Texte à remettre dans le tampon : `expr` sans le " =" final.
    pub fn expression_rappel(&self) -> &str {
        let s = self.expr.trim_end();
        s.strip_suffix(MARQUEUR_EGAL).unwrap_or(s).trim_end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
}

impl Historique {
    /// Ajoute en tête ; évince la queue si la capacité est dépassée.
    pub fn ajouter(&mut self, entree: EntreeHistorique) {
        self.entrees.push_front(entree);
        if self.entrees.len() > HISTORIQUE_MAX {
            self.entrees.pop_back();
        }
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(index)
    }

    /// Du plus récent au plus ancien.
    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entrees)
    }

    /// Relit un tableau JSON ; un tableau trop long est tronqué à HISTORIQUE_MAX.
    pub fn depuis_json(brut: &str) -> Result<Self, serde_json::Error> {
        let mut entrees: VecDeque<EntreeHistorique> = serde_json::from_str(brut)?;
        entrees.truncate(HISTORIQUE_MAX);
        Ok(Self { entrees })
    }
}
