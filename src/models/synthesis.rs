use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Pre-computed AI synthesis (`/synthese-ia/{id}/latest`); the client only displays it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AiSynthesis {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub resume: String,
    pub recommandations: Option<String>,
    pub risques: Option<String>,
    pub score_global: Option<f64>,
    pub niveau_gravite: Option<String>,
    pub tags: Vec<String>,
    pub alertes_critiques: Option<String>,
    pub anomalies_detectees: Option<String>,
    pub valide_par_humain: bool,
    pub commentaire_medecin: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AiSynthesis {
    /// `score_global` is a 0–1 risk score; shown as a percentage.
    pub fn risk_percent(&self) -> Option<u8> {
        self.score_global
            .filter(|score| score.is_finite())
            .map(|score| (score.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Notification {
    pub id: Option<i64>,
    pub titre: String,
    pub message: String,
    pub niveau: Option<String>,
    pub user_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub lu: bool,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}
