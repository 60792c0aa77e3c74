use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Stored AI analysis of one patient (`/analyse-ia`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AiAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    pub diagnostic: String,
    pub prediction: Option<String>,
    pub plan: Option<String>,
    pub recommendation: Option<String>,
    pub resume: Option<String>,
    pub observations: Option<String>,
    pub parametres_vitaux: Option<serde_json::Value>,
    /// 0–100
    pub score_gravite: Option<f64>,
    pub niveau_gravite: Option<String>,
    pub fiabilite_ia: Option<f64>,
    pub type_analyse: Option<String>,
    pub commentaire_medecin: Option<String>,
    #[serde(skip_serializing)]
    pub disclaimer: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option", skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AiAnalysis {
    /// `niveau_gravite` is one of Vert / Jaune / Orange / Rouge.
    pub fn is_critical(&self) -> bool {
        matches!(
            self.niveau_gravite.as_deref().map(|level| level.trim().to_lowercase()).as_deref(),
            Some("rouge") | Some("red")
        ) || self.score_gravite.map(|score| score >= 80.0).unwrap_or(false)
    }
}

/// `{"message": "..."}` answer of the delete routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerMessage {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_level_or_high_score_is_critical() {
        let analysis: AiAnalysis = serde_json::from_str(
            r#"{"id": 4, "patient_id": 2, "diagnostic": "Sepsis probable", "niveau_gravite": "Rouge"}"#,
        )
        .unwrap();
        assert!(analysis.is_critical());

        let analysis = AiAnalysis { score_gravite: Some(35.0), ..Default::default() };
        assert!(!analysis.is_critical());
    }

    #[test]
    fn new_analysis_omits_server_fields() {
        let draft = AiAnalysis { diagnostic: "RAS".into(), ..Default::default() };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["diagnostic"], "RAS");
    }
}
