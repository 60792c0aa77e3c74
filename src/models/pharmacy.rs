use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

const DEFAULT_ALERT_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Medication {
    pub id: Option<i64>,
    pub nom: String,
    pub forme: String,
    pub dosage: Option<String>,
    pub quantite: Option<i64>,
    pub seuil_alerte: Option<i64>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub date_peremption: Option<DateTime<Utc>>,
    pub lot: Option<String>,
    pub fournisseur: Option<String>,
    pub prix_achat: Option<f64>,
    pub prix_vente: Option<f64>,
}

impl Medication {
    /// Same rule as `GET /pharmacie/alertes`: stock at or under the alert threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantite.unwrap_or(0) <= self.seuil_alerte.unwrap_or(DEFAULT_ALERT_THRESHOLD)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.date_peremption.map(|date| date <= now).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_uses_backend_default_threshold() {
        let med = Medication { quantite: Some(10), ..Default::default() };
        assert!(med.is_low_stock());
        let med = Medication { quantite: Some(11), ..Default::default() };
        assert!(!med.is_low_stock());
        let med = Medication { quantite: Some(3), seuil_alerte: Some(2), ..Default::default() };
        assert!(!med.is_low_stock());
    }
}
