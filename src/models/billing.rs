use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Invoice {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub medecin_id: Option<i64>,
    pub numero_facture: String,
    pub montant_ht: f64,
    pub taxe: Option<f64>,
    pub montant_total: f64,
    pub statut: Option<String>,
    pub methode_paiement: Option<String>,
    pub reference_paiement: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub date_emission: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub date_echeance: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub date_paiement: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Partial,
    Cancelled,
    Pending,
}

impl Invoice {
    pub fn status(&self) -> InvoiceStatus {
        match self.statut.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
            Some("payée") | Some("payee") => InvoiceStatus::Paid,
            Some("partiel") => InvoiceStatus::Partial,
            Some("annulée") | Some("annulee") => InvoiceStatus::Cancelled,
            _ => InvoiceStatus::Pending,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status() == InvoiceStatus::Pending
            && self.date_echeance.map(|due| due < now).unwrap_or(false)
    }
}
