use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::vitals::{self, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Patient {
    pub id: Option<i64>,
    pub nom: String,
    pub prenom: Option<String>,
    pub date_naissance: Option<NaiveDate>,
    pub sexe: Option<String>,
    pub age: Option<u32>,
    pub email: Option<String>,
    pub adresse: Option<String>,
    pub telephone: Option<String>,
    pub groupe_sanguin: Option<String>,
    pub allergies: Option<String>,
    pub antecedents: Option<String>,
    pub traitement: Option<String>,
    pub spo2: Option<f64>,
    pub temperature: Option<f64>,
    pub rythme_cardiaque: Option<f64>,
    #[serde(
        alias = "date_enregistrement",
        deserialize_with = "timestamp::deserialize_option",
        skip_serializing
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        match self.prenom.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(prenom) => format!("{} {}", prenom, self.nom.trim()),
            None => self.nom.trim().to_string(),
        }
    }

    /// Worst colour among the bedside vitals carried on the patient record.
    pub fn vitals_severity(&self) -> Severity {
        vitals::worst([
            self.spo2.map(vitals::spo2),
            self.rythme_cardiaque.map(vitals::heart_rate),
            self.temperature.map(vitals::temperature),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Appointment {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub medecin_id: Option<i64>,
    pub motif: String,
    pub statut: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub date_rdv: Option<DateTime<Utc>>,
    pub lieu: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_registration_date_alias() {
        let patient: Patient = serde_json::from_str(
            r#"{"id": 1, "nom": "Durand", "prenom": "Lea", "spo2": 88, "date_enregistrement": "2025-01-02T08:00:00"}"#,
        )
        .unwrap();
        assert!(patient.created_at.is_some());
        assert_eq!(patient.full_name(), "Lea Durand");
        assert_eq!(patient.vitals_severity(), Severity::Critical);
    }

    #[test]
    fn serialized_patient_omits_server_fields() {
        let patient = Patient { nom: "Martin".into(), ..Default::default() };
        let json = serde_json::to_value(&patient).unwrap();
        assert!(json.get("created_at").is_none());
        assert_eq!(json["nom"], "Martin");
    }
}
