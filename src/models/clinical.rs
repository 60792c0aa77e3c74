// ============================================================================
// LECTURAS CLÍNICAS - `/{department}/{patient_id}/latest`
// ============================================================================
// Every field is optional on the wire; the serde attributes are the single
// defaulting step (aliases cover the older field names some screens read).
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::vitals::{self, Severity};

/// Fields every department reading shares.
pub trait ClinicalReading {
    fn alert(&self) -> Option<&str>;
    fn anomalies(&self) -> Option<&str>;
    fn recorded_at(&self) -> Option<DateTime<Utc>>;

    /// Worst severity among the values this department colour-codes.
    fn severity(&self) -> Severity {
        Severity::Normal
    }
}

macro_rules! clinical_reading {
    ($ty:ty, |$reading:ident| $severity:expr) => {
        impl ClinicalReading for $ty {
            fn alert(&self) -> Option<&str> {
                self.alert.as_deref().filter(|text| !text.trim().is_empty())
            }

            fn anomalies(&self) -> Option<&str> {
                self.anomalies.as_deref().filter(|text| !text.trim().is_empty())
            }

            fn recorded_at(&self) -> Option<DateTime<Utc>> {
                self.created_at
            }

            fn severity(&self) -> Severity {
                let $reading = self;
                $severity
            }
        }
    };
    ($ty:ty) => {
        clinical_reading!($ty, |_reading| Severity::Normal);
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CardiacReading {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    #[serde(rename = "frequence_cardiaque", alias = "rythme_cardiaque")]
    pub heart_rate: Option<f64>,
    #[serde(rename = "rythme")]
    pub rhythm: Option<String>,
    #[serde(rename = "tension_systolique")]
    pub systolic: Option<f64>,
    #[serde(rename = "tension_diastolique")]
    pub diastolic: Option<f64>,
    #[serde(rename = "anomalies_detectees")]
    pub anomalies: Option<String>,
    #[serde(rename = "alerte")]
    pub alert: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

clinical_reading!(CardiacReading, |r| vitals::worst([
    r.heart_rate.map(vitals::heart_rate),
]));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PulmonaryReading {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub spo2: Option<f64>,
    #[serde(rename = "frequence_respiratoire", alias = "respiration_rate")]
    pub respiratory_rate: Option<f64>,
    #[serde(rename = "volume_expiratoire")]
    pub expiratory_volume: Option<f64>,
    #[serde(rename = "anomalies_detectees")]
    pub anomalies: Option<String>,
    #[serde(rename = "alerte")]
    pub alert: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

clinical_reading!(PulmonaryReading, |r| vitals::worst([r.spo2.map(vitals::spo2)]));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenalReading {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub creatinine: Option<f64>,
    #[serde(rename = "dfg", alias = "filtration_glomerulaire")]
    pub gfr: Option<f64>,
    #[serde(rename = "uree")]
    pub urea: Option<f64>,
    #[serde(rename = "anomalies_detectees")]
    pub anomalies: Option<String>,
    #[serde(rename = "alerte")]
    pub alert: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

clinical_reading!(RenalReading, |r| vitals::worst([
    r.gfr.map(vitals::glomerular_filtration),
    r.creatinine.map(vitals::creatinine),
]));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetabolicReading {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub glucose: Option<f64>,
    #[serde(rename = "insuline")]
    pub insulin: Option<f64>,
    pub cholesterol: Option<f64>,
    #[serde(rename = "anomalies_detectees")]
    pub anomalies: Option<String>,
    #[serde(rename = "alerte")]
    pub alert: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

clinical_reading!(MetabolicReading);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NeurologicalReading {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    pub eeg: Option<f64>,
    pub stress_level: Option<f64>,
    pub concentration: Option<f64>,
    #[serde(rename = "reponse_reflexe")]
    pub reflex_response_ms: Option<f64>,
    #[serde(rename = "anomalies_detectees")]
    pub anomalies: Option<String>,
    #[serde(rename = "alerte")]
    pub alert: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

clinical_reading!(NeurologicalReading);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DigestiveReading {
    pub id: Option<i64>,
    pub patient_id: Option<i64>,
    #[serde(rename = "acidite")]
    pub acidity: Option<f64>,
    #[serde(rename = "motricite")]
    pub motility: Option<f64>,
    pub inflammation: Option<String>,
    #[serde(rename = "anomalies_detectees")]
    pub anomalies: Option<String>,
    #[serde(rename = "alerte")]
    pub alert: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

clinical_reading!(DigestiveReading);
