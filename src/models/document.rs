use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Medical document attached to a patient (`/documents/{patient_id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing)]
    pub patient_id: Option<i64>,
    pub titre: String,
    pub description: Option<String>,
    pub fichier_url: Option<String>,
    /// e.g. "radiologie", "compte-rendu"
    pub type_document: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize_option", skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

/// File picked by the user, ready to be sent as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}
