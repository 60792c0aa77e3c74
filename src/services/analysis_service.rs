use super::api_client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{AiAnalysis, ServerMessage};

/// Stored AI analyses, per patient.
#[derive(Clone)]
pub struct AnalysisService {
    client: ApiClient,
}

impl AnalysisService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, patient_id: i64, analysis: &AiAnalysis) -> Result<AiAnalysis, ApiError> {
        let created: AiAnalysis = self
            .client
            .post_json(&format!("/analyse-ia/{}", patient_id), analysis)
            .await?;
        log::info!("🧠 Análisis IA {:?} registrado para paciente {}", created.id, patient_id);
        Ok(created)
    }

    pub async fn latest(&self, patient_id: i64) -> Result<AiAnalysis, ApiError> {
        self.client.get_json(&format!("/analyse-ia/{}/latest", patient_id)).await
    }

    /// Newest first, as the server orders them.
    pub async fn history(&self, patient_id: i64) -> Result<Vec<AiAnalysis>, ApiError> {
        self.client.get_json(&format!("/analyse-ia/{}", patient_id)).await
    }

    pub async fn delete(&self, analysis_id: i64) -> Result<ServerMessage, ApiError> {
        let response = self.client.send(ApiRequest::delete(format!("/analyse-ia/{}", analysis_id))).await?;
        log::info!("🗑️ Análisis IA {} eliminado", analysis_id);
        // an empty or unexpected body still means the delete went through
        Ok(serde_json::from_slice(&response.body).unwrap_or_default())
    }
}
