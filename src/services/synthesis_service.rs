use super::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::AiSynthesis;

#[derive(Clone)]
pub struct SynthesisService {
    client: ApiClient,
}

impl SynthesisService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<AiSynthesis>, ApiError> {
        self.client.get_json("/synthese-ia").await
    }

    pub async fn by_patient(&self, patient_id: i64) -> Result<AiSynthesis, ApiError> {
        self.client.get_json(&format!("/synthese-ia/{}", patient_id)).await
    }

    pub async fn create(&self, patient_id: i64, synthesis: &AiSynthesis) -> Result<AiSynthesis, ApiError> {
        let created: AiSynthesis = self
            .client
            .post_json(&format!("/synthese-ia/{}", patient_id), synthesis)
            .await?;
        log::info!("🧾 Síntesis IA {:?} creada para paciente {}", created.id, patient_id);
        Ok(created)
    }
}
