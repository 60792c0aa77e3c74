use super::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::Patient;

/// CRUD over `/patients`.
#[derive(Clone)]
pub struct PatientService {
    client: ApiClient,
}

impl PatientService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Patient>, ApiError> {
        self.client.get_json("/patients").await
    }

    pub async fn detail(&self, id: i64) -> Result<Patient, ApiError> {
        self.client.get_json(&format!("/patients/{}", id)).await
    }

    pub async fn create(&self, patient: &Patient) -> Result<Patient, ApiError> {
        let created: Patient = self.client.post_json("/patients", patient).await?;
        log::info!("✅ Paciente creado: {:?}", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, patient: &Patient) -> Result<Patient, ApiError> {
        self.client.put_json(&format!("/patients/{}", id), patient).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/patients/{}", id)).await?;
        log::info!("🗑️ Paciente {} eliminado", id);
        Ok(())
    }
}
