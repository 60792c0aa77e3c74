use super::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::Appointment;

/// `/rendezvous` (the collection routes keep their trailing slash).
#[derive(Clone)]
pub struct AppointmentService {
    client: ApiClient,
}

impl AppointmentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Appointment>, ApiError> {
        self.client.get_json("/rendezvous/").await
    }

    pub async fn create(&self, appointment: &Appointment) -> Result<Appointment, ApiError> {
        let created: Appointment = self.client.post_json("/rendezvous/", appointment).await?;
        log::info!("📅 Cita creada: {:?}", created.id);
        Ok(created)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/rendezvous/{}", id)).await?;
        log::info!("🗑️ Cita {} eliminada", id);
        Ok(())
    }
}
