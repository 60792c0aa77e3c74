use super::api_client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::Notification;

/// Notifications of the signed-in user.
#[derive(Clone)]
pub struct NotificationService {
    client: ApiClient,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.get_json("/notifications").await
    }

    pub async fn mark_read(&self, id: i64) -> Result<Notification, ApiError> {
        let updated: Notification = self
            .client
            .fetch_json(ApiRequest::put(format!("/notifications/{}/read", id)))
            .await?;
        log::debug!("📬 Notificación {} leída", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/notifications/{}", id)).await?;
        log::info!("🗑️ Notificación {} eliminada", id);
        Ok(())
    }
}
