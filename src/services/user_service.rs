use super::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::Profile;

/// Staff accounts (`/users`); the signed-in profile itself comes from `AuthApi::me`.
#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Profile>, ApiError> {
        self.client.get_json("/users").await
    }

    pub async fn doctors(&self) -> Result<Vec<Profile>, ApiError> {
        self.client.get_json("/users/medecins").await
    }
}
