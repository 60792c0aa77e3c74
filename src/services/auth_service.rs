// ============================================================================
// AUTH SERVICE - Endpoints /auth (login, perfil, registro)
// ============================================================================

use super::api_client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, Profile, RegisterRequest};

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/login-json`; a blank `access_token` is [`ApiError::MissingToken`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 Login para {}", request.email);

        let response: LoginResponse = self.client.post_json("/auth/login-json", &request).await?;
        match response.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(response),
            _ => Err(ApiError::MissingToken),
        }
    }

    pub async fn me(&self) -> Result<Profile, ApiError> {
        self.client.get_json("/auth/me").await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Profile, ApiError> {
        log::info!("📝 Registro de {}", request.email);
        self.client.post_json("/auth/register", request).await
    }
}
