use std::time::Duration;

use thiserror::Error;

/// Failure produced by a [`Transport`](crate::services::transport::Transport)
/// before any HTTP status is known.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("durable storage is not available")]
    Unavailable,
    #[error("storage error: {0}")]
    Backend(String),
}

/// Everything a request through [`ApiClient`](crate::services::ApiClient) can end in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The server rejected the bearer token (HTTP 401).
    #[error("session expired or credentials rejected")]
    Unauthorized,
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx answer other than 401; `message` is the server's explanation when it gave one.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("parse error: {0}")]
    Decode(String),
    #[error("serialization error: {0}")]
    Encode(String),
    #[error("login response carried no access token")]
    MissingToken,
    /// Identifier that would change the path it is substituted into.
    #[error("invalid resource identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl ApiError {
    /// HTTP status of the failure, `None` for transport-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Timeout(_) | ApiError::Network(_))
    }

    /// Text shown to the user in a notice or inline error.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            ApiError::Timeout(_) => "The server took too long to answer".to_string(),
            ApiError::Network(_) => "Unable to reach the server".to_string(),
            ApiError::Http { status, message } if message.is_empty() => {
                format!("Request failed (HTTP {})", status)
            }
            ApiError::Http { message, .. } => message.clone(),
            ApiError::Decode(_) => "Unexpected response from the server".to_string(),
            ApiError::Encode(_) => "Unable to prepare the request".to_string(),
            ApiError::MissingToken => "Login failed: no access token received".to_string(),
            ApiError::InvalidIdentifier(_) => "Invalid record reference".to_string(),
        }
    }

    pub(crate) fn from_transport(error: TransportError, timeout: Duration) -> Self {
        match error {
            TransportError::Timeout => ApiError::Timeout(timeout),
            TransportError::Network(message) => ApiError::Network(message),
        }
    }
}

/// Extracts the server explanation from an error body.
///
/// FastAPI answers `{"detail": "..."}` for business errors and
/// `{"detail": [{"msg": "..."}, ...]}` for validation errors.
pub fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let detail = value.get("detail").or_else(|| value.get("message"))?;

    match detail {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used_verbatim() {
        let body = br#"{"detail": "Email deja utilise"}"#;
        assert_eq!(server_message(body).as_deref(), Some("Email deja utilise"));
    }

    #[test]
    fn validation_errors_are_joined() {
        let body = br#"{"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "password"], "msg": "field required", "type": "value_error.missing"}
        ]}"#;
        assert_eq!(
            server_message(body).as_deref(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn non_json_bodies_have_no_message() {
        assert_eq!(server_message(b"<html>502 Bad Gateway</html>"), None);
        assert_eq!(server_message(br#"{"detail": ""}"#), None);
    }

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Http { status: 400, message: "Montant invalide".into() };
        assert_eq!(err.user_message(), "Montant invalide");

        let err = ApiError::Http { status: 503, message: String::new() };
        assert_eq!(err.user_message(), "Request failed (HTTP 503)");
    }

    #[test]
    fn transport_failures_have_no_status() {
        assert_eq!(ApiError::Network("refused".into()).status(), None);
        assert_eq!(ApiError::Timeout(Duration::from_secs(1)).status(), None);
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert!(ApiError::Timeout(Duration::from_secs(1)).is_transport());
    }
}
