// ============================================================================
// API CLIENT - Cliente HTTP único (cabeceras por defecto + interceptores)
// ============================================================================
// Solo comunicación HTTP: la sesión escucha `on_auth_failure` y es la única
// que escribe el token (`set_bearer`).
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::ClientConfig;
use crate::error::{server_message, ApiError};
use crate::state::{Signal, Subscription};

const AUTHORIZATION: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

/// A 401 answer, with the token the rejected request carried.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthFailure {
    pub token: Option<String>,
}

/// One call through [`ApiClient::send`]; headers set here win over the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Raw body; pair it with a matching `Content-Type` header.
    pub fn body(mut self, bytes: Vec<u8>) -> Self {
        self.body = Some(bytes);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    timeout: Duration,
    transport: Rc<dyn Transport>,
    default_headers: RefCell<Vec<(String, String)>>,
    auth_failures: Signal<AuthFailure>,
}

/// Defaults first, then per-request headers replacing same-named ones.
fn merge_headers(defaults: &[(String, String)], overrides: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = defaults.to_vec();
    for (name, value) in overrides {
        merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        merged.push((name.clone(), value.clone()));
    }
    merged
}

fn bearer_of(headers: &[(String, String)]) -> Option<String> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(AUTHORIZATION))
        .and_then(|(_, value)| value.strip_prefix(BEARER_PREFIX))
        .map(str::to_string)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    // 204 / empty bodies decode as JSON null so `()` and `Option<_>` work
    let body: &[u8] = if body.is_empty() { b"null" } else { body };
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

impl ApiClient {
    pub fn new(config: &ClientConfig, transport: Rc<dyn Transport>) -> Self {
        Self {
            inner: Rc::new(ApiClientInner {
                base_url: crate::config::normalize_base_url(&config.api_base_url),
                timeout: config.request_timeout(),
                transport,
                default_headers: RefCell::new(vec![
                    ("Content-Type".to_string(), "application/json".to_string()),
                    ("Accept".to_string(), "application/json".to_string()),
                ]),
                auth_failures: Signal::new(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.inner.base_url, path)
        } else {
            format!("{}/{}", self.inner.base_url, path)
        }
    }

    /// Default `Authorization` header. Only the session store calls this.
    pub(crate) fn set_bearer(&self, token: Option<&str>) {
        let mut headers = self.inner.default_headers.borrow_mut();
        headers.retain(|(name, _)| !name.eq_ignore_ascii_case(AUTHORIZATION));
        if let Some(token) = token {
            headers.push((AUTHORIZATION.to_string(), format!("{}{}", BEARER_PREFIX, token)));
        }
    }

    pub fn bearer(&self) -> Option<String> {
        bearer_of(&self.inner.default_headers.borrow())
    }

    pub fn default_headers(&self) -> Vec<(String, String)> {
        self.inner.default_headers.borrow().clone()
    }

    pub fn on_auth_failure<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthFailure) + 'static,
    {
        self.inner.auth_failures.subscribe(callback)
    }

    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let headers = merge_headers(&self.inner.default_headers.borrow(), &request.headers);
        let sent_token = bearer_of(&headers);
        let url = self.url(&request.path);
        let method = request.method;

        let outgoing = HttpRequest {
            method,
            url: url.clone(),
            headers,
            body: request.body,
            timeout: self.inner.timeout,
        };

        let response = match self.inner.transport.send(outgoing).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("📡 {} {} sin respuesta: {}", method, url, e);
                return Err(ApiError::from_transport(e, self.inner.timeout));
            }
        };

        if response.status == 401 {
            log::warn!("🔒 {} {} → 401, sesión rechazada", method, url);
            self.inner.auth_failures.emit(&AuthFailure { token: sent_token });
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            let message = server_message(&response.body).unwrap_or_default();
            if response.status >= 500 {
                log::error!("❌ {} {} → HTTP {} {}", method, url, response.status, message);
            } else {
                log::info!("⚠️ {} {} → HTTP {} {}", method, url, response.status, message);
            }
            return Err(ApiError::Http { status: response.status, message });
        }

        log::debug!("✅ {} {} → {}", method, url, response.status);
        Ok(response)
    }

    /// Any prepared request whose answer is JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        decode(&response.body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch_json(ApiRequest::get(path)).await
    }

    /// Untyped body, for callers that decode later (the polling feed).
    pub async fn get_value(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        self.get_json(path).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch_json(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch_json(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(path)).await.map(|_| ())
    }

    /// Opaque bytes (PDF exports); status and headers are kept for the caller.
    pub async fn get_bytes(&self, path: &str) -> Result<HttpResponse, ApiError> {
        self.send(ApiRequest::get(path).header("Accept", "*/*")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn request_headers_override_defaults_case_insensitively() {
        let defaults = pairs(&[("Content-Type", "application/json"), ("Authorization", "Bearer a")]);
        let merged = merge_headers(&defaults, &pairs(&[("authorization", "Bearer b")]));
        assert_eq!(merged.len(), 2);
        assert_eq!(bearer_of(&merged).as_deref(), Some("b"));
    }

    #[test]
    fn empty_body_decodes_as_null() {
        decode::<()>(b"").unwrap();
        let missing: Option<u32> = decode(b"").unwrap();
        assert_eq!(missing, None);
        assert!(matches!(decode::<u32>(b"{"), Err(ApiError::Decode(_))));
    }
}
