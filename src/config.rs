use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    BACKEND_URL, FAST_POLL_INTERVAL_MS, MAX_NOTICES, POLL_INTERVAL_MS, REQUEST_TIMEOUT_MS,
    TOKEN_STORAGE_KEY,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub token_storage_key: String,
    pub poll_interval_ms: u32,
    pub fast_poll_interval_ms: u32,
    pub max_notices: usize,
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(BACKEND_URL),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
            poll_interval_ms: POLL_INTERVAL_MS,
            fast_poll_interval_ms: FAST_POLL_INTERVAL_MS,
            max_notices: MAX_NOTICES,
            enable_logging: true,
        }
    }
}

impl ClientConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: defaults.api_base_url,
            request_timeout_ms: parse_or(
                option_env!("AETHERIS_REQUEST_TIMEOUT_MS"),
                defaults.request_timeout_ms,
            ),
            token_storage_key: option_env!("AETHERIS_TOKEN_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(|key| key.trim().to_string())
                .unwrap_or(defaults.token_storage_key),
            poll_interval_ms: parse_or(
                option_env!("AETHERIS_POLL_INTERVAL_MS"),
                defaults.poll_interval_ms,
            ),
            fast_poll_interval_ms: parse_or(
                option_env!("AETHERIS_FAST_POLL_INTERVAL_MS"),
                defaults.fast_poll_interval_ms,
            ),
            max_notices: parse_or(option_env!("AETHERIS_MAX_NOTICES"), defaults.max_notices),
            enable_logging: parse_or(
                option_env!("AETHERIS_ENABLE_LOGGING"),
                defaults.enable_logging,
            ),
        }
    }

    /// Same configuration pointed at another backend.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.request_timeout_ms))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    pub fn fast_poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.fast_poll_interval_ms))
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

/// Strips trailing slashes so paths can always be appended as `/resource`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: ClientConfig = ClientConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(normalize_base_url("http://api.local:8000/"), "http://api.local:8000");
        assert_eq!(normalize_base_url(" http://api.local// "), "http://api.local");
    }

    #[test]
    fn unparsable_values_fall_back_to_default() {
        assert_eq!(parse_or(Some("abc"), 42u32), 42);
        assert_eq!(parse_or(Some(" 7 "), 42u32), 7);
        assert!(parse_or::<bool>(None, true));
    }

    #[test]
    fn durations_follow_millisecond_fields() {
        let config = ClientConfig {
            request_timeout_ms: 1_500,
            poll_interval_ms: 15_000,
            ..ClientConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_millis(1_500));
        assert_eq!(config.poll_interval(), Duration::from_secs(15));
    }

    #[test]
    fn with_base_url_normalizes() {
        let config = ClientConfig::default().with_base_url("https://aetheris.example/");
        assert_eq!(config.api_base_url, "https://aetheris.example");
    }
}
