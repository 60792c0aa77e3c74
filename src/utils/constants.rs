/// URL base del API
/// Fixed at compile time through `AETHERIS_API_URL` (see build.rs), local backend otherwise.
pub const BACKEND_URL: &str = match option_env!("AETHERIS_API_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:8000",
};

/// localStorage key holding the raw bearer token
pub const TOKEN_STORAGE_KEY: &str = "token";

pub const REQUEST_TIMEOUT_MS: u32 = 60_000;
pub const POLL_INTERVAL_MS: u32 = 15_000;
pub const FAST_POLL_INTERVAL_MS: u32 = 10_000;
pub const MAX_NOTICES: usize = 5;

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const FORBIDDEN_ROUTE: &str = "/403";

/// DOM event dispatched on `window` when the session is dropped by the server
pub const UNAUTHORIZED_EVENT: &str = "auth:unauthorized";
