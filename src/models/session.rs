use serde::{Deserialize, Serialize};

use super::auth::Profile;

/// Who is logged in. `user.is_some()` always implies `token.is_some()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<Profile>,
    pub is_loading: bool,
}

impl Session {
    /// State at application start, before the persisted token was checked.
    pub fn restoring() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn has_profile(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: false,
        }
    }
}
