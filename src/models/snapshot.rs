use chrono::{DateTime, Utc};

/// Client-side copy of one resource as last seen by a single view.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl<T> Snapshot<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_fetched_at: None,
        }
    }

    /// Full replacement after a successful fetch; nothing of the previous value survives.
    pub fn replace(&mut self, data: T, fetched_at: DateTime<Utc>) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        self.last_fetched_at = Some(fetched_at);
    }

    /// Failed fetch: previous data stays visible next to the message.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::idle()
    }
}
