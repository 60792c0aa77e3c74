// ============================================================================
// NOTICES - Avisos descartables (toasts) con capacidad limitada
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::reactivity::{ReactiveState, Subscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded list of notices; the oldest one is dropped when full.
#[derive(Clone)]
pub struct NoticeBoard {
    inner: Rc<NoticeBoardInner>,
}

struct NoticeBoardInner {
    capacity: usize,
    next_id: Cell<u64>,
    notices: ReactiveState<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Rc::new(NoticeBoardInner {
                capacity: capacity.max(1),
                next_id: Cell::new(1),
                notices: ReactiveState::new(Vec::new()),
            }),
        }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let notice = Notice {
            id,
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        let capacity = self.inner.capacity;
        self.inner.notices.update(move |notices| {
            notices.push(notice);
            if notices.len() > capacity {
                let overflow = notices.len() - capacity;
                notices.drain(..overflow);
            }
        });
        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Warning, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Error, message)
    }

    /// Returns false when the notice was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        if !self.inner.notices.get().iter().any(|notice| notice.id == id) {
            return false;
        }
        self.inner.notices.update(move |notices| notices.retain(|notice| notice.id != id));
        true
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.inner.notices.snapshot()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Notice]) + 'static,
    {
        self.inner.notices.subscribe(move |notices: &Vec<Notice>| callback(notices))
    }
}
