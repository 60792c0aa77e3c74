// ============================================================================
// RESOURCE VIEW - Contrato único {data, loading, error} para vistas que sondean
// ============================================================================
// Efecto = (token, identificador). Cualquier cambio de los dos cancela la
// suscripción activa, vacía el snapshot y vuelve a evaluar la guarda antes de
// resuscribir. Los datos previos solo sobreviven entre ticks del mismo efecto.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::Snapshot;
use crate::services::{FeedResult, FeedSubscription, ResourceFeed, ResourceSpec};
use crate::state::{NoticeBoard, ReactiveState, Subscription};
use crate::stores::SessionStore;

pub struct ResourceView<T> {
    inner: Rc<ViewInner<T>>,
}

impl<T> Clone for ResourceView<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

struct ViewInner<T> {
    spec: ResourceSpec,
    every: Duration,
    feed: Rc<dyn ResourceFeed>,
    session: SessionStore,
    notices: RefCell<Option<NoticeBoard>>,
    identifier: RefCell<Option<String>>,
    mounted: Cell<bool>,
    /// Token and identifier the current snapshot belongs to.
    effect_token: RefCell<Option<String>>,
    effect_identifier: RefCell<Option<String>>,
    active: RefCell<Option<FeedSubscription>>,
    session_watch: RefCell<Option<Subscription>>,
    snapshot: ReactiveState<Snapshot<T>>,
}

impl<T> ResourceView<T>
where
    T: DeserializeOwned + 'static,
{
    pub fn new(spec: ResourceSpec, every: Duration, feed: Rc<dyn ResourceFeed>, session: SessionStore) -> Self {
        Self {
            inner: Rc::new(ViewInner {
                spec,
                every,
                feed,
                session,
                notices: RefCell::new(None),
                identifier: RefCell::new(None),
                mounted: Cell::new(false),
                effect_token: RefCell::new(None),
                effect_identifier: RefCell::new(None),
                active: RefCell::new(None),
                session_watch: RefCell::new(None),
                snapshot: ReactiveState::new(Snapshot::idle()),
            }),
        }
    }

    /// Failures are also posted to `notices`.
    pub fn with_notices(self, notices: NoticeBoard) -> Self {
        *self.inner.notices.borrow_mut() = Some(notices);
        self
    }

    pub fn with_identifier(self, identifier: Option<String>) -> Self {
        *self.inner.identifier.borrow_mut() = identifier;
        self
    }

    pub fn spec(&self) -> ResourceSpec {
        self.inner.spec
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Starts polling when a token (and an identifier, if the path needs one) is present.
    pub fn mount(&self) {
        if self.inner.mounted.replace(true) {
            return;
        }

        let weak: Weak<ViewInner<T>> = Rc::downgrade(&self.inner);
        let watch = self.inner.session.subscribe(move |session| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if *inner.effect_token.borrow() != session.token {
                ResourceView { inner }.rerun();
            }
        });
        *self.inner.session_watch.borrow_mut() = Some(watch);

        self.rerun();
    }

    /// Stops the interval; anything still in flight is discarded.
    pub fn unmount(&self) {
        if !self.inner.mounted.replace(false) {
            return;
        }
        let watch = self.inner.session_watch.borrow_mut().take();
        drop(watch);
        self.stop();
        self.inner.snapshot.update(|snapshot| snapshot.loading = false);
    }

    pub fn set_identifier(&self, identifier: Option<String>) {
        *self.inner.identifier.borrow_mut() = identifier;
        if self.inner.mounted.get() {
            self.rerun();
        }
    }

    pub fn identifier(&self) -> Option<String> {
        self.inner.identifier.borrow().clone()
    }

    /// Manual fetch; a no-op when the guard currently blocks polling.
    pub fn refresh(&self) {
        if let Some(active) = self.inner.active.borrow().as_ref() {
            active.refresh();
        }
    }

    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot<T>) + 'static,
    {
        self.inner.snapshot.subscribe(callback)
    }

    fn stop(&self) {
        // dropped outside the borrow: cancelling may run arbitrary cleanup
        let active = self.inner.active.borrow_mut().take();
        drop(active);
    }

    fn rerun(&self) {
        self.stop();
        let token = self.inner.session.token();
        let identifier = self.inner.identifier.borrow().clone();
        let previous_token = self.inner.effect_token.replace(token.clone());
        let previous_identifier = self.inner.effect_identifier.replace(identifier.clone());

        if previous_token != token || previous_identifier != identifier {
            // another user or another record: nothing of the old snapshot applies
            self.inner.snapshot.set(Snapshot::idle());
        }

        if !self.inner.mounted.get() || token.is_none() {
            self.settle();
            return;
        }
        let path = match self.inner.spec.path_for(identifier.as_deref()) {
            Ok(Some(path)) => path,
            Ok(None) => {
                log::debug!("⏸️ {} sin identificador, no se consulta", self.inner.spec.template);
                self.settle();
                return;
            }
            Err(e) => {
                log::warn!("⚠️ {}: {}", self.inner.spec.template, e);
                let message = e.user_message();
                self.inner.snapshot.update(move |snapshot| snapshot.fail(message));
                return;
            }
        };

        self.inner.snapshot.update(|snapshot| snapshot.loading = true);

        let weak: Weak<ViewInner<T>> = Rc::downgrade(&self.inner);
        let on_update = Rc::new(move |result: FeedResult| {
            if let Some(inner) = weak.upgrade() {
                ResourceView { inner }.apply(result);
            }
        });
        let subscription = self.inner.feed.subscribe(&path, self.inner.every, on_update);
        *self.inner.active.borrow_mut() = Some(subscription);
    }

    /// No fetch is pending any more.
    fn settle(&self) {
        let loading = self.inner.snapshot.get().loading;
        if loading {
            self.inner.snapshot.update(|snapshot| snapshot.loading = false);
        }
    }

    fn apply(&self, result: FeedResult) {
        if !self.inner.mounted.get() {
            return;
        }
        let decoded = result.and_then(|value| {
            serde_json::from_value::<T>(value).map_err(|e| ApiError::Decode(e.to_string()))
        });

        match decoded {
            Ok(data) => {
                let fetched_at = Utc::now();
                self.inner.snapshot.update(move |snapshot| snapshot.replace(data, fetched_at));
            }
            Err(e) => {
                let message = e.user_message();
                log::warn!("⚠️ {}: {}", self.inner.spec.template, e);
                let repeated = self.inner.snapshot.get().error.as_deref() == Some(message.as_str());
                if let Some(notices) = self.inner.notices.borrow().as_ref() {
                    // 401 already has its own global notice
                    if !repeated && !e.is_unauthorized() {
                        notices.error(message.clone());
                    }
                }
                self.inner.snapshot.update(move |snapshot| snapshot.fail(message));
            }
        }
    }
}

impl<T: Clone + 'static> ResourceView<T> {
    pub fn snapshot(&self) -> Snapshot<T> {
        self.inner.snapshot.snapshot()
    }
}
