// ============================================================================
// FEED - Suscripción a un recurso: fetch inmediato + uno por intervalo
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;

use super::api_client::ApiClient;
use crate::error::ApiError;
use crate::runtime::{IntervalHandle, Runtime};
use crate::state::Subscription;

pub type FeedResult = Result<serde_json::Value, ApiError>;
pub type UpdateFn = Rc<dyn Fn(FeedResult)>;

/// Live subscription to one resource. Dropping it (or `cancel`) unsubscribes;
/// results still in flight are discarded.
#[must_use = "dropping a FeedSubscription unsubscribes immediately"]
pub struct FeedSubscription {
    refresh: Rc<dyn Fn()>,
    _subscription: Subscription,
}

impl FeedSubscription {
    pub fn new(subscription: Subscription, refresh: impl Fn() + 'static) -> Self {
        Self {
            refresh: Rc::new(refresh),
            _subscription: subscription,
        }
    }

    /// Out-of-band fetch; its result goes through the same ordering guard.
    pub fn refresh(&self) {
        (self.refresh)();
    }

    pub fn cancel(self) {}
}

/// Source of periodic resource updates. Polling today; a push channel could
/// implement the same contract.
pub trait ResourceFeed {
    fn subscribe(&self, path: &str, every: Duration, on_update: UpdateFn) -> FeedSubscription;
}

#[derive(Clone)]
pub struct PollingFeed {
    client: ApiClient,
    runtime: Rc<dyn Runtime>,
}

struct PollState {
    path: String,
    client: ApiClient,
    runtime: Rc<dyn Runtime>,
    on_update: UpdateFn,
    issued: Cell<u64>,
    applied: Cell<u64>,
    closed: Cell<bool>,
}

impl PollState {
    fn poll(self: &Rc<Self>) {
        if self.closed.get() {
            return;
        }
        let seq = self.issued.get() + 1;
        self.issued.set(seq);

        let state = Rc::clone(self);
        self.runtime.spawn(
            async move {
                let result = state.client.get_value(&state.path).await;
                if state.closed.get() {
                    log::debug!("🔕 {} respondió tras cancelar, descartado", state.path);
                    return;
                }
                if seq <= state.applied.get() {
                    log::debug!("⏭️ {} #{} llegó tarde, descartado", state.path, seq);
                    return;
                }
                state.applied.set(seq);
                (state.on_update)(result);
            }
            .boxed_local(),
        );
    }
}

impl PollingFeed {
    pub fn new(client: ApiClient, runtime: Rc<dyn Runtime>) -> Self {
        Self { client, runtime }
    }
}

impl ResourceFeed for PollingFeed {
    fn subscribe(&self, path: &str, every: Duration, on_update: UpdateFn) -> FeedSubscription {
        let state = Rc::new(PollState {
            path: path.to_string(),
            client: self.client.clone(),
            runtime: self.runtime.clone(),
            on_update,
            issued: Cell::new(0),
            applied: Cell::new(0),
            closed: Cell::new(false),
        });

        log::info!("🔄 Polling {} cada {:?}", path, every);
        state.poll();

        let interval: IntervalHandle = {
            let state = state.clone();
            self.runtime.interval(every, Box::new(move || state.poll()))
        };

        let refresh = {
            let state = state.clone();
            move || state.poll()
        };
        let subscription = Subscription::new(move || {
            state.closed.set(true);
            drop(interval);
            log::info!("⏹️ Polling {} detenido", state.path);
        });
        FeedSubscription::new(subscription, refresh)
    }
}
