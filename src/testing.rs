// ============================================================================
// TESTING - Dobles de prueba para los cuatro puntos de inyección
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::LocalSpawnExt;

use crate::app::Navigator;
use crate::error::TransportError;
use crate::runtime::{IntervalHandle, Runtime};
use crate::services::{HttpRequest, HttpResponse, Method, Transport};

type Reply = Result<HttpResponse, TransportError>;

enum Script {
    Fixed(Reply),
    Deferred(VecDeque<oneshot::Receiver<Reply>>),
}

struct Route {
    method: Method,
    path: String,
    script: Script,
}

/// Scripted backend. Routes match on method + URL suffix, latest registration
/// first; unmatched requests get a FastAPI-style 404.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<HttpRequest>>,
}

/// Answer for one deferred request, sent whenever the test decides.
pub struct PendingReply {
    sender: oneshot::Sender<Reply>,
}

impl PendingReply {
    pub fn respond_json(self, status: u16, body: serde_json::Value) {
        let _ = self.sender.send(Ok(json_response(status, &body)));
    }
}

pub fn json_response(status: u16, body: &serde_json::Value) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.to_string().into_bytes(),
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&self, method: Method, path: &str, script: Script) {
        self.routes.borrow_mut().push(Route {
            method,
            path: path.to_string(),
            script,
        });
    }

    pub fn on_json(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.route(method, path, Script::Fixed(Ok(json_response(status, &body))));
    }

    pub fn on_response(&self, method: Method, path: &str, response: HttpResponse) {
        self.route(method, path, Script::Fixed(Ok(response)));
    }

    pub fn fail(&self, method: Method, path: &str, error: TransportError) {
        self.route(method, path, Script::Fixed(Err(error)));
    }

    /// The next matching request waits until the returned reply is sent.
    pub fn defer(&self, method: Method, path: &str) -> PendingReply {
        let (sender, receiver) = oneshot::channel();
        let mut routes = self.routes.borrow_mut();
        let queue = routes.iter_mut().rev().find_map(|route| {
            if route.method != method || route.path != path {
                return None;
            }
            match &mut route.script {
                Script::Deferred(queue) => Some(queue),
                Script::Fixed(_) => None,
            }
        });
        if let Some(queue) = queue {
            queue.push_back(receiver);
        } else {
            routes.push(Route {
                method,
                path: path.to_string(),
                script: Script::Deferred(VecDeque::from([receiver])),
            });
        }
        PendingReply { sender }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.url.ends_with(path))
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    fn next_reply(&self, request: &HttpRequest) -> Result<Reply, oneshot::Receiver<Reply>> {
        let mut routes = self.routes.borrow_mut();
        for route in routes.iter_mut().rev() {
            if route.method != request.method || !request.url.ends_with(&route.path) {
                continue;
            }
            match &mut route.script {
                Script::Fixed(reply) => return Ok(reply.clone()),
                Script::Deferred(queue) => {
                    if let Some(receiver) = queue.pop_front() {
                        return Err(receiver);
                    }
                }
            }
        }
        Ok(Ok(json_response(404, &serde_json::json!({"detail": "Not Found"}))))
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        let reply = self.next_reply(&request);
        self.requests.borrow_mut().push(request);
        async move {
            match reply {
                Ok(reply) => reply,
                Err(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".to_string()))),
            }
        }
        .boxed_local()
    }
}

struct Timer {
    id: u64,
    every: Duration,
    next_due: Duration,
    tick: Rc<RefCell<Box<dyn FnMut()>>>,
}

/// Single-threaded executor with a virtual clock. Nothing runs until the test
/// calls `run_until_stalled` or `advance`.
pub struct ManualRuntime {
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    now: Cell<Duration>,
    next_timer: Cell<u64>,
    timers: Rc<RefCell<Vec<Timer>>>,
}

impl ManualRuntime {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: RefCell::new(pool),
            spawner,
            now: Cell::new(Duration::ZERO),
            next_timer: Cell::new(0),
            timers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn active_intervals(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Moves the clock forward, firing due intervals in order and draining
    /// spawned work after each tick.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        self.run_until_stalled();
        loop {
            let due = {
                let mut timers = self.timers.borrow_mut();
                let next = timers
                    .iter_mut()
                    .filter(|timer| timer.next_due <= target)
                    .min_by_key(|timer| (timer.next_due, timer.id));
                next.map(|timer| {
                    let at = timer.next_due;
                    timer.next_due += timer.every;
                    (at, timer.tick.clone())
                })
            };
            let Some((at, tick)) = due else {
                break;
            };
            self.now.set(at);
            (tick.borrow_mut())();
            self.run_until_stalled();
        }
        self.now.set(target);
        self.run_until_stalled();
    }
}

impl Default for ManualRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime for ManualRuntime {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(future) {
            panic!("manual runtime is shut down: {:?}", e);
        }
    }

    fn interval(&self, every: Duration, tick: Box<dyn FnMut()>) -> IntervalHandle {
        let every = every.max(Duration::from_millis(1));
        let id = self.next_timer.get();
        self.next_timer.set(id + 1);
        self.timers.borrow_mut().push(Timer {
            id,
            every,
            next_due: self.now.get() + every,
            tick: Rc::new(RefCell::new(tick)),
        });

        let timers: Weak<RefCell<Vec<Timer>>> = Rc::downgrade(&self.timers);
        IntervalHandle::new(move || {
            if let Some(timers) = timers.upgrade() {
                // the tick closure may be running; drop it outside the borrow
                let removed: Vec<Timer> = {
                    let mut timers = timers.borrow_mut();
                    let (gone, kept): (Vec<Timer>, Vec<Timer>) = timers.drain(..).partition(|timer| timer.id == id);
                    *timers = kept;
                    gone
                };
                drop(removed);
            }
        })
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.visits.borrow_mut().push(route.to_string());
    }
}
