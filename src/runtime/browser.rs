use std::time::Duration;

use futures::future::LocalBoxFuture;
use gloo_timers::callback::Interval;

use super::{interval_millis, IntervalHandle, Runtime};

/// `spawn_local` + `setInterval` of the page's event loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    fn spawn(&self, future: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(future);
    }

    fn interval(&self, every: Duration, mut tick: Box<dyn FnMut()>) -> IntervalHandle {
        let interval = Interval::new(interval_millis(every), move || tick());
        // gloo clears the JS interval when `Interval` is dropped
        IntervalHandle::new(move || drop(interval))
    }
}
