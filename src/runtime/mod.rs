// ============================================================================
// RUNTIME - Tareas locales + intervalos (event loop de un solo hilo)
// ============================================================================

use std::time::Duration;

use futures::future::LocalBoxFuture;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserRuntime;

/// Scheduling seam: everything that polls goes through here so it can be
/// driven by a virtual clock outside the browser.
pub trait Runtime {
    /// Runs a future to completion on the local event loop.
    fn spawn(&self, future: LocalBoxFuture<'static, ()>);

    /// Calls `tick` every `every` until the returned handle is dropped.
    /// The first tick happens one period after the call.
    fn interval(&self, every: Duration, tick: Box<dyn FnMut()>) -> IntervalHandle;
}

/// Owns a running interval; dropping it stops the timer.
#[must_use = "dropping an IntervalHandle stops the interval"]
pub struct IntervalHandle {
    stop: Option<Box<dyn FnOnce()>>,
}

impl IntervalHandle {
    pub fn new(stop: impl FnOnce() + 'static) -> Self {
        Self {
            stop: Some(Box::new(stop)),
        }
    }

    pub fn cancel(mut self) {
        self.stop_now();
    }

    fn stop_now(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        self.stop_now();
    }
}

/// Browser timers take whole milliseconds in a `u32`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn interval_millis(every: Duration) -> u32 {
    u32::try_from(every.as_millis()).unwrap_or(u32::MAX).max(1)
}
