//! Cancellable timers on top of `gloo-timers`.

use gloo_timers::callback::{Interval, Timeout};

/// A callback fired every `period_ms` until stopped.
///
/// Dropping the task cancels the underlying interval, so whoever owns the
/// task owns its lifetime.
pub struct RepeatingTask {
    interval: Option<Interval>,
}

impl RepeatingTask {
    pub fn start(period_ms: u32, callback: impl FnMut() + 'static) -> Self {
        Self {
            interval: Some(Interval::new(period_ms, callback)),
        }
    }

    /// Cancel the interval. Calling it again does nothing.
    fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `callback` once after `delay_ms`, detached from any owner.
pub fn run_after(delay_ms: u32, callback: impl FnOnce() + 'static) {
    Timeout::new(delay_ms, callback).forget();
}
