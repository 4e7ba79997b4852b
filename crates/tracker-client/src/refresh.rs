//! Auto-refresh timer ownership.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Fixed auto-refresh cadence.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Owns the auto-refresh timer for a view as a spawned task. Stopping or
/// dropping the handle aborts the task, so every exit path (toggle off, tab
/// switch, teardown) releases the timer.
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Spawn a task invoking `tick` every `interval`, starting one interval
    /// from now.
    pub fn spawn<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; the first
            // refresh should not.
            timer.tick().await;
            loop {
                timer.tick().await;
                tick().await;
            }
        });
        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
