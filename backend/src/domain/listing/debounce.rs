//! Cancellable delayed execution.

use std::future::Future;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::trace;

/// Default quiet period before a listing fetch fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Runs the most recently scheduled task once `delay` has passed quietly.
///
/// Scheduling a new task cancels a pending one whose timer has not fired.
/// A task whose timer already fired runs to completion; callers that care
/// about ordering must discard stale results themselves. Dropping the
/// debouncer cancels the pending task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<oneshot::Sender<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `task`, replacing any task still waiting for its timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        if self.pending.replace(cancel_tx).is_some() {
            trace!("superseded pending debounced task");
        }
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel_rx => {}
                () = tokio::time::sleep(delay) => task.await,
            }
        });
    }

    /// Cancel the pending task, if its timer has not fired yet.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
