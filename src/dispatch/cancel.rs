use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag scoped to the request currently running.
///
/// Cancellation is cooperative, not preemptive: the worker never interrupts a
/// handler that does not check the token. A handler that ignores it runs to
/// completion and reports success even though cancellation was requested.
/// Handlers are expected to poll [`is_cancelled`](Self::is_cancelled) at safe
/// points, e.g. once per generated map row or once per connection attempt.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. Idempotent; calling it again before the handler
    /// checks the flag has no additional effect.
    pub fn request_cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clears the flag. The worker loop calls this when a new request begins
    /// running; one token state is meaningful at a time because there is one
    /// worker.
    pub(crate) fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
