use std::collections::HashMap;

use parking_lot::Mutex;

use super::RequestId;

/// Completed responses awaiting their poll, keyed by request id.
///
/// The lock here is independent from the request queue's lock so the worker
/// publishing a result never blocks a caller polling for another id, and
/// vice versa.
pub struct ResponseTable<R> {
    entries: Mutex<HashMap<RequestId, R>>,
}

impl<R> ResponseTable<R> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a finished response under `id`.
    ///
    /// Ids are never reused within a module's lifetime, so an already
    /// occupied slot is a programming error, not a runtime condition.
    pub fn publish(&self, id: RequestId, response: R) {
        let previous = self.entries.lock().insert(id, response);
        assert!(
            previous.is_none(),
            "response for request {} published twice",
            id
        );
    }

    /// Removes and returns the response for `id`, transferring ownership to
    /// the caller. `None` means the request has not finished yet, which is
    /// the expected steady state while work is outstanding, not a failure.
    pub fn poll(&self, id: RequestId) -> Option<R> {
        self.entries.lock().remove(&id)
    }

    /// Removes every response still unconsumed. Called at module teardown so
    /// results nobody polled can release their payloads.
    pub fn drain(&self) -> Vec<R> {
        self.entries.lock().drain().map(|(_, r)| r).collect()
    }
}

impl<R> Default for ResponseTable<R> {
    fn default() -> Self {
        Self::new()
    }
}
