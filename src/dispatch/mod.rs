//! Asynchronous module dispatcher
//!
//! Lets a latency-sensitive caller thread (the render/UI loop) hand stateful,
//! long-running operations to a dedicated worker thread without ever blocking,
//! with cooperative cancellation and exactly-once delivery of typed results.
//!
//! # Architecture
//!
//! - **Caller side**: `enqueue` constructs a typed request, allocates a
//!   [`RequestId`] and pushes it onto the request queue; `poll` checks the
//!   response table for a finished result. Both are non-blocking and designed
//!   to be called once per frame tick.
//! - **Worker side**: exactly one thread per module instance drains the queue
//!   in FIFO order and runs one handler invocation at a time to completion.
//!   Handler-owned state (map tiles, session RNG, live connections) is moved
//!   into the thread at start, so the caller cannot touch it at all.
//!
//! Multiple module instances (game logic, networking) each get their own
//! worker thread and are mutually concurrent.

pub mod cancel;
pub mod id;
pub mod module;
pub mod queue;
pub mod table;

pub use cancel::CancelToken;
pub use id::{IdAllocator, RequestId};
pub use module::{Dispatcher, ModuleWorker};
pub use queue::{Popped, RequestQueue};
pub use table::ResponseTable;

/// Outcome of one handler invocation.
///
/// "Not finished yet" is not part of this type: polling a request that has
/// not completed returns `None` instead, which is the expected steady state
/// while work is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult<T> {
    /// The handler ran to completion.
    Success(T),
    /// The handler observed a cancellation request and unwound early.
    Aborted,
    /// The handler detected a failure; the message is a diagnostic for the
    /// caller, not for retrying. The dispatcher never retries on its own.
    Error(String),
}

impl<T> TaskResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskResult::Success(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, TaskResult::Aborted)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TaskResult::Error(_))
    }

    /// Consumes the result, returning the success payload if there is one.
    pub fn success(self) -> Option<T> {
        match self {
            TaskResult::Success(value) => Some(value),
            _ => None,
        }
    }
}
