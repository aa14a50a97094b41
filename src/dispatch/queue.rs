use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// What a blocked [`RequestQueue::pop`] wakes up to.
#[derive(Debug, PartialEq, Eq)]
pub enum Popped<T> {
    Request(T),
    Shutdown,
}

struct QueueState<T> {
    items: VecDeque<T>,
    shutdown: bool,
}

/// Thread-safe FIFO buffer of pending requests between the caller thread and
/// the worker thread.
///
/// Capacity is unbounded: back-pressure is intentionally not applied. With a
/// single caller/worker pair and per-frame request rates, a caller that
/// enqueues faster than the worker drains accumulates memory, which is an
/// accepted tradeoff.
pub struct RequestQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
}

impl<T> RequestQueue<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends to the tail and wakes a blocked worker if there is one.
    /// Never blocks the caller.
    pub fn push(&self, item: T) {
        let mut state = self.state.lock();
        state.items.push_back(item);
        self.available.notify_one();
    }

    /// Blocks until an item is available or the shutdown signal is raised.
    ///
    /// Shutdown takes precedence over queued items: requests still pending at
    /// shutdown are never handed to the worker, they are reclaimed through
    /// [`drain`](Self::drain) instead.
    pub fn pop(&self) -> Popped<T> {
        let mut state = self.state.lock();
        loop {
            if state.shutdown {
                return Popped::Shutdown;
            }
            if let Some(item) = state.items.pop_front() {
                return Popped::Request(item);
            }
            self.available.wait(&mut state);
        }
    }

    /// Raises the shutdown signal and wakes a blocked pop.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.shutdown = true;
        self.available.notify_all();
    }

    /// Removes and returns everything still queued, in FIFO order. Called
    /// after shutdown so discarded requests can release their payloads.
    pub fn drain(&self) -> Vec<T> {
        let mut state = self.state.lock();
        state.items.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }
}

impl<T> Default for RequestQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
