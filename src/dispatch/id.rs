use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

/// Correlation key between a request and its eventual response.
///
/// Ids are strictly increasing per module instance, start at 1 and are never
/// reused within the module's lifetime. There is no zero id; "no request" is
/// simply `Option::<RequestId>::None` on the caller's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(NonZeroU64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues unique, monotonically increasing request identifiers.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> RequestId {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        // Starts at 1 and a u64 counter cannot wrap within a process lifetime.
        RequestId(NonZeroU64::new(raw).expect("request id counter wrapped"))
    }

    /// Whether `id` has been handed out by this allocator. Used to fail fast
    /// on polls for ids that belong to a different module instance.
    pub fn was_issued(&self, id: RequestId) -> bool {
        id.get() < self.next.load(Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
