use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use super::queue::Popped;
use super::{CancelToken, IdAllocator, RequestId, RequestQueue, ResponseTable};

/// A domain worker plugged into a [`Dispatcher`].
///
/// The worker value owns all state its handler mutates (map tiles, session
/// RNG, live connections) and is moved into the worker thread at start, so
/// the caller thread cannot reach that state at all; results cross back to
/// the caller only as response payloads.
pub trait ModuleWorker: Send + 'static {
    type Request: Send + 'static;
    type Response: Send + 'static;

    /// Handles one request to completion. Invoked exactly once per request,
    /// one invocation at a time. The handler must catch its own internal
    /// faults and report them in the response; the dispatcher never retries.
    ///
    /// `cancel` is the cooperative cancellation token for this invocation.
    /// Checking it is voluntary; a handler that ignores it simply runs to
    /// completion.
    fn process(&mut self, request: Self::Request, cancel: &CancelToken) -> Self::Response;

    /// Releases a request that will never reach [`process`](Self::process)
    /// because the module shut down while it was still queued.
    fn destroy_request(&mut self, request: Self::Request) {
        drop(request);
    }

    /// Releases a response that no caller will ever poll.
    fn destroy_response(&mut self, response: Self::Response) {
        drop(response);
    }
}

struct QueuedRequest<T> {
    id: RequestId,
    request: T,
}

/// State shared between the caller-facing façade and the worker thread.
struct Shared<W: ModuleWorker> {
    queue: RequestQueue<QueuedRequest<W::Request>>,
    table: ResponseTable<W::Response>,
    ids: IdAllocator,
    cancel: CancelToken,
    /// Id of the request currently running; 0 when the worker is idle.
    running: AtomicU64,
    /// Id of the last request the worker finished. Requests finish in FIFO
    /// order, so this is a watermark: everything at or below it is done.
    finished: AtomicU64,
    /// Ids cancelled while their request was still pending. The token is
    /// pre-set when such a request starts running, so the handler observes
    /// the cancellation at its first check.
    precancelled: Mutex<HashSet<u64>>,
}

/// Caller-facing half of one module instance: a single worker thread paired
/// with non-blocking enqueue/poll operations.
///
/// `enqueue` and `poll` are designed to be called once per frame tick and
/// never suspend the caller; the worker suspends only while the queue is
/// empty.
pub struct Dispatcher<W: ModuleWorker> {
    shared: Arc<Shared<W>>,
    worker: Option<JoinHandle<()>>,
    name: String,
}

impl<W: ModuleWorker> Dispatcher<W> {
    /// Spawns the module's worker thread, moving `worker` and all its state
    /// into it.
    pub fn start(name: &str, worker: W) -> Self {
        let shared = Arc::new(Shared {
            queue: RequestQueue::new(),
            table: ResponseTable::new(),
            ids: IdAllocator::new(),
            cancel: CancelToken::new(),
            running: AtomicU64::new(0),
            finished: AtomicU64::new(0),
            precancelled: Mutex::new(HashSet::new()),
        });

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(format!("{}-worker", name))
            .spawn(move || worker_loop(worker, thread_shared))
            .expect("failed to spawn module worker thread");

        log::info!("{} module started", name);

        Self {
            shared,
            worker: Some(handle),
            name: name.to_string(),
        }
    }

    /// Hands a request to the worker and returns its id immediately.
    pub fn enqueue(&self, request: W::Request) -> RequestId {
        let id = self.shared.ids.next();
        self.shared.queue.push(QueuedRequest { id, request });
        id
    }

    /// Single-consumption poll: if the response for `id` is ready it is
    /// removed and returned, and a second poll for the same id yields `None`
    /// again. `None` means "not finished yet".
    ///
    /// # Panics
    ///
    /// Polling an id this module instance never issued is a programming
    /// error and panics.
    pub fn poll(&self, id: RequestId) -> Option<W::Response> {
        assert!(
            self.shared.ids.was_issued(id),
            "request {} was never issued by the {} module",
            id,
            self.name
        );
        self.shared.table.poll(id)
    }

    /// Requests cooperative cancellation of `id`.
    ///
    /// If the request is currently running, the token is raised for its
    /// handler to observe. If it is still pending, the cancellation is
    /// remembered and the token is pre-set when the request starts, so the
    /// handler sees it at its first check. If the request already finished,
    /// this is a no-op. The handler is always invoked either way; a handler
    /// that never checks the token still runs to completion.
    pub fn cancel(&self, id: RequestId) {
        let shared = &self.shared;
        // The lock orders this against the worker's transitions between
        // requests, so the id cannot slip from pending to running unseen.
        let mut precancelled = shared.precancelled.lock();
        if shared.running.load(Ordering::SeqCst) == id.get() {
            shared.cancel.request_cancel();
        } else if id.get() > shared.finished.load(Ordering::SeqCst) && shared.ids.was_issued(id) {
            precancelled.insert(id.get());
        }
    }

    /// Raises the shutdown signal and blocks until the worker thread has
    /// exited. A handler that is mid-invocation finishes normally first;
    /// requests still pending are discarded without ever producing a
    /// response, and their payloads are released through the destroy hooks.
    pub fn stop(&mut self) {
        if let Some(handle) = self.worker.take() {
            self.shared.queue.shutdown();
            handle.join().expect("module worker thread panicked");
            log::info!("{} module stopped", self.name);
        }
    }
}

impl<W: ModuleWorker> Drop for Dispatcher<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The worker loop: pop, reset the cancellation token, run the handler,
/// publish. On shutdown, everything still queued or unpolled is routed
/// through the worker's destroy hooks so payload resources are released even
/// though no caller ever observed them.
fn worker_loop<W: ModuleWorker>(mut worker: W, shared: Arc<Shared<W>>) {
    loop {
        match shared.queue.pop() {
            Popped::Request(QueuedRequest { id, request }) => {
                {
                    let mut precancelled = shared.precancelled.lock();
                    shared.cancel.reset();
                    if precancelled.remove(&id.get()) {
                        shared.cancel.request_cancel();
                    }
                    shared.running.store(id.get(), Ordering::SeqCst);
                }

                let response = worker.process(request, &shared.cancel);

                {
                    let _guard = shared.precancelled.lock();
                    shared.running.store(0, Ordering::SeqCst);
                    shared.finished.store(id.get(), Ordering::SeqCst);
                }
                shared.table.publish(id, response);
            }
            Popped::Shutdown => break,
        }
    }

    for entry in shared.queue.drain() {
        log::debug!("discarding request {} at shutdown", entry.id);
        worker.destroy_request(entry.request);
    }
    for response in shared.table.drain() {
        worker.destroy_response(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    enum TestRequest {
        Echo(u32),
        WaitForCancel,
        IgnoreCancel,
        /// Blocks inside the handler until the test releases it.
        Block(mpsc::Receiver<()>),
    }

    #[derive(Debug, PartialEq, Eq)]
    enum TestResponse {
        Echoed(u32),
        Aborted,
        Completed,
    }

    struct TestWorker {
        discarded: mpsc::Sender<&'static str>,
    }

    impl ModuleWorker for TestWorker {
        type Request = TestRequest;
        type Response = TestResponse;

        fn process(&mut self, request: TestRequest, cancel: &CancelToken) -> TestResponse {
            match request {
                TestRequest::Echo(value) => TestResponse::Echoed(value),
                TestRequest::WaitForCancel => {
                    for _ in 0..200 {
                        if cancel.is_cancelled() {
                            return TestResponse::Aborted;
                        }
                        thread::sleep(Duration::from_millis(1));
                    }
                    TestResponse::Completed
                }
                TestRequest::IgnoreCancel => {
                    thread::sleep(Duration::from_millis(10));
                    TestResponse::Completed
                }
                TestRequest::Block(gate) => {
                    let _ = gate.recv();
                    TestResponse::Completed
                }
            }
        }

        fn destroy_request(&mut self, _request: TestRequest) {
            let _ = self.discarded.send("request");
        }

        fn destroy_response(&mut self, _response: TestResponse) {
            let _ = self.discarded.send("response");
        }
    }

    fn start_test_module() -> (Dispatcher<TestWorker>, mpsc::Receiver<&'static str>) {
        let (sender, receiver) = mpsc::channel();
        let dispatcher = Dispatcher::start("test", TestWorker { discarded: sender });
        (dispatcher, receiver)
    }

    fn poll_until<W: ModuleWorker>(dispatcher: &Dispatcher<W>, id: RequestId) -> W::Response {
        loop {
            if let Some(response) = dispatcher.poll(id) {
                return response;
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn enqueue_then_poll_roundtrip() {
        let (dispatcher, _discarded) = start_test_module();
        let id = dispatcher.enqueue(TestRequest::Echo(42));
        assert_eq!(id.get(), 1);

        let response = poll_until(&dispatcher, id);
        assert_eq!(response, TestResponse::Echoed(42));
        // Already consumed.
        assert_eq!(dispatcher.poll(id), None);
    }

    #[test]
    fn responses_become_ready_in_enqueue_order() {
        let (dispatcher, _discarded) = start_test_module();
        let ids: Vec<_> = (0..3)
            .map(|i| dispatcher.enqueue(TestRequest::Echo(i)))
            .collect();

        // Once the last request has answered, FIFO means every earlier
        // response was published before it and must already be waiting.
        let last = poll_until(&dispatcher, ids[2]);
        assert_eq!(last, TestResponse::Echoed(2));
        assert_eq!(dispatcher.poll(ids[0]), Some(TestResponse::Echoed(0)));
        assert_eq!(dispatcher.poll(ids[1]), Some(TestResponse::Echoed(1)));
    }

    #[test]
    fn cancelling_a_running_request_aborts_it() {
        let (dispatcher, _discarded) = start_test_module();
        let id = dispatcher.enqueue(TestRequest::WaitForCancel);

        // Wait for the handler to actually start before cancelling.
        while dispatcher.shared.running.load(Ordering::SeqCst) != id.get() {
            thread::sleep(Duration::from_millis(1));
        }
        dispatcher.cancel(id);

        assert_eq!(poll_until(&dispatcher, id), TestResponse::Aborted);
    }

    #[test]
    fn cancelling_a_pending_request_presets_the_token() {
        let (dispatcher, _discarded) = start_test_module();
        // Occupy the worker so the second request stays pending.
        let busy = dispatcher.enqueue(TestRequest::IgnoreCancel);
        let pending = dispatcher.enqueue(TestRequest::WaitForCancel);

        dispatcher.cancel(pending);

        assert_eq!(poll_until(&dispatcher, busy), TestResponse::Completed);
        assert_eq!(poll_until(&dispatcher, pending), TestResponse::Aborted);
    }

    #[test]
    fn handler_that_ignores_cancellation_completes_normally() {
        let (dispatcher, _discarded) = start_test_module();
        let id = dispatcher.enqueue(TestRequest::IgnoreCancel);
        dispatcher.cancel(id);

        assert_eq!(poll_until(&dispatcher, id), TestResponse::Completed);
    }

    #[test]
    fn stop_discards_pending_requests_and_unpolled_responses() {
        let (mut dispatcher, discarded) = start_test_module();

        // Hold the worker inside a handler, queue one more request behind it,
        // and raise the shutdown signal before releasing the handler.
        let (release, gate) = mpsc::channel();
        let busy = dispatcher.enqueue(TestRequest::Block(gate));
        while dispatcher.shared.running.load(Ordering::SeqCst) != busy.get() {
            thread::sleep(Duration::from_millis(1));
        }
        dispatcher.enqueue(TestRequest::Echo(2));
        dispatcher.shared.queue.shutdown();
        release.send(()).unwrap();
        dispatcher.stop();

        // The running handler finished and published, but nobody polled it;
        // the trailing request never ran at all. Both must be reclaimed.
        let mut hooks: Vec<_> = discarded.try_iter().collect();
        hooks.sort_unstable();
        assert_eq!(hooks, vec!["request", "response"]);
    }

    #[test]
    #[should_panic(expected = "never issued")]
    fn polling_a_foreign_id_panics() {
        let (dispatcher, _discarded) = start_test_module();
        let (other, _other_discarded) = start_test_module();
        for _ in 0..3 {
            other.enqueue(TestRequest::Echo(0));
        }
        let foreign = other.enqueue(TestRequest::Echo(0));
        // Issued by `other`, never by `dispatcher`.
        let _ = dispatcher.poll(foreign);
    }

    #[test]
    fn drop_without_stop_joins_the_worker() {
        let (dispatcher, _discarded) = start_test_module();
        dispatcher.enqueue(TestRequest::Echo(7));
        drop(dispatcher);
    }
}
