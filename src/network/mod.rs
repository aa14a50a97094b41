//! Network module
//!
//! Connection establishment runs on its own worker thread so a slow or
//! unreachable host never stalls the UI: the menu enqueues a connect, keeps
//! the id, and polls it every tick while showing a "Connecting..." popup
//! whose cancel button maps to [`NetworkModule::cancel`].

pub mod connection;
pub mod error;
pub mod ops;
pub mod protocol;
pub mod worker;

pub use connection::Connection;
pub use error::NetworkResult;
pub use ops::{ConnectionInfo, ConnectionMode, NetworkOp, NetworkRequest, NetworkResponse};
pub use protocol::{DEFAULT_PORT, PROTOCOL_VERSION};
pub use worker::NetworkWorker;

use crate::dispatch::{Dispatcher, RequestId};

/// Caller-facing façade of the network module.
pub struct NetworkModule {
    dispatcher: Dispatcher<NetworkWorker>,
}

impl NetworkModule {
    /// Starts the network worker thread.
    pub fn start() -> Self {
        Self {
            dispatcher: Dispatcher::start("network", NetworkWorker::new()),
        }
    }

    /// Connects to a host (client) or binds a listener (server).
    pub fn connect(&self, mode: ConnectionMode, address: impl Into<String>) -> RequestId {
        self.dispatcher.enqueue(NetworkRequest::Connect {
            mode,
            address: address.into(),
        })
    }

    /// Drops any live connection or listener.
    pub fn disconnect(&self) -> RequestId {
        self.dispatcher.enqueue(NetworkRequest::Disconnect)
    }

    /// Single-consumption poll; `None` until the operation finishes.
    pub fn poll(&self, id: RequestId) -> Option<NetworkResponse> {
        self.dispatcher.poll(id)
    }

    /// Requests cooperative cancellation of an outstanding operation,
    /// typically a connect attempt the user gave up on.
    pub fn cancel(&self, id: RequestId) {
        self.dispatcher.cancel(id)
    }

    /// Blocks until the worker thread has exited.
    pub fn stop(&mut self) {
        self.dispatcher.stop()
    }
}

impl Default for NetworkModule {
    fn default() -> Self {
        Self::start()
    }
}
