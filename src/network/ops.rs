use std::net::SocketAddr;

use crate::dispatch::TaskResult;

/// Which side of the connection this module should become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    Client,
    Server,
}

/// Operation tags of the network module's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOp {
    Connect,
    Disconnect,
}

/// A request handed to the network worker.
#[derive(Debug)]
pub enum NetworkRequest {
    /// As a client: dial `address` (default port appended when missing).
    /// As a server: bind a listener on `address`.
    Connect {
        mode: ConnectionMode,
        address: String,
    },
    /// Drops any live connection or listener. Succeeds when already idle.
    Disconnect,
}

impl NetworkRequest {
    pub fn op(&self) -> NetworkOp {
        match self {
            NetworkRequest::Connect { .. } => NetworkOp::Connect,
            NetworkRequest::Disconnect => NetworkOp::Disconnect,
        }
    }
}

/// Success payload of `CONNECT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub mode: ConnectionMode,
    pub local_addr: SocketAddr,
    /// Set for clients; a server has no single peer.
    pub peer_addr: Option<SocketAddr>,
}

/// A finished response, tagged by operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkResponse {
    Connect(TaskResult<ConnectionInfo>),
    Disconnect(TaskResult<()>),
}

impl NetworkResponse {
    pub fn op(&self) -> NetworkOp {
        match self {
            NetworkResponse::Connect(_) => NetworkOp::Connect,
            NetworkResponse::Disconnect(_) => NetworkOp::Disconnect,
        }
    }
}
