use std::net::{SocketAddr, TcpListener, TcpStream};

/// Live connection state, owned exclusively by the network worker for as
/// long as it exists.
#[derive(Debug)]
pub enum Connection {
    /// Outgoing connection to a game host.
    Client {
        stream: TcpStream,
        local_addr: SocketAddr,
        peer_addr: SocketAddr,
    },
    /// Listening socket of a game host.
    Server {
        listener: TcpListener,
        local_addr: SocketAddr,
    },
}

impl Connection {
    pub fn local_addr(&self) -> SocketAddr {
        match self {
            Connection::Client { local_addr, .. } => *local_addr,
            Connection::Server { local_addr, .. } => *local_addr,
        }
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        match self {
            Connection::Client { peer_addr, .. } => Some(*peer_addr),
            Connection::Server { .. } => None,
        }
    }
}
