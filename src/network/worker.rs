use std::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::dispatch::{CancelToken, ModuleWorker, TaskResult};
use crate::error::EngineError;

use super::connection::Connection;
use super::error::{connection_error, NetworkResult};
use super::ops::{ConnectionInfo, ConnectionMode, NetworkRequest, NetworkResponse};
use super::protocol;

/// The network thread's side of the module: owns the live connection state.
#[derive(Debug, Default)]
pub struct NetworkWorker {
    connection: Option<Connection>,
}

impl NetworkWorker {
    pub fn new() -> Self {
        Self::default()
    }

    fn connect(
        &mut self,
        mode: ConnectionMode,
        address: &str,
        cancel: &CancelToken,
    ) -> TaskResult<ConnectionInfo> {
        // A connect replaces whatever was live before it.
        self.connection = None;

        let result = match mode {
            ConnectionMode::Client => self.connect_client(address, cancel),
            ConnectionMode::Server => self.listen(address),
        };
        match result {
            Ok(Some(info)) => TaskResult::Success(info),
            Ok(None) => TaskResult::Aborted,
            Err(e) => TaskResult::Error(e.to_string()),
        }
    }

    /// Dials the host, retrying a few times. The cancellation token is
    /// checked once per attempt, so a hung dial can be abandoned from the
    /// "Connecting..." popup between attempts. `Ok(None)` means cancelled.
    fn connect_client(
        &mut self,
        address: &str,
        cancel: &CancelToken,
    ) -> NetworkResult<Option<ConnectionInfo>> {
        let address = protocol::with_default_port(address);
        let addr = address
            .to_socket_addrs()
            .map_err(|_| EngineError::InvalidAddress {
                addr: address.clone(),
            })?
            .next()
            .ok_or(EngineError::InvalidAddress {
                addr: address.clone(),
            })?;

        let mut last_error = None;
        for attempt in 1..=protocol::CONNECT_ATTEMPTS {
            if cancel.is_cancelled() {
                log::info!("connect to {} cancelled on attempt {}", address, attempt);
                return Ok(None);
            }
            log::info!(
                "connecting to {} (attempt {}/{})",
                address,
                attempt,
                protocol::CONNECT_ATTEMPTS
            );
            match TcpStream::connect_timeout(&addr, protocol::CONNECT_TIMEOUT) {
                Ok(mut stream) => {
                    protocol::write_hello(&mut stream)?;
                    let info = ConnectionInfo {
                        mode: ConnectionMode::Client,
                        local_addr: stream.local_addr()?,
                        peer_addr: Some(stream.peer_addr()?),
                    };
                    self.connection = Some(Connection::Client {
                        local_addr: info.local_addr,
                        peer_addr: stream.peer_addr()?,
                        stream,
                    });
                    log::info!("connected to {}", address);
                    return Ok(Some(info));
                }
                Err(e) => {
                    log::warn!("attempt {} failed: {}", attempt, e);
                    last_error = Some(e);
                }
            }
        }

        Err(match last_error {
            Some(e) => connection_error(&address, e),
            None => connection_error(&address, "no attempts made"),
        })
    }

    fn listen(&mut self, address: &str) -> NetworkResult<Option<ConnectionInfo>> {
        let address = protocol::with_default_port(address);
        let listener =
            TcpListener::bind(&address).map_err(|e| connection_error(&address, e))?;
        let local_addr = listener.local_addr()?;
        self.connection = Some(Connection::Server {
            listener,
            local_addr,
        });
        log::info!("listening on {}", local_addr);

        Ok(Some(ConnectionInfo {
            mode: ConnectionMode::Server,
            local_addr,
            peer_addr: None,
        }))
    }

    fn disconnect(&mut self) -> TaskResult<()> {
        if let Some(connection) = self.connection.take() {
            log::info!("disconnecting from {}", connection.local_addr());
        }
        TaskResult::Success(())
    }
}

impl ModuleWorker for NetworkWorker {
    type Request = NetworkRequest;
    type Response = NetworkResponse;

    fn process(&mut self, request: NetworkRequest, cancel: &CancelToken) -> NetworkResponse {
        match request {
            NetworkRequest::Connect { mode, address } => {
                NetworkResponse::Connect(self.connect(mode, &address, cancel))
            }
            NetworkRequest::Disconnect => NetworkResponse::Disconnect(self.disconnect()),
        }
    }
}
