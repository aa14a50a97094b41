//! Network-module error handling

use crate::error::{EngineError, EngineResult};

/// Type alias for network-module results
pub type NetworkResult<T> = EngineResult<T>;

/// Create a connection error
pub fn connection_error(addr: &str, error: impl std::fmt::Display) -> EngineError {
    EngineError::ConnectionFailed {
        addr: addr.to_string(),
        error: error.to_string(),
    }
}
