//! Engine-wide error handling
//!
//! Subsystems report failures through [`EngineError`]; module workers convert
//! these into error responses rather than letting them escape, so a failed
//! operation surfaces to the caller as a polled result, never as a crash of
//! the worker thread.

use thiserror::Error;

/// Engine-wide result type
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by engine subsystems
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection to {addr} failed: {error}")]
    ConnectionFailed { addr: String, error: String },

    #[error("cannot resolve address: {addr}")]
    InvalidAddress { addr: String },

    #[error("map file {path} is not valid: {reason}")]
    MapFormat { path: String, reason: String },

    #[error("no map loaded")]
    NoMap,

    #[error("tile ({x}, {y}) is outside the map")]
    TileOutOfBounds { x: usize, y: usize },
}
