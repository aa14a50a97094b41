//! Protocol constants shared by client and server.

use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

use crate::error::EngineResult;

pub const PROTOCOL_VERSION: u32 = 1;
pub const DEFAULT_PORT: u16 = 2170;
/// Per-attempt dial timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
/// How many times a client retries before giving up. The cancellation token
/// is checked between attempts.
pub const CONNECT_ATTEMPTS: u32 = 3;

/// First bytes on the wire after connecting.
pub const HELLO_MAGIC: [u8; 4] = *b"TSRA";

/// Announces this client to the peer: magic followed by the protocol version,
/// little-endian. Nothing is awaited in return; version validation is the
/// accepting side's job.
pub fn write_hello(stream: &mut TcpStream) -> EngineResult<()> {
    let mut hello = [0u8; 8];
    hello[..4].copy_from_slice(&HELLO_MAGIC);
    hello[4..].copy_from_slice(&PROTOCOL_VERSION.to_le_bytes());
    stream.write_all(&hello)?;
    stream.flush()?;
    Ok(())
}

/// Appends the default port when `address` does not name one.
pub fn with_default_port(address: &str) -> String {
    // A lone colon would be ambiguous with IPv6 literals; those must already
    // be bracketed to carry a port.
    if address.contains(':') && !address.starts_with('[') {
        address.to_string()
    } else if address.starts_with('[') && address.contains("]:") {
        address.to_string()
    } else {
        format!("{}:{}", address, DEFAULT_PORT)
    }
}
