//! The blocking request/reply channel to a remote controller.

use crate::message::Message;

/// Failures raised by a [`Transport`].
#[derive(Debug, Clone)]
pub enum TransportError {
    /// The remote side refused or dropped the connection attempt.
    ConnectionRefused(String),
    /// The channel is not open.
    NotConnected,
    /// Any other transport-level failure, including protocol errors
    /// reported by the remote messaging daemon.
    Rpc(String),
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::ConnectionRefused(reason) => {
                write!(f, "connection refused: {}", reason)
            }
            TransportError::NotConnected => write!(f, "not connected"),
            TransportError::Rpc(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for TransportError {}

/// A blocking channel that pairs every request with exactly one reply.
///
/// Implement this trait to reach a controller over a real network link.
/// The framework never multiplexes: `call_method` blocks the calling
/// thread until the reply arrives or the transport reports a failure.
pub trait Transport {
    /// Opens the channel to the given board domain.
    fn connect(&mut self, domain: &str) -> Result<(), TransportError>;

    /// Closes the channel. Fails with [`TransportError::NotConnected`]
    /// when the channel is already closed.
    fn disconnect(&mut self) -> Result<(), TransportError>;

    /// Asks the remote side to load a handler module; `true` on success.
    fn load_module(&mut self, name: &str, version: &str) -> Result<bool, TransportError>;

    /// Sends one request and blocks for its reply.
    fn call_method(&mut self, request: &Message) -> Result<Message, TransportError>;
}
