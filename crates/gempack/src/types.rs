//! Core types for the keyed message layer.

/// Failures raised by [`Message`](crate::Message) accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not present in the message.
    BadKey(String),
    /// The key exists but its cell holds a different kind of value.
    WrongType(String),
    /// A binary cell does not hold the number of bytes the caller expects.
    BufferTooSmall {
        key: String,
        expected: usize,
        actual: usize,
    },
    /// The message content could not be interpreted at all.
    Corrupt(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::BadKey(key) => write!(f, "bad RPC key: {}", key),
            Error::WrongType(_) => write!(f, "RPC type error"),
            Error::BufferTooSmall { .. } => write!(f, "buffer too small"),
            Error::Corrupt(reason) => write!(f, "corrupt RPC message: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized Result type for message operations.
pub type Result<T> = std::result::Result<T, Error>;
