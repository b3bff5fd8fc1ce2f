//! Keyed-cell messages and the blocking transport they travel over.
//!
//! A [`Message`] is a bag of typed cells indexed by opaque string keys,
//! plus a name. The [`Transport`] trait is the request/reply channel to a
//! remote controller; [`Loopback`] is the in-process implementation used
//! by tests and demos.

pub mod loopback;
pub mod message;
pub mod transport;
pub mod types;

pub use types::Error;
pub use types::Result;

pub use message::Cell;
pub use message::Message;

pub use transport::Transport;
pub use transport::TransportError;

pub use loopback::Loopback;

#[cfg(test)]
mod tests;
