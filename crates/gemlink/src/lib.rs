//! Client-side device session over the RPC transport.
//!
//! A [`Session`] owns the connection to one controller, exposes the
//! lifecycle operations (connect, reconnect, disconnect, module loading,
//! log-level control) and the typed [`call`](Session::call) wrapper.

pub mod log;
pub mod session;

pub use session::Error;
pub use session::Result;
pub use session::Session;
