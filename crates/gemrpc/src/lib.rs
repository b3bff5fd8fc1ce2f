//! Typed remote procedure calls over a keyed message transport.
//!
//! A procedure is declared once as a [`Method`] implementation shared by
//! both peers; from that single declaration the framework derives the
//! client stub ([`call()`]) and the server dispatcher ([`invoke()`]). The
//! [`Wire`] vocabulary maps typed values onto positionally-keyed message
//! cells, so both sides agree on the encoding by construction.

pub mod call;
pub mod error;
pub mod invoke;
pub mod method;
pub mod serializer;
pub mod wire;

pub use method::Method;
pub use method::MethodRegistry;
pub use method::ABI_VERSION;

pub use wire::Wire;
pub use wire::WireBytes;

pub use serializer::Deserializer;
pub use serializer::Serializer;

pub use call::call;

pub use invoke::invoke;
pub use invoke::register_method;
pub use invoke::Dispatcher;

pub use error::CallError;
pub use error::MethodError;
