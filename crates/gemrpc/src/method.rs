//! Remotely callable method declarations.

use crate::error::MethodError;
use crate::invoke::Dispatcher;
use crate::wire::Wire;

/// The RPC ABI version, prefixed to every method name on the wire.
///
/// A peer built against a different ABI sees every request as
/// method-not-found rather than silently misdecoding arguments.
pub const ABI_VERSION: &str = "v1";

/// A remotely callable procedure.
///
/// The implementation is the procedure's single declaration: it fixes the
/// wire name, the argument tuple and the return type, and both peers must
/// share it. The trait bound on [`call()`](crate::call()) and
/// [`invoke()`](crate::invoke()) is a compile-time check so a developer
/// cannot call a local function remotely by mistake, or the other way
/// around.
///
/// ```
/// use gemrpc::{Method, MethodError};
///
/// #[derive(Default)]
/// struct Echo;
///
/// impl Method for Echo {
///     const NAME: &'static str = "Echo";
///     type Args = (u32,);
///     type Return = u32;
///
///     fn run(&self, (x,): Self::Args) -> Result<u32, MethodError> {
///         Ok(x)
///     }
/// }
/// ```
pub trait Method: Default {
    /// Wire identity of the procedure. Requests are named
    /// `"<ABI_VERSION>.<NAME>"`.
    const NAME: &'static str;

    /// The argument tuple, owned; `()` for a procedure without arguments.
    type Args: Wire;

    /// The result; `()` for a procedure that returns nothing.
    type Return: Wire;

    /// The local implementation. Only ever executed inside the server
    /// dispatcher; the client never touches it.
    fn run(&self, args: Self::Args) -> Result<Self::Return, MethodError>;
}

/// The install surface of the host runtime's module loader.
///
/// The loader owns the mapping from `(abi, method)` to dispatchers; the
/// framework only pushes entries into it via
/// [`register_method()`](crate::register_method()).
pub trait MethodRegistry {
    fn register_dispatcher(&self, abi: &str, name: &str, dispatcher: Dispatcher);
}

/// Wire name of a request for `M`.
pub(crate) fn request_name<M: Method>() -> String {
    format!("{}.{}", ABI_VERSION, M::NAME)
}

/// Reply key carrying the error message of a failed procedure.
pub(crate) fn error_key() -> String {
    format!("{}.error", ABI_VERSION)
}

/// Reply key carrying the failure type name, when one was captured.
pub(crate) fn type_key() -> String {
    format!("{}.type", ABI_VERSION)
}
