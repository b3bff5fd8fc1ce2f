//! Locally invoking an RPC method on behalf of a remote caller.

use std::panic;
use std::panic::AssertUnwindSafe;

use gempack::Message;

use crate::error::MethodError;
use crate::method::error_key;
use crate::method::type_key;
use crate::method::Method;
use crate::method::MethodRegistry;
use crate::method::ABI_VERSION;
use crate::serializer::Deserializer;
use crate::serializer::Serializer;
use crate::wire::Wire;

/// The generated server-side entry point for one method.
pub type Dispatcher = fn(&Message, &mut Message);

/// Locally invoke the RPC method `M`.
///
/// This is the wrapper executed for every remote call: it deserializes the
/// arguments from the request, runs the local implementation, and
/// serializes the return value into the response. The transport requires a
/// complete reply, so no failure escapes: deserialization errors, handler
/// failures and panics all end up as the `"<abi>.error"` (and, when a type
/// was captured, `"<abi>.type"`) keys on the response.
pub fn invoke<M: Method>(request: &Message, response: &mut Message) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run::<M>(request, response)));

    let fault = match outcome {
        Ok(Ok(())) => return,
        Ok(Err(fault)) => fault,
        Err(payload) => MethodError::from_panic(panic_text(payload)),
    };

    tracing::warn!(
        method = M::NAME,
        error = fault.message(),
        "method invocation failed"
    );
    write_fault(response, &fault);
}

/// Register the RPC method `M` with the host runtime's module loader so
/// that it can be called remotely.
pub fn register_method<M: Method>(loader: &impl MethodRegistry) {
    loader.register_dispatcher(ABI_VERSION, M::NAME, invoke::<M>);
}

fn run<M: Method>(request: &Message, response: &mut Message) -> Result<(), MethodError> {
    let mut query = Deserializer::new(request);
    let args = M::Args::load(&mut query)?;

    let result = M::default().run(args)?;

    let mut reply = Serializer::new(response);
    result.save(&mut reply)?;
    Ok(())
}

/// Writes the error keys; a reply that cannot even carry its error keys is
/// unrecoverable, so a failure here ends the process.
fn write_fault(response: &mut Message, fault: &MethodError) {
    let wrote = panic::catch_unwind(AssertUnwindSafe(|| {
        response.set_string(error_key(), fault.message());
        if let Some(type_name) = fault.type_name() {
            response.set_string(type_key(), type_name);
        }
    }));

    if wrote.is_err() {
        std::process::abort();
    }
}

fn panic_text(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
