//! Remotely calling an RPC method.

use gempack::Message;
use gempack::Transport;

use crate::error::CallError;
use crate::method::error_key;
use crate::method::request_name;
use crate::method::type_key;
use crate::method::Method;
use crate::serializer::Deserializer;
use crate::serializer::Serializer;
use crate::wire::Wire;

/// Remotely call the RPC method `M`.
///
/// Blocks the calling thread until the reply arrives. The arguments are
/// serialized positionally into the request; the reply carries either the
/// return value starting at key `"0"` or the error keys inspected here.
///
/// Every transport- and message-layer failure surfaces as
/// [`CallError::Message`]; a failure reported by the remote procedure
/// surfaces as [`CallError::Remote`]. Nothing else escapes.
pub fn call<M, T>(connection: &mut T, args: M::Args) -> Result<M::Return, CallError>
where
    M: Method,
    T: Transport,
{
    let mut request = Message::new(request_name::<M>());

    let mut query = Serializer::new(&mut request);
    args.save(&mut query)
        .map_err(|e| CallError::Message(e.to_string()))?;

    let response = connection
        .call_method(&request)
        .map_err(|e| CallError::Message(e.to_string()))?;

    // The messaging daemon reports protocol-level failures, most commonly
    // method-not-found, under its own key.
    if response.key_exists("rpcerror") {
        return Err(match response.get_string("rpcerror") {
            Ok(reason) => CallError::Message(reason.to_string()),
            Err(e) => CallError::Message(e.to_string()),
        });
    }
    if response.key_exists(&error_key()) {
        return Err(read_remote_error(&response));
    }

    let mut reply = Deserializer::new(&response);
    M::Return::load(&mut reply).map_err(|e| CallError::Message(e.to_string()))
}

/// Builds the remote fault carried by a failed reply.
fn read_remote_error(response: &Message) -> CallError {
    let message = match response.get_string(&error_key()) {
        Ok(message) => message.to_string(),
        Err(e) => return CallError::Message(e.to_string()),
    };

    let type_name = if response.key_exists(&type_key()) {
        match response.get_string(&type_key()) {
            Ok(type_name) => Some(type_name.to_string()),
            Err(e) => return CallError::Message(e.to_string()),
        }
    } else {
        None
    };

    CallError::Remote { message, type_name }
}
