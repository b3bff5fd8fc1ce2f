//! The method table mapping `(abi, method)` to generated dispatchers.

use dashmap::DashMap;

use gempack::Message;
use gemrpc::Dispatcher;
use gemrpc::MethodRegistry;

/// The host runtime's method table.
///
/// Handler modules install their dispatchers here through
/// [`gemrpc::register_method`]; the request loop hands every incoming
/// message to [`dispatch`](Self::dispatch). Entries are keyed by the full
/// wire name, `"<abi>.<method>"`, so an ABI mismatch shows up as
/// method-not-found rather than a misdecoded call.
#[derive(Default)]
pub struct ModuleManager {
    methods: DashMap<String, Dispatcher>,
}

impl ModuleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Routes one request to its dispatcher and returns the complete
    /// reply. An unknown method name yields the transport-level
    /// `"rpcerror"` key, never a missing reply.
    pub fn dispatch(&self, request: &Message) -> Message {
        let mut response = Message::new(request.name());

        let dispatcher = match self.methods.get(request.name()) {
            Some(entry) => *entry,
            None => {
                tracing::warn!(method = request.name(), "method not found");
                response.set_string(
                    "rpcerror",
                    format!("method not found: {}", request.name()),
                );
                return response;
            }
        };

        dispatcher(request, &mut response);
        response
    }
}

impl MethodRegistry for ModuleManager {
    fn register_dispatcher(&self, abi: &str, name: &str, dispatcher: Dispatcher) {
        self.methods.insert(format!("{}.{}", abi, name), dispatcher);
    }
}
