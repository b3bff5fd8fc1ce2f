//! The fault taxonomy seen by callers and handlers.

/// A failed remote call, as seen by the client.
///
/// These are the only two failure kinds `call` produces: either the
/// exchange itself broke down, or the server ran the procedure and it
/// failed.
#[derive(Debug, Clone)]
pub enum CallError {
    /// The transport or message layer could not complete the exchange:
    /// bad key, type error, undersized buffer, corrupt message,
    /// method-not-found, or a connection problem.
    Message(String),
    /// The server accepted the request but the procedure failed.
    Remote {
        message: String,
        type_name: Option<String>,
    },
}

impl CallError {
    /// The failure type name reported by the server, if it captured one.
    pub fn remote_type(&self) -> Option<&str> {
        match self {
            CallError::Remote { type_name, .. } => type_name.as_deref(),
            CallError::Message(_) => None,
        }
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallError::Message(message) => f.write_str(message),
            CallError::Remote {
                message,
                type_name: Some(type_name),
            } => write!(f, "remote error: {}: {}", type_name, message),
            CallError::Remote {
                message,
                type_name: None,
            } => write!(f, "remote error: {}", message),
        }
    }
}

impl std::error::Error for CallError {}

/// The in-flight failure record of a server-side procedure.
///
/// Handler bodies build these through `From`, so `?` works on any
/// `std::error::Error`; the conversion captures the concrete error type's
/// name for the `"<abi>.type"` reply key.
#[derive(Debug, Clone)]
pub struct MethodError {
    message: String,
    type_name: Option<String>,
}

impl MethodError {
    /// An ad-hoc failure with no captured type.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            type_name: None,
        }
    }

    pub(crate) fn from_panic(message: String) -> Self {
        Self {
            message,
            type_name: Some("panic".to_string()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

impl<E: std::error::Error> From<E> for MethodError {
    fn from(e: E) -> Self {
        Self {
            message: e.to_string(),
            type_name: Some(std::any::type_name::<E>().to_string()),
        }
    }
}
