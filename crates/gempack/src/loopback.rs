//! An in-process transport for tests and demos.

use crate::message::Message;
use crate::transport::Transport;
use crate::transport::TransportError;

/// A request/reply transport that hands every request to a local handler.
///
/// The handler plays the role of the remote messaging daemon: it receives
/// the request message and must produce a complete reply.
pub struct Loopback<F> {
    handler: F,
    connected: bool,
    refuse: bool,
}

impl<F> Loopback<F>
where
    F: FnMut(&Message) -> Message,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            connected: false,
            refuse: false,
        }
    }

    /// A loopback that refuses every connection attempt.
    pub fn refusing(handler: F) -> Self {
        Self {
            handler,
            connected: false,
            refuse: true,
        }
    }
}

impl<F> Transport for Loopback<F>
where
    F: FnMut(&Message) -> Message,
{
    fn connect(&mut self, _domain: &str) -> Result<(), TransportError> {
        if self.refuse {
            return Err(TransportError::ConnectionRefused(
                "connection refused".to_string(),
            ));
        }
        self.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        self.connected = false;
        Ok(())
    }

    fn load_module(&mut self, _name: &str, _version: &str) -> Result<bool, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        Ok(true)
    }

    fn call_method(&mut self, request: &Message) -> Result<Message, TransportError> {
        if !self.connected {
            return Err(TransportError::NotConnected);
        }
        Ok((self.handler)(request))
    }
}
