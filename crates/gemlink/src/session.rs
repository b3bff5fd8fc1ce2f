//! The device/session façade.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use gempack::Transport;
use gempack::TransportError;
use gemrpc::call;
use gemrpc::CallError;
use gemrpc::Method;

use crate::log;

/// Tells concurrent sessions apart in the logs.
static INDEX: AtomicUsize = AtomicUsize::new(0);

/// A client-side failure.
#[derive(Debug)]
pub enum Error {
    /// The transport could not complete a lifecycle operation; connection
    /// refusal and every other transport failure share this kind.
    Rpc(String),
    /// A remote call failed.
    Call(CallError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Rpc(reason) => write!(f, "RPC exception: {}", reason),
            Error::Call(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<CallError> for Error {
    fn from(e: CallError) -> Self {
        Error::Call(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A session with one remote controller.
///
/// Owns the transport; all calls are synchronous and single-threaded.
pub struct Session<T: Transport> {
    domain: String,
    index: usize,
    connected: bool,
    rpc: T,
}

impl<T: Transport> Session<T> {
    /// Opens a session and attempts an initial connection. An unreachable
    /// controller is logged, not fatal; use [`reconnect`](Self::reconnect)
    /// once the board is up.
    pub fn new(domain: impl Into<String>, transport: T) -> Self {
        log::install();

        let mut session = Self {
            domain: domain.into(),
            index: INDEX.fetch_add(1, Ordering::Relaxed),
            connected: false,
            rpc: transport,
        };

        match session.connect() {
            Ok(()) => {
                tracing::info!(
                    session = session.index,
                    domain = %session.domain,
                    "interface connected"
                );
            }
            Err(e) => {
                tracing::info!(
                    session = session.index,
                    domain = %session.domain,
                    error = %e,
                    "interface failed to connect"
                );
            }
        }

        session
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Opens the channel to the controller.
    pub fn connect(&mut self) -> Result<()> {
        match self.rpc.connect(&self.domain) {
            Ok(()) => {
                self.connected = true;
                tracing::info!(session = self.index, "RPC connected");
                Ok(())
            }
            Err(TransportError::ConnectionRefused(reason)) => {
                tracing::error!(session = self.index, %reason, "connection failed");
                Err(Error::Rpc(format!("connection failed: {}", reason)))
            }
            Err(e) => {
                tracing::error!(session = self.index, error = %e, "transport error");
                Err(Error::Rpc(e.to_string()))
            }
        }
    }

    /// [`connect`](Self::connect) under its historical name.
    pub fn reconnect(&mut self) -> Result<()> {
        self.connect()
    }

    /// Closes the channel. Closing an already closed session succeeds.
    pub fn disconnect(&mut self) -> Result<()> {
        match self.rpc.disconnect() {
            Ok(()) => {
                self.connected = false;
                tracing::info!(session = self.index, "RPC disconnected");
                Ok(())
            }
            Err(TransportError::NotConnected) => {
                tracing::info!(session = self.index, "already disconnected");
                self.connected = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!(session = self.index, error = %e, "transport error");
                Err(Error::Rpc(e.to_string()))
            }
        }
    }

    /// Asks the remote side to load a handler module and checks that it
    /// reported success.
    pub fn load_module(&mut self, name: &str, version: &str) -> Result<()> {
        match self.rpc.load_module(name, version) {
            Ok(true) => {
                tracing::debug!(session = self.index, name, version, "module loaded");
                Ok(())
            }
            Ok(false) => Err(Error::Rpc(format!(
                "loading module {} {} failed",
                name, version
            ))),
            Err(e) => Err(Error::Rpc(e.to_string())),
        }
    }

    /// Adjusts the log verbosity: 0 = error up to 4 = trace.
    pub fn set_log_level(&self, level: u32) {
        log::set_level(level);
    }

    /// Calls the remote method `M`.
    pub fn call<M: Method>(&mut self, args: M::Args) -> Result<M::Return> {
        if !self.connected {
            return Err(Error::Rpc("not connected".to_string()));
        }
        call::<M, _>(&mut self.rpc, args).map_err(Error::Call)
    }
}
