//! Process-wide tracing setup with runtime level control.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Registry;

static HANDLE: OnceLock<reload::Handle<LevelFilter, Registry>> = OnceLock::new();

/// Installs the console subscriber once per process, keeping the reload
/// handle used by [`set_level`]. Later calls are no-ops, and an already
/// installed foreign subscriber is left alone.
pub fn install() {
    HANDLE.get_or_init(|| {
        let (filter, handle) = reload::Layer::new(LevelFilter::INFO);
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
        handle
    });
}

/// Maps the session log-level scale onto the subscriber:
/// 0 = error, 1 = warn, 2 = info, 3 = debug, 4 = trace.
/// Out-of-range values leave the level unchanged.
pub fn set_level(level: u32) {
    let filter = match level {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        4 => LevelFilter::TRACE,
        _ => return,
    };

    if let Some(handle) = HANDLE.get() {
        let _ = handle.reload(filter);
    }
}
