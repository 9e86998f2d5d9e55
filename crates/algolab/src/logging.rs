//! Subscriber bootstrap. Library crates only emit events; a host calls one
//! of these once at startup.
//!
//! Every narrated step is emitted at `TRACE` under [`STEP_TARGET`], so
//! `algolab::steps=trace` prints the traces as they are produced.
//!
//! [`STEP_TARGET`]: algolab_core::step_log::STEP_TARGET

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds the filter from `RUST_LOG`, falling back to `default_filter`.
pub fn env_filter(default_filter: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_filter)?),
    }
}

/// Installs a formatted stderr subscriber.
pub fn try_init(default_filter: &str) -> Result<(), LoggingError> {
    let filter = env_filter(default_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))
}

/// Like [`try_init`], but a failure is reported as a warning through
/// whatever subscriber is active instead of being returned.
pub fn init(default_filter: &str) {
    if let Err(err) = try_init(default_filter) {
        tracing::warn!(%err, "logging not initialised");
    }
}
