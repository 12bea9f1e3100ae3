//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; binaries and tests call
//! [`init_tracing`] to see them.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Configuration for [`init_tracing`].
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. "info", "getenv_rs=debug").
    pub default_filter: String,
    /// Compact single-line output instead of the full fmt layout.
    pub compact: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            compact: false,
        }
    }
}

/// Error returned when a global subscriber is already installed.
#[derive(Debug, thiserror::Error)]
#[error("failed to init tracing subscriber: {0}")]
pub struct InitError(#[from] tracing_subscriber::util::TryInitError);

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `config.default_filter`.
///
/// # Errors
///
/// Returns an error if a global subscriber was already set, for example by
/// another test in the same process.
pub fn init_tracing(config: TracingConfig) -> Result<(), InitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.compact {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
