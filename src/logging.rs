//! Logging setup
//!
//! Diagnostics go to stderr so that stdout carries only the published
//! version. `RUST_LOG` takes precedence over the level chosen by flags.

use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

use crate::output::Verbosity;

/// Errors that may occur while initializing logging
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "verbump=debug,info",
    }
}

/// Install the global subscriber writing to stderr
pub fn init(verbosity: Verbosity, ansi: bool) -> Result<(), LoggingError> {
    let env_filter = build_env_filter(verbosity);
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)))
}
