//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;
use thiserror::Error;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive does not parse.
    #[error("invalid log filter '{directive}': {source}")]
    Filter {
        /// Offending directive.
        directive: String,
        /// Parser error.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Builds the filter: `RUST_LOG` when set, otherwise `fallback`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when the fallback does not parse.
pub fn filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(fallback).map_err(|source| TelemetryError::Filter {
            directive: fallback.to_owned(),
            source,
        })
    })
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TelemetryError`] for an invalid filter or when a subscriber is
/// already installed.
pub fn init(fallback: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(fallback)?)
        .with_target(true)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
