//! Error types for telemetry setup.

use thiserror::Error;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised while configuring logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Installing the tracing subscriber failed.
    #[error("failed to install tracing subscriber")]
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
    /// Log format name was not recognised.
    #[error("unknown log format '{value}' (expected 'json' or 'pretty')")]
    UnknownFormat {
        /// Rejected value.
        value: String,
    },
}
