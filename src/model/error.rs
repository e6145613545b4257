//! Error types for the serial monitor.
//!
//! The taxonomy follows the failure classes of the application:
//!
//! - [`AppError`] - top-level error returned to `main`
//!   - [`ConfigError`](crate::config::ConfigError) - invalid configuration (fatal, before any port is opened)
//!   - [`StartupError`] - invalid interactive port selection (fatal)
//!   - [`SerialError`] - serial driver failures (open/drain/reset/write are fatal)
//!   - [`LoggingError`](crate::logging::LoggingError) - log file setup failure
//!   - `std::io::Error` - terminal failures
//!
//! Per-message parse failures during plotting are not errors at all: the
//! point is skipped inside the transform and nothing is surfaced.

use thiserror::Error;

/// Top-level application error.
///
/// Every variant is fatal: `main` prints a one-line diagnostic and exits
/// with a non-zero status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be resolved.
    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The user did not pick a valid port.
    #[error("{0}")]
    Startup(#[from] StartupError),

    /// Serial driver failure.
    #[error("{0}")]
    Serial(#[from] SerialError),

    /// Log file could not be set up.
    #[error("cannot set up logging: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal initialisation or rendering failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures reported by the serial driver collaborator.
#[derive(Debug, Error)]
pub enum SerialError {
    /// Port enumeration failed.
    #[error("cannot get ports: {0}")]
    Enumerate(String),

    /// Enumeration succeeded but returned nothing.
    #[error("no serial ports found!")]
    NoPorts,

    /// The chosen port could not be opened.
    #[error("cannot open serial port {port}: {reason}")]
    Open {
        /// Port name as listed by the driver.
        port: String,
        /// Driver-provided reason.
        reason: String,
    },

    /// Flushing pending output failed.
    #[error("cannot drain serial: {0}")]
    Drain(#[source] std::io::Error),

    /// Discarding the driver's input/output buffers failed.
    #[error("cannot reset serial buffers: {0}")]
    Reset(String),

    /// Writing user input to the port failed.
    #[error("cannot write to serial: {0}")]
    Write(#[source] std::io::Error),
}

/// Failures of the interactive port selection prompt.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Standard input could not be read.
    #[error("cannot read user input: {0}")]
    ReadSelection(#[from] std::io::Error),

    /// The selection was not a number.
    #[error("cannot choose option: {0:?} is not a number")]
    NotANumber(String),

    /// The selection was outside `1..=max`.
    #[error("invalid chosen port {choice} (expected 1-{max})")]
    OutOfRange {
        /// What the user typed.
        choice: i64,
        /// Number of listed ports.
        max: usize,
    },
}
