//! Core error types

use thiserror::Error;

/// Errors raised by capture and replay operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Surface descriptor did not resolve. Recovered by falling back to the
    /// default surface; never fatal.
    #[error("target '{0}' not found")]
    TargetNotFound(String),

    /// Surface configuration with zero or negative dimensions. Fatal to
    /// replay start.
    #[error("invalid surface configuration: {0}")]
    InvalidConfiguration(String),

    /// A queue entry whose kind is not keyboard/mouse/click. The entry is
    /// skipped; the session continues.
    #[error("unknown event kind '{0}'")]
    UnknownEventKind(String),

    /// Click activation found no element at the scaled coordinate. The
    /// marker is still placed.
    #[error("no target at point ({x}, {y})")]
    NoTargetAtPoint { x: f64, y: f64 },

    /// A capture log that failed to parse or violates its field contracts.
    #[error("malformed capture log: {0}")]
    MalformedLog(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedLog(err.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
