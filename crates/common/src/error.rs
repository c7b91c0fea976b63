//! Error types shared across TiltDrift crates.
//!
//! Sample *content* never produces an error: out-of-range readings are
//! clamped, foreign sensor kinds are discarded, degenerate layouts skip the
//! update. These variants cover genuine faults only — trace I/O, malformed
//! configuration, unavailable backends, session-state misuse.

use std::path::PathBuf;

/// Top-level error type for TiltDrift operations.
#[derive(Debug, thiserror::Error)]
pub enum TiltdriftError {
    #[error("Sensor error: {message}")]
    Sensor { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error("Trace error: {message}")]
    Trace { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TiltdriftError.
pub type TiltdriftResult<T> = Result<T, TiltdriftError>;

impl TiltdriftError {
    pub fn sensor(msg: impl Into<String>) -> Self {
        Self::Sensor {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }

    pub fn trace(msg: impl Into<String>) -> Self {
        Self::Trace {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
