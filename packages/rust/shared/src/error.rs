//! Error types for LeadGen.
//!
//! Library crates use [`LeadGenError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all LeadGen operations.
#[derive(Debug, thiserror::Error)]
pub enum LeadGenError {
    /// Missing credential or unreadable configuration.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network failure or timeout on an outbound call.
    #[error("transport error: {0}")]
    Transport(String),

    /// A remote service answered with a non-success status.
    #[error("service error: {service} returned HTTP {status}: {body}")]
    Service {
        service: String,
        status: u16,
        body: String,
    },

    /// Malformed reply from a remote service.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid user input (search parameters, URLs).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LeadGenError>;

impl LeadGenError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a service error, keeping at most 500 chars of the response body.
    pub fn service(service: impl Into<String>, status: u16, body: &str) -> Self {
        Self::Service {
            service: service.into(),
            status,
            body: body.chars().take(500).collect(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
