//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the action bridge.
#[derive(Error, Debug)]
pub enum Error {
    /// A tool name could not be made legal or unique. Fatal to a catalogue build.
    #[error("naming error: {0}")]
    Naming(String),

    /// Invalid configuration document.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown tool or action.
    #[error("not found: {0}")]
    NotFound(String),

    /// The action registry cannot serve requests yet.
    #[error("registry not ready: {0}")]
    NotReady(String),

    /// The remote action call was rejected.
    #[error("action '{action}' failed: {message}")]
    Dispatch { action: String, message: String },

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable error code for protocol servers.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Naming(_) => "NAMING_ERROR",
            Error::Config(_) => "INVALID_CONFIG",
            Error::Validation(_) => "INVALID_ARGUMENT",
            Error::NotFound(_) => "NOT_FOUND",
            Error::NotReady(_) => "UNAVAILABLE",
            Error::Dispatch { .. } => "ACTION_FAILED",
            Error::Serialization(_) | Error::Io(_) => "INTERNAL",
        }
    }
}

// Convenience constructors
impl Error {
    pub fn naming(msg: impl Into<String>) -> Self {
        Self::Naming(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    pub fn dispatch(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dispatch {
            action: action.into(),
            message: message.into(),
        }
    }
}
