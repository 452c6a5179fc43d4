//! Error types for the orange console.
//!
//! Defines the main error enum used throughout the client. Statement-level
//! failures reported by the server are *not* errors here; they travel as data
//! inside [`crate::exec::ExecutionResult`].

use thiserror::Error;

/// Main error type for orange console operations.
#[derive(Error, Debug)]
pub enum OrangeError {
    /// The request never produced a usable HTTP response (connection refused,
    /// timeout, non-2xx status).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered, but the body is not a valid execution response.
    #[error("Invalid response: {0}")]
    InvalidResponseShape(String),

    /// Configuration errors (invalid config file, bad server URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading SQL input or writing output failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrangeError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a response-shape error with the given message.
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidResponseShape(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if the server could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns true if the server replied with something we could not decode.
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, Self::InvalidResponseShape(_))
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::InvalidResponseShape(_) => "Invalid Response",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using OrangeError.
pub type Result<T> = std::result::Result<T, OrangeError>;
