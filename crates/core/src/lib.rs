//! Shared primitives for the CloudAMQP connector crates.

#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Result type used across connector crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Identifier attached to one sync pass and the snapshot it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRunId(Uuid);

impl SyncRunId {
    /// Creates a random sync run identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SyncRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SyncRunId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common error categories raised by the connector.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input, configuration or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Operation received a resource of the wrong kind.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Credentials were rejected or could not be verified.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Operation is not enabled for this connector instance.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Remote API answered with a non-success status.
    #[error("{message} (status {status})")]
    RequestFailed {
        /// HTTP status code returned by the API.
        status: u16,
        /// Human readable description, including any context prefixes.
        message: String,
    },

    /// Request never produced a response (DNS, TLS, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Prefixes the error message with a short description of the failed
    /// operation. The category and any HTTP status are preserved.
    #[must_use]
    pub fn context(self, prefix: impl Display) -> Self {
        let wrap = |message: String| format!("{prefix}: {message}");
        match self {
            Self::Validation(message) => Self::Validation(wrap(message)),
            Self::TypeMismatch(message) => Self::TypeMismatch(wrap(message)),
            Self::Unauthenticated(message) => Self::Unauthenticated(wrap(message)),
            Self::Unsupported(message) => Self::Unsupported(wrap(message)),
            Self::RequestFailed { status, message } => Self::RequestFailed {
                status,
                message: wrap(message),
            },
            Self::Transport(message) => Self::Transport(wrap(message)),
            Self::Decode(message) => Self::Decode(wrap(message)),
            Self::Internal(message) => Self::Internal(wrap(message)),
        }
    }

    /// Returns the HTTP status carried by a request failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
