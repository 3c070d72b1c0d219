//! Domain Errors
//!
//! Error types for domain operations.

use std::time::Duration;

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Rate limit exceeded, retry after {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Route unavailable: {0}")]
    Unavailable(String),

    #[error("{operation} timed out after {}ms", elapsed.as_millis())]
    Timeout {
        operation: String,
        elapsed: Duration,
    },

    #[error("Magic mode unavailable: {0}")]
    MagicModeUnavailable(String),
}

impl DomainError {
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    pub fn unavailable<T: Into<String>>(message: T) -> Self {
        Self::Unavailable(message.into())
    }

    /// Errors the caller must see even when a fallback route exists.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::RateLimited { .. })
    }
}
