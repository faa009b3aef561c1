//! Error types for enigmatick.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Normalization of federated data never fails for domain reasons; these
/// variants surface only at parse boundaries, from external capabilities,
/// and when a reply graph would become cyclic.
#[derive(Debug, Error)]
pub enum AppError {
    // === Input Errors ===
    #[error("Malformed input: {0}")]
    Malformed(String),

    #[error("Unsupported object: {0}")]
    Unsupported(String),

    #[error("Reply cycle: {0}")]
    ReplyCycle(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // === Capability Errors ===
    #[error("Decryption error: {0}")]
    Decryption(String),

    // === Runtime Errors ===
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "MALFORMED_INPUT",
            Self::Unsupported(_) => "UNSUPPORTED_OBJECT",
            Self::ReplyCycle(_) => "REPLY_CYCLE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Decryption(_) => "DECRYPTION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error was caused by the federated data itself
    /// rather than by the local environment.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::Unsupported(_) | Self::ReplyCycle(_) | Self::Serialization(_)
        )
    }

    /// Log this error at a level matching its origin.
    pub fn log(&self) {
        if self.is_input_error() {
            tracing::debug!(error = %self, code = self.error_code(), "Input rejected");
        } else {
            tracing::error!(error = %self, code = self.error_code(), "Operation failed");
        }
    }
}

// === From implementations ===

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
