/*
[INPUT]:  Error sources (HTTP, webhook replies, serialization, validation)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for task cloner backends
#[derive(Error, Debug)]
pub enum ClonerError {
    /// Caller supplied input that cannot be sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend has no task with this identifier
    #[error("Task {task_id} not found")]
    NotFound { task_id: String },

    /// Webhook refused the credentials
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Webhook returned a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Webhook answered but reported `success: false`
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Reply did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timed out
    #[error("Request timed out after {duration}s")]
    Timeout { duration: u64 },
}

/// Coarse classification used to pick user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Authentication,
    Network,
    Rejected,
    Internal,
}

impl ClonerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClonerError::Validation(_) => ErrorKind::Validation,
            ClonerError::NotFound { .. } => ErrorKind::NotFound,
            ClonerError::Authentication { .. } => ErrorKind::Authentication,
            ClonerError::Http(_) | ClonerError::Timeout { .. } => ErrorKind::Network,
            ClonerError::Api { code, .. } if *code >= 500 => ErrorKind::Network,
            ClonerError::Api { .. } | ClonerError::Rejected { .. } => ErrorKind::Rejected,
            ClonerError::Serialization(_)
            | ClonerError::UrlParse(_)
            | ClonerError::InvalidResponse(_)
            | ClonerError::Config(_) => ErrorKind::Internal,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            ClonerError::Http(err) => !err.is_builder() && !err.is_decode(),
            ClonerError::Timeout { .. } => true,
            ClonerError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Get retry delay in milliseconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        if !self.is_retryable() {
            return None;
        }
        match self {
            ClonerError::Api { code: 429, .. } => Some(2_000),
            ClonerError::Timeout { .. } => Some(1_000),
            _ => Some(500),
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        ClonerError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for task cloner operations
pub type Result<T> = std::result::Result<T, ClonerError>;
