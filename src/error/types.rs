//! Core error types

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors produced while normalizing a request, talking to Groq, or
/// driving the event stream.
#[derive(Error, Debug, Clone)]
pub enum AdapterError {
    /// Invalid or incomplete adapter configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request input that cannot be turned into a vendor payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Declared tools or system messages do not fit into the model context
    #[error("Token budget exceeded: {reason} (required {required}, available {available})")]
    TokenBudgetExceeded {
        reason: String,
        required: usize,
        available: usize,
    },

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The vendor rejected the request
    #[error("API error: {code} - {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Failure while the vendor stream was being consumed
    #[error("Stream error: {0}")]
    StreamError(String),

    /// Stream payload that could not be decoded
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The stream was cancelled by the caller
    #[error("Stream cancelled")]
    Cancelled,

    /// The event sink stopped accepting events
    #[error("Event sink closed")]
    SinkClosed,

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Client,
    Server,
    Network,
    Parsing,
    Validation,
    Cancellation,
    Unknown,
}

impl AdapterError {
    /// Build an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status code, if the error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Classify the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError { code, .. } => match code {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                400..=499 => ErrorCategory::Client,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Unknown,
            },
            Self::HttpError(_) | Self::StreamError(_) => ErrorCategory::Network,
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::ConfigurationError(_)
            | Self::InvalidInput(_)
            | Self::TokenBudgetExceeded { .. } => ErrorCategory::Validation,
            Self::Cancelled | Self::SinkClosed => ErrorCategory::Cancellation,
            Self::InternalError(_) => ErrorCategory::Unknown,
        }
    }

    /// Whether a caller could reasonably retry.
    ///
    /// Informational only: the adapter itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit | ErrorCategory::Server | ErrorCategory::Network
        )
    }
}
