//! Type Conversions for AdapterError
//!
//! From trait implementations for converting common error types into
//! AdapterError.

use super::types::AdapterError;

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::HttpError(format!("request timed out: {err}"));
        }
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
