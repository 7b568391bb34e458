//! Error Handling Module
//!
//! This module provides the error type shared by every stage of the adapter:
//! - Core error type (`AdapterError`) and its coarse `ErrorCategory`
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust
//! use groq_runtime_adapter::error::{AdapterError, ErrorCategory};
//!
//! let error = AdapterError::api_error(404, "model not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_retryable());
//! ```

mod conversions;
pub mod types;

pub use types::*;
