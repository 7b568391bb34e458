//! Transformers layer
//!
//! Request normalization: domain messages and actions become a Groq
//! request payload, trimmed to the target model's context budget.

pub mod request;
pub mod tokens;

pub use request::{GroqRequestTransformer, RequestTransformer, normalize};
