//! `Groq` Provider
//!
//! Wire types, SSE decoding and the HTTP client for Groq's OpenAI-compatible
//! chat-completion endpoint.

pub mod client;
pub mod streaming;
pub mod types;
pub mod utils;

pub use client::GroqClient;
pub use streaming::{ConvertedEvent, GroqEventConverter};
pub use types::*;
