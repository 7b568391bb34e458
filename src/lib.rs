//! # groq-runtime-adapter
//!
//! Streams Groq chat completions into a normalized lifecycle event protocol.
//!
#![deny(unsafe_code)]

//! The vendor interleaves plain text and tool-call fragments in a single
//! delta stream. This crate turns that stream into a strictly nested event
//! sequence for an agent runtime: a text message or an action execution is
//! opened, fed, and closed, never both at once, and every run ends with a
//! single `Complete`.
//!
//! ## Features
//!
//! - **Request normalization**: host messages and actions become a Groq
//!   payload trimmed to the model's context window
//! - **Stream translation**: a small state machine over per-chunk signals
//! - **Event sinks**: a trait with channel and collecting implementations
//! - **Cancellation**: every run can be stopped and still ends cleanly
//! - **Server adapters**: SSE encoding, with Axum support behind the
//!   `server-adapters` feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use groq_runtime_adapter::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AdapterConfig::builder()
//!         .api_key("your-api-key")
//!         .model("llama-3.3-70b-versatile")
//!         .build()?;
//!     let adapter = GroqAdapter::new(config)?;
//!
//!     let (sink, mut events) = channel();
//!     let request = ChatCompletionRequest::new(vec![
//!         Message::system("s", "You are terse."),
//!         Message::user("u1", "Say hi."),
//!     ]);
//!     adapter.process(request, sink).await?;
//!
//!     while let Some(event) = events.recv().await {
//!         if let RuntimeEvent::TextMessageContent { content } = event {
//!             print!("{content}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod providers;
pub mod server_adapters;
pub mod sink;
pub mod stream;
pub mod telemetry;
pub mod traits;
pub mod transformers;
pub mod translator;
pub mod types;
pub mod utils;

pub use adapter::{GroqAdapter, ProcessHandle};
pub use config::AdapterConfig;
pub use error::{AdapterError, ErrorCategory, Result};
pub use sink::{ChannelSink, CollectingSink, EventReceiver, EventSink, channel};
pub use types::{
    ActionInput, ChatCompletionRequest, ChatCompletionResponse, Message, MessageRole,
    RuntimeEvent,
};

/// Commonly used items
pub mod prelude {
    pub use crate::adapter::{GroqAdapter, ProcessHandle};
    pub use crate::config::AdapterConfig;
    pub use crate::error::{AdapterError, ErrorCategory};
    pub use crate::sink::{ChannelSink, CollectingSink, EventReceiver, EventSink, channel};
    pub use crate::traits::ChunkSource;
    pub use crate::types::{
        ActionInput, ChatCompletionRequest, ChatCompletionResponse, Message, MessageRole,
        RuntimeEvent,
    };
    pub use crate::utils::CancelHandle;
}
