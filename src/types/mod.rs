//! Core Types
//!
//! Domain messages and actions handed over by the host runtime, the
//! lifecycle events sent back to it, and the request/acknowledgement pair
//! of the adapter entry point.

pub mod actions;
pub mod events;
pub mod messages;
pub mod request;

pub use actions::ActionInput;
pub use events::RuntimeEvent;
pub use messages::{Message, MessageRole};
pub use request::{ChatCompletionRequest, ChatCompletionResponse};
