//! Adapter request and acknowledgement

use serde::{Deserialize, Serialize};

use super::{ActionInput, Message};

/// A chat-completion request issued by the host runtime.
///
/// The event sink is passed next to the request, see
/// [`GroqAdapter::process`](crate::adapter::GroqAdapter::process).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletionRequest {
    /// Thread identifier; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Target model; the adapter default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<Message>,
    #[serde(default)]
    pub actions: Vec<ActionInput>,
}

impl ChatCompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_actions(mut self, actions: Vec<ActionInput>) -> Self {
        self.actions = actions;
        self
    }
}

/// Acknowledgement returned once the vendor stream is open
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatCompletionResponse {
    pub thread_id: String,
}
