//! `Groq` wire types
//!
//! Request payloads and streaming chunks of the OpenAI-compatible
//! `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};

use crate::stream::{DeltaChunk, ToolCallFragment};

/// Streaming chat-completion request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroqChatRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<GroqTool>,
    pub stream: bool,
}

/// Chat message in vendor shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum GroqMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<GroqToolCall>,
    },
    Tool {
        content: String,
        tool_call_id: String,
    },
}

impl GroqMessage {
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }

    /// Text content used for token accounting
    pub fn content(&self) -> &str {
        match self {
            Self::System { content } | Self::User { content } | Self::Tool { content, .. } => {
                content
            }
            Self::Assistant { content, .. } => content.as_deref().unwrap_or(""),
        }
    }
}

/// Completed tool call recorded in the history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroqToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub r#type: String,
    pub function: GroqFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroqFunctionCall {
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

/// Tool declaration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroqTool {
    #[serde(rename = "type")]
    pub r#type: String,
    pub function: GroqFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroqFunction {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One `chat.completion.chunk` SSE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GroqChatStreamChunk {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<GroqStreamChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqStreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: GroqDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroqDelta {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<GroqToolCallDelta>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqToolCallDelta {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub function: Option<GroqFunctionDelta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroqFunctionDelta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arguments: Option<String>,
}

/// Error envelope returned by the API, both as an HTTP body and inside SSE
#[derive(Debug, Clone, Deserialize)]
pub struct GroqErrorEnvelope {
    pub error: GroqErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqErrorBody {
    pub message: String,
    #[serde(default, rename = "type")]
    pub r#type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl GroqChatStreamChunk {
    /// Reduce the chunk to delta chunks, looking at the first choice only.
    ///
    /// A chunk listing several tool calls is split into one delta per call in
    /// their original order; a chunk without choices becomes a single
    /// payload-less delta.
    pub fn into_delta_chunks(self) -> Vec<DeltaChunk> {
        let Some(choice) = self.choices.into_iter().next() else {
            return vec![DeltaChunk::empty(self.id)];
        };
        let GroqDelta {
            content,
            tool_calls,
        } = choice.delta;

        let calls = tool_calls.unwrap_or_default();
        if calls.is_empty() {
            return vec![DeltaChunk {
                id: self.id,
                content,
                tool_call: None,
            }];
        }

        if calls.len() > 1 {
            tracing::warn!(
                chunk_id = %self.id,
                count = calls.len(),
                "chunk carries several tool calls; splitting them sequentially"
            );
        }

        let mut content = content;
        calls
            .into_iter()
            .map(|call| {
                let function = call.function.unwrap_or_default();
                DeltaChunk {
                    id: self.id.clone(),
                    // Only the first split delta keeps the text.
                    content: content.take(),
                    tool_call: Some(ToolCallFragment {
                        id: call.id,
                        name: function.name,
                        arguments: function.arguments,
                    }),
                }
            })
            .collect()
    }
}
