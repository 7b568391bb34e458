//! Conversation history as seen by the host runtime

use serde::{Deserialize, Serialize};

/// Role of a text message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One entry of the message history.
///
/// Besides plain text, the history records earlier action executions and
/// their results so the model can see what it already invoked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Message {
    /// Free-form text authored by the system, the user or the assistant
    #[serde(rename = "TextMessage")]
    Text {
        id: String,
        role: MessageRole,
        content: String,
    },
    /// An action the assistant invoked
    #[serde(rename = "ActionExecutionMessage")]
    ActionExecution {
        id: String,
        name: String,
        arguments: serde_json::Value,
    },
    /// The outcome of an earlier action execution
    #[serde(rename = "ResultMessage")]
    Result {
        id: String,
        action_execution_id: String,
        action_name: String,
        result: String,
    },
}

impl Message {
    /// Creates a system message
    pub fn system(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::text(id, MessageRole::System, content)
    }

    /// Creates a user message
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::text(id, MessageRole::User, content)
    }

    /// Creates an assistant message
    pub fn assistant(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::text(id, MessageRole::Assistant, content)
    }

    pub fn text(id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self::Text {
            id: id.into(),
            role,
            content: content.into(),
        }
    }

    /// Creates an action execution record
    pub fn action_execution(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self::ActionExecution {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Creates an action result record
    pub fn action_result(
        id: impl Into<String>,
        action_execution_id: impl Into<String>,
        action_name: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self::Result {
            id: id.into(),
            action_execution_id: action_execution_id.into(),
            action_name: action_name.into(),
            result: result.into(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Text { id, .. } | Self::ActionExecution { id, .. } | Self::Result { id, .. } => id,
        }
    }
}
