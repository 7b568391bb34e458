//! Request normalization
//!
//! Converts the host runtime's messages and actions into a Groq
//! `GroqChatRequest`. The conversion is pure: identical input always yields
//! a byte-identical payload.

use super::tokens::{limit_messages_to_token_count, max_tokens_for_model};
use crate::error::{AdapterError, Result};
use crate::providers::groq::{
    GroqChatRequest, GroqFunction, GroqFunctionCall, GroqMessage, GroqTool, GroqToolCall,
};
use crate::types::{ActionInput, Message, MessageRole};

/// Transform domain input into a provider-specific request
pub trait RequestTransformer: Send + Sync {
    /// Provider identifier
    fn provider_id(&self) -> &str;

    fn transform_chat(
        &self,
        messages: &[Message],
        actions: &[ActionInput],
        model: &str,
    ) -> Result<GroqChatRequest>;
}

/// Groq request transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqRequestTransformer {
    /// Overrides the per-model context window
    pub max_context_tokens: Option<usize>,
}

impl GroqRequestTransformer {
    pub fn new(max_context_tokens: Option<usize>) -> Self {
        Self { max_context_tokens }
    }
}

impl RequestTransformer for GroqRequestTransformer {
    fn provider_id(&self) -> &str {
        "groq"
    }

    fn transform_chat(
        &self,
        messages: &[Message],
        actions: &[ActionInput],
        model: &str,
    ) -> Result<GroqChatRequest> {
        let tools = actions
            .iter()
            .map(convert_action)
            .collect::<Result<Vec<_>>>()?;
        let converted = messages
            .iter()
            .map(convert_message)
            .collect::<Result<Vec<_>>>()?;

        let budget = self
            .max_context_tokens
            .unwrap_or_else(|| max_tokens_for_model(model));
        let messages = limit_messages_to_token_count(converted, &tools, budget)?;

        Ok(GroqChatRequest {
            model: model.to_string(),
            messages,
            tools,
            stream: true,
        })
    }
}

/// Normalize with the per-model context window
pub fn normalize(
    messages: &[Message],
    actions: &[ActionInput],
    model: &str,
) -> Result<GroqChatRequest> {
    GroqRequestTransformer::default().transform_chat(messages, actions, model)
}

/// Convert an action into a function tool declaration
pub fn convert_action(action: &ActionInput) -> Result<GroqTool> {
    let parameters: serde_json::Value = serde_json::from_str(&action.json_schema).map_err(|e| {
        AdapterError::InvalidInput(format!(
            "action '{}' has an invalid JSON schema: {e}",
            action.name
        ))
    })?;
    Ok(GroqTool {
        r#type: "function".to_string(),
        function: GroqFunction {
            name: action.name.clone(),
            description: action.description.clone(),
            parameters,
        },
    })
}

/// Convert a history entry into a vendor message
pub fn convert_message(message: &Message) -> Result<GroqMessage> {
    Ok(match message {
        Message::Text { role, content, .. } => {
            let content = content.clone();
            match role {
                MessageRole::System => GroqMessage::System { content },
                MessageRole::User => GroqMessage::User { content },
                MessageRole::Assistant => GroqMessage::Assistant {
                    content: Some(content),
                    tool_calls: Vec::new(),
                },
            }
        }
        Message::ActionExecution {
            id,
            name,
            arguments,
        } => GroqMessage::Assistant {
            content: None,
            tool_calls: vec![GroqToolCall {
                id: id.clone(),
                r#type: "function".to_string(),
                function: GroqFunctionCall {
                    name: name.clone(),
                    arguments: serde_json::to_string(arguments)?,
                },
            }],
        },
        Message::Result {
            action_execution_id,
            result,
            ..
        } => GroqMessage::Tool {
            content: result.clone(),
            tool_call_id: action_execution_id.clone(),
        },
    })
}
