//! Token budget estimation and history trimming
//!
//! Token counts are a cheap estimate (one token per three characters), which
//! is all the trimming needs: it only has to stay on the safe side of the
//! context window, never to match the vendor tokenizer.

use crate::providers::groq::{GroqMessage, GroqTool};
use crate::error::{AdapterError, Result};

/// Context window used for models missing from [`MODEL_CONTEXT_WINDOWS`]
pub const DEFAULT_MAX_TOKENS: usize = 128_000;

/// Known context windows, in tokens
pub const MODEL_CONTEXT_WINDOWS: &[(&str, usize)] = &[
    ("llama3-groq-70b-8192-tool-use-preview", 8_192),
    ("llama3-groq-8b-8192-tool-use-preview", 8_192),
    ("llama3-70b-8192", 8_192),
    ("llama3-8b-8192", 8_192),
    ("llama-3.1-8b-instant", 131_072),
    ("llama-3.1-70b-versatile", 131_072),
    ("llama-3.3-70b-versatile", 131_072),
    ("mixtral-8x7b-32768", 32_768),
    ("gemma2-9b-it", 8_192),
];

/// Context window for `model`
pub fn max_tokens_for_model(model: &str) -> usize {
    MODEL_CONTEXT_WINDOWS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, tokens)| *tokens)
        .unwrap_or(DEFAULT_MAX_TOKENS)
}

/// Estimated token count of `text`, rounded up
pub fn count_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(3)
}

/// Estimated token count of the serialized tool declarations
pub fn count_tools_tokens(tools: &[GroqTool]) -> Result<usize> {
    if tools.is_empty() {
        return Ok(0);
    }
    let json = serde_json::to_string(tools)?;
    Ok(count_tokens(&json))
}

/// Estimated token count of a message: its content plus, for assistant
/// messages, the name and arguments of every recorded tool call
pub fn count_message_tokens(message: &GroqMessage) -> usize {
    let content = count_tokens(message.content());
    match message {
        GroqMessage::Assistant { tool_calls, .. } => tool_calls.iter().fold(content, |acc, call| {
            acc + count_tokens(&call.function.name) + count_tokens(&call.function.arguments)
        }),
        _ => content,
    }
}

/// Trim `messages` so that they, together with `tools`, fit into
/// `max_tokens`.
///
/// Tool declarations are reserved first, then every system message. The
/// remaining budget is filled with the newest messages walking backwards; the
/// first message that does not fit cuts off everything older than it (system
/// messages excepted). Relative order is preserved.
pub fn limit_messages_to_token_count(
    messages: Vec<GroqMessage>,
    tools: &[GroqTool],
    max_tokens: usize,
) -> Result<Vec<GroqMessage>> {
    let tools_tokens = count_tools_tokens(tools)?;
    if tools_tokens > max_tokens {
        return Err(AdapterError::TokenBudgetExceeded {
            reason: "too many tokens in function definitions".to_string(),
            required: tools_tokens,
            available: max_tokens,
        });
    }
    let mut remaining = max_tokens - tools_tokens;

    let system_tokens: usize = messages
        .iter()
        .filter(|m| m.is_system())
        .map(count_message_tokens)
        .sum();
    if system_tokens > remaining {
        return Err(AdapterError::TokenBudgetExceeded {
            reason: "not enough tokens for system messages".to_string(),
            required: system_tokens,
            available: remaining,
        });
    }
    remaining -= system_tokens;

    let total = messages.len();
    let mut kept = Vec::with_capacity(total);
    let mut cutoff = false;
    for message in messages.into_iter().rev() {
        if message.is_system() {
            kept.push(message);
            continue;
        }
        if cutoff {
            continue;
        }
        let tokens = count_message_tokens(&message);
        if tokens > remaining {
            cutoff = true;
            continue;
        }
        remaining -= tokens;
        kept.push(message);
    }
    kept.reverse();

    if kept.len() < total {
        tracing::debug!(
            dropped = total - kept.len(),
            kept = kept.len(),
            max_tokens,
            "trimmed message history to fit the context window"
        );
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::groq::{GroqFunction, GroqFunctionCall, GroqToolCall};

    fn user(content: &str) -> GroqMessage {
        GroqMessage::User {
            content: content.to_string(),
        }
    }

    fn system(content: &str) -> GroqMessage {
        GroqMessage::System {
            content: content.to_string(),
        }
    }

    fn tool_call(id: &str, arguments: String) -> GroqMessage {
        GroqMessage::Assistant {
            content: None,
            tool_calls: vec![GroqToolCall {
                id: id.to_string(),
                r#type: "function".into(),
                function: GroqFunctionCall {
                    name: "search".into(),
                    arguments,
                },
            }],
        }
    }

    #[test]
    fn tool_call_arguments_count_towards_the_budget() {
        let message = tool_call("call_1", "a".repeat(30));
        // "search" = 2 tokens, 30 chars of arguments = 10 tokens
        assert_eq!(count_message_tokens(&message), 12);
    }

    #[test]
    fn large_tool_calls_are_trimmed() {
        let messages = vec![
            tool_call("call_1", "x".repeat(3000)),
            tool_call("call_2", "y".repeat(3000)),
            user("ok"),
        ];
        let kept = limit_messages_to_token_count(messages, &[], 10).unwrap();
        assert_eq!(kept, vec![user("ok")]);
        let used: usize = kept.iter().map(count_message_tokens).sum();
        assert!(used <= 10);
    }

    #[test]
    fn counts_a_token_per_three_chars_rounding_up() {
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("abc"), 1);
        assert_eq!(count_tokens("abcd"), 2);
        assert_eq!(count_tokens("ééé"), 1);
    }

    #[test]
    fn looks_up_context_windows() {
        assert_eq!(max_tokens_for_model("llama3-groq-70b-8192-tool-use-preview"), 8_192);
        assert_eq!(max_tokens_for_model("unknown-model"), DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn keeps_everything_within_budget() {
        let messages = vec![system("sys"), user("one"), user("two")];
        let kept = limit_messages_to_token_count(messages.clone(), &[], 100).unwrap();
        assert_eq!(kept, messages);
    }

    #[test]
    fn drops_oldest_messages_first_and_keeps_system() {
        // 3 chars = 1 token each; budget 3 = system + two newest.
        let messages = vec![
            system("sys"),
            user("old"),
            user("mid"),
            user("new"),
        ];
        let kept = limit_messages_to_token_count(messages, &[], 3).unwrap();
        assert_eq!(kept, vec![system("sys"), user("mid"), user("new")]);
    }

    #[test]
    fn cutoff_drops_smaller_older_messages_too() {
        let messages = vec![user("a"), user(&"x".repeat(30)), user("b")];
        let kept = limit_messages_to_token_count(messages, &[], 5).unwrap();
        assert_eq!(kept, vec![user("b")]);
    }

    #[test]
    fn system_messages_must_fit() {
        let err = limit_messages_to_token_count(vec![system(&"s".repeat(30))], &[], 5)
            .unwrap_err();
        assert!(matches!(err, AdapterError::TokenBudgetExceeded { .. }));
    }

    #[test]
    fn tools_are_reserved_first() {
        let tools = vec![GroqTool {
            r#type: "function".into(),
            function: GroqFunction {
                name: "lookup".into(),
                description: "Look something up".into(),
                parameters: serde_json::json!({"type": "object"}),
            },
        }];
        let tool_tokens = count_tools_tokens(&tools).unwrap();
        assert!(tool_tokens > 0);

        let err = limit_messages_to_token_count(vec![], &tools, tool_tokens - 1).unwrap_err();
        assert!(matches!(err, AdapterError::TokenBudgetExceeded { .. }));

        let kept =
            limit_messages_to_token_count(vec![user("abc")], &tools, tool_tokens).unwrap();
        assert!(kept.is_empty());
    }
}
