//! Lifecycle events emitted towards the host runtime

use serde::{Deserialize, Serialize};

/// A normalized streaming event.
///
/// Every `*Start` is followed by exactly one matching `*End` before the next
/// start of any kind, and `Complete` is always the final event of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum RuntimeEvent {
    TextMessageStart {
        message_id: String,
    },
    TextMessageContent {
        content: String,
    },
    TextMessageEnd,
    ActionExecutionStart {
        action_execution_id: String,
        action_name: String,
    },
    ActionExecutionArgs {
        args: String,
    },
    ActionExecutionEnd,
    Complete,
}

impl RuntimeEvent {
    /// Whether this event opens an entity
    pub fn is_start(&self) -> bool {
        matches!(
            self,
            Self::TextMessageStart { .. } | Self::ActionExecutionStart { .. }
        )
    }

    /// Whether this event closes an entity
    pub fn is_end(&self) -> bool {
        matches!(self, Self::TextMessageEnd | Self::ActionExecutionEnd)
    }

    /// Event name as used on the wire
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TextMessageStart { .. } => "TextMessageStart",
            Self::TextMessageContent { .. } => "TextMessageContent",
            Self::TextMessageEnd => "TextMessageEnd",
            Self::ActionExecutionStart { .. } => "ActionExecutionStart",
            Self::ActionExecutionArgs { .. } => "ActionExecutionArgs",
            Self::ActionExecutionEnd => "ActionExecutionEnd",
            Self::Complete => "Complete",
        }
    }
}
