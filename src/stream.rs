//! Raw delta stream
//!
//! A [`DeltaStream`] is the lazily produced, finite and non-restartable
//! sequence of [`DeltaChunk`]s read from the vendor. Chunks are consumed one
//! at a time and dropped after the translator has looked at them.

use std::pin::Pin;

use futures::Stream;

use crate::error::AdapterError;

/// Stream of vendor deltas in arrival order
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<DeltaChunk, AdapterError>> + Send>>;

/// One incremental unit of a streamed completion.
///
/// A chunk carries at most one of `content` and `tool_call`; both may be
/// absent for control-only frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaChunk {
    /// Vendor chunk identifier
    pub id: String,
    /// Text fragment
    pub content: Option<String>,
    /// Tool-call fragment
    pub tool_call: Option<ToolCallFragment>,
}

/// Partial tool call.
///
/// `id` and `name` are only populated on the fragment that starts a call;
/// continuation fragments carry `arguments` only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallFragment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments: Option<String>,
}

impl DeltaChunk {
    /// A chunk without payload
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// A chunk carrying a text fragment
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: Some(content.into()),
            tool_call: None,
        }
    }

    /// A chunk starting a new tool call
    pub fn tool_call_start(
        id: impl Into<String>,
        call_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            content: None,
            tool_call: Some(ToolCallFragment {
                id: Some(call_id.into()),
                name: Some(name.into()),
                arguments: None,
            }),
        }
    }

    /// A chunk continuing the current tool call with an argument fragment
    pub fn tool_call_args(id: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            tool_call: Some(ToolCallFragment {
                id: None,
                name: None,
                arguments: Some(arguments.into()),
            }),
        }
    }

    /// Attach an argument fragment to the chunk's tool call
    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        let fragment = self.tool_call.get_or_insert_with(ToolCallFragment::default);
        fragment.arguments = Some(arguments.into());
        self
    }
}
