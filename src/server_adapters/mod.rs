//! Server adapters: forward runtime events to HTTP clients
//!
//! Helpers turning a stream of [`RuntimeEvent`]s (typically an
//! [`EventReceiver`](crate::sink::EventReceiver)) into something a web
//! framework can write to the response.
//!
//! - **Framework-agnostic helpers**: `text_stream()`, `sse_lines()`
//! - **Axum integration**: `axum::to_sse_response()` (requires `server-adapters` feature)
//!
//! ```rust,no_run
//! use groq_runtime_adapter::server_adapters::{sse_lines, SseOptions};
//! use groq_runtime_adapter::sink::channel;
//!
//! let (_sink, receiver) = channel();
//! let sse = sse_lines(receiver, SseOptions::default());
//! ```

use std::pin::Pin;

use futures::{Stream, StreamExt};

use crate::types::RuntimeEvent;

#[cfg(feature = "server-adapters")]
pub mod axum;

/// Options for SSE encoding.
#[derive(Debug, Clone)]
pub struct SseOptions {
    /// Whether to write an `event: <type>` line before each data line.
    ///
    /// The event type is always present in the JSON payload.
    /// Default: `true`
    pub named_events: bool,

    /// Whether to forward the terminal `Complete` event.
    ///
    /// Default: `true`
    pub include_complete: bool,
}

impl Default for SseOptions {
    fn default() -> Self {
        Self {
            named_events: true,
            include_complete: true,
        }
    }
}

impl SseOptions {
    /// Data-only frames, for clients that ignore the `event:` field
    pub fn data_only() -> Self {
        Self {
            named_events: false,
            ..Default::default()
        }
    }

    fn forwards(&self, event: &RuntimeEvent) -> bool {
        self.include_complete || !matches!(event, RuntimeEvent::Complete)
    }
}

/// Encode one event as an SSE frame
pub fn sse_frame(event: &RuntimeEvent, opts: &SseOptions) -> String {
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    if opts.named_events {
        format!("event: {}\ndata: {}\n\n", event.event_type(), data)
    } else {
        format!("data: {data}\n\n")
    }
}

/// Convert runtime events into SSE lines ("event: X\n" + "data: ...\n\n").
///
/// The consumer can write each yielded string to the HTTP response. The
/// data line carries the event as JSON, e.g.
/// `{"type":"TextMessageContent","content":"Hi"}`.
pub fn sse_lines<S>(stream: S, opts: SseOptions) -> Pin<Box<dyn Stream<Item = String> + Send>>
where
    S: Stream<Item = RuntimeEvent> + Send + 'static,
{
    let s = stream.filter_map(move |event| {
        let frame = opts.forwards(&event).then(|| sse_frame(&event, &opts));
        async move { frame }
    });
    Box::pin(s)
}

/// Convert runtime events into a plain text stream of message content.
/// Action events and lifecycle markers are ignored.
pub fn text_stream<S>(stream: S) -> Pin<Box<dyn Stream<Item = String> + Send>>
where
    S: Stream<Item = RuntimeEvent> + Send + 'static,
{
    let s = stream.filter_map(|event| async move {
        match event {
            RuntimeEvent::TextMessageContent { content } => Some(content),
            _ => None,
        }
    });
    Box::pin(s)
}
