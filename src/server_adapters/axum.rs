//! Axum-specific server adapters
//!
//! ```rust,no_run
//! use std::convert::Infallible;
//!
//! use axum::response::sse::{Event, Sse};
//! use groq_runtime_adapter::server_adapters::SseOptions;
//! use groq_runtime_adapter::server_adapters::axum::to_sse_response;
//! use groq_runtime_adapter::sink::EventReceiver;
//!
//! async fn chat_handler(
//!     receiver: EventReceiver,
//! ) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
//!     to_sse_response(receiver, SseOptions::default())
//! }
//! ```

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};

use crate::server_adapters::SseOptions;
use crate::types::RuntimeEvent;

fn to_event(event: &RuntimeEvent, opts: &SseOptions) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    let sse = Event::default().data(data);
    if opts.named_events {
        sse.event(event.event_type())
    } else {
        sse
    }
}

/// Convert runtime events into an Axum SSE response.
///
/// The response keeps the connection alive with periodic comments while the
/// model is thinking.
pub fn to_sse_response<S>(
    stream: S,
    opts: SseOptions,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send>
where
    S: Stream<Item = RuntimeEvent> + Send + 'static,
{
    let event_stream = stream.filter_map(move |event| {
        let sse = opts.forwards(&event).then(|| Ok(to_event(&event, &opts)));
        async move { sse }
    });
    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn builds_sse_response() {
        let events = vec![
            RuntimeEvent::ActionExecutionStart {
                action_execution_id: "call_1".into(),
                action_name: "lookup".into(),
            },
            RuntimeEvent::ActionExecutionEnd,
            RuntimeEvent::Complete,
        ];
        let _sse = to_sse_response(stream::iter(events), SseOptions::default());
    }
}
