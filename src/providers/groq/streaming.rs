//! `Groq` Streaming Implementation
//!
//! Turns the SSE body of a streaming chat completion into a [`DeltaStream`].

use std::fmt::Display;
use std::time::Duration;

use eventsource_stream::{Event, Eventsource};
use futures::{Stream, StreamExt};

use super::types::{GroqChatStreamChunk, GroqErrorEnvelope};
use crate::error::AdapterError;
use crate::stream::{DeltaChunk, DeltaStream};

/// Outcome of converting a single SSE event
#[derive(Debug, PartialEq)]
pub enum ConvertedEvent {
    /// Zero or more deltas to hand to the translator
    Chunks(Vec<DeltaChunk>),
    /// The `[DONE]` sentinel
    Done,
    /// Nothing to forward (blank data, keep-alive)
    Skip,
}

/// Groq event converter for SSE events
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqEventConverter;

impl GroqEventConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert one SSE event
    pub fn convert_event(&self, event: &Event) -> Result<ConvertedEvent, AdapterError> {
        let data = event.data.trim();
        tracing::trace!(event = %event.event, data = %data, "groq SSE event");

        if data.is_empty() {
            return Ok(ConvertedEvent::Skip);
        }
        if data == "[DONE]" {
            return Ok(ConvertedEvent::Done);
        }

        let json: serde_json::Value = serde_json::from_str(data)
            .map_err(|e| AdapterError::ParseError(format!("Failed to parse Groq event: {e}")))?;

        if json.get("error").is_some() {
            let message = serde_json::from_value::<GroqErrorEnvelope>(json)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| "An error occurred during streaming".to_string());
            return Err(AdapterError::StreamError(format!("Groq API error: {message}")));
        }

        let chunk: GroqChatStreamChunk = serde_json::from_value(json).map_err(|e| {
            AdapterError::ParseError(format!("Unexpected Groq chunk shape: {e}"))
        })?;
        Ok(ConvertedEvent::Chunks(chunk.into_delta_chunks()))
    }
}

/// Build a delta stream from an SSE byte stream.
///
/// Each wait for the next SSE event is bounded by `idle_timeout`. The stream
/// ends on `[DONE]` or when the body ends, and yields a single error item on
/// the first failure.
pub fn delta_stream_from_bytes<S, B, E>(bytes: S, idle_timeout: Duration) -> DeltaStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let converter = GroqEventConverter::new();
    let stream = async_stream::try_stream! {
        let events = bytes.eventsource();
        futures::pin_mut!(events);

        loop {
            let next = tokio::time::timeout(idle_timeout, events.next())
                .await
                .map_err(|_| {
                    AdapterError::StreamError(format!(
                        "SSE stream idle for more than {}s",
                        idle_timeout.as_secs()
                    ))
                })?;

            let Some(event) = next else {
                tracing::debug!("groq SSE body ended without [DONE]");
                break;
            };
            let event = event
                .map_err(|e| AdapterError::StreamError(format!("SSE parsing error: {e}")))?;

            match converter.convert_event(&event)? {
                ConvertedEvent::Chunks(chunks) => {
                    for chunk in chunks {
                        yield chunk;
                    }
                }
                ConvertedEvent::Done => break,
                ConvertedEvent::Skip => {}
            }
        }
    };
    Box::pin(stream)
}

/// Build a delta stream from a successful streaming HTTP response
pub fn delta_stream_from_response(response: reqwest::Response, idle_timeout: Duration) -> DeltaStream {
    delta_stream_from_bytes(response.bytes_stream(), idle_timeout)
}
