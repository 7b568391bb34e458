//! Event Sinks
//!
//! An [`EventSink`] receives the translated lifecycle events in emission
//! order. Implementations must not reorder calls; they are not required to be
//! idempotent.
//!
//! Two sinks ship with the crate:
//! - [`ChannelSink`] hands events to a consumer task over an unbounded channel
//!   (see [`channel`]), so delivery can run concurrently with chunk production
//! - [`CollectingSink`] buffers every event in memory

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use crate::error::{AdapterError, Result};
use crate::types::RuntimeEvent;

/// Receiver of lifecycle events.
///
/// Only [`emit`](Self::emit) is required; the named operations mirror the
/// host runtime's event source API and all route through it.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: RuntimeEvent) -> Result<()>;

    fn text_message_start(&self, message_id: &str) -> Result<()> {
        self.emit(RuntimeEvent::TextMessageStart {
            message_id: message_id.to_string(),
        })
    }

    fn text_message_content(&self, content: &str) -> Result<()> {
        self.emit(RuntimeEvent::TextMessageContent {
            content: content.to_string(),
        })
    }

    fn text_message_end(&self) -> Result<()> {
        self.emit(RuntimeEvent::TextMessageEnd)
    }

    fn action_execution_start(&self, action_execution_id: &str, action_name: &str) -> Result<()> {
        self.emit(RuntimeEvent::ActionExecutionStart {
            action_execution_id: action_execution_id.to_string(),
            action_name: action_name.to_string(),
        })
    }

    fn action_execution_args(&self, args: &str) -> Result<()> {
        self.emit(RuntimeEvent::ActionExecutionArgs {
            args: args.to_string(),
        })
    }

    fn action_execution_end(&self) -> Result<()> {
        self.emit(RuntimeEvent::ActionExecutionEnd)
    }

    fn complete(&self) -> Result<()> {
        self.emit(RuntimeEvent::Complete)
    }
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: RuntimeEvent) -> Result<()> {
        (**self).emit(event)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn emit(&self, event: RuntimeEvent) -> Result<()> {
        (**self).emit(event)
    }
}

/// Create a connected channel sink/receiver pair
pub fn channel() -> (ChannelSink, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSink { tx }, EventReceiver { rx })
}

/// Sink forwarding events into a tokio channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RuntimeEvent>,
}

impl EventSink for ChannelSink {
    fn emit(&self, event: RuntimeEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| AdapterError::SinkClosed)
    }
}

/// Receiving half of [`channel`]; yields events in emission order and ends
/// once every [`ChannelSink`] clone has been dropped.
#[derive(Debug)]
pub struct EventReceiver {
    rx: mpsc::UnboundedReceiver<RuntimeEvent>,
}

impl EventReceiver {
    pub async fn recv(&mut self) -> Option<RuntimeEvent> {
        self.rx.recv().await
    }

    /// Stop accepting events; subsequent emits fail with `SinkClosed`
    pub fn close(&mut self) {
        self.rx.close();
    }
}

impl Stream for EventReceiver {
    type Item = RuntimeEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Sink buffering every event in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<RuntimeEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<RuntimeEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: RuntimeEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| AdapterError::InternalError("event buffer poisoned".to_string()))?
            .push(event);
        Ok(())
    }
}
