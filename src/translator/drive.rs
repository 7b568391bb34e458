//! Async driver feeding a delta stream through the translator into a sink

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::StreamTranslator;
use crate::error::{AdapterError, Result};
use crate::sink::EventSink;
use crate::stream::DeltaStream;
use crate::types::RuntimeEvent;

fn emit_all<S: EventSink + ?Sized>(sink: &S, events: Vec<RuntimeEvent>) -> Result<()> {
    for event in events {
        sink.emit(event)?;
    }
    Ok(())
}

/// Drive `stream` to exhaustion, forwarding every event to `sink` as soon as
/// it is produced.
///
/// The stream is polled only when the previous chunk has been fully
/// translated, so nothing is read ahead of the consumer. Whatever ends the
/// run (exhaustion, an upstream error, cancellation or a failing sink), the
/// open entity is closed and `Complete` is emitted before returning; the
/// first error encountered is returned afterwards.
pub async fn drive<S>(
    mut stream: DeltaStream,
    sink: &S,
    cancel: &CancellationToken,
) -> Result<()>
where
    S: EventSink + ?Sized,
{
    let mut translator = StreamTranslator::new();
    let mut chunks = 0usize;

    let outcome = loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break Err(AdapterError::Cancelled),
            next = stream.next() => next,
        };

        match next {
            Some(Ok(chunk)) => {
                chunks += 1;
                if let Err(e) = emit_all(sink, translator.push(chunk)) {
                    break Err(e);
                }
            }
            Some(Err(e)) => break Err(e),
            None => break Ok(()),
        }
    };

    // Release the upstream connection before finalizing.
    drop(stream);

    let closing = emit_all(sink, translator.finish());
    tracing::debug!(chunks, ok = outcome.is_ok(), "delta stream finished");

    match outcome {
        Ok(()) => closing,
        Err(e) => {
            if let Err(close_err) = closing {
                tracing::debug!(error = %close_err, "could not finalize event sequence");
            }
            Err(e)
        }
    }
}
