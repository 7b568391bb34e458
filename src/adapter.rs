//! Adapter entry point
//!
//! [`GroqAdapter::process`] normalizes the request, opens one vendor stream
//! and hands it to a spawned task that translates chunks into lifecycle
//! events. The acknowledgement is returned as soon as the vendor has accepted
//! the request; events keep flowing into the sink afterwards.
//!
//! ```rust,no_run
//! use groq_runtime_adapter::prelude::*;
//!
//! # async fn run() -> Result<(), AdapterError> {
//! let adapter = GroqAdapter::from_env()?;
//! let (sink, mut events) = channel();
//!
//! let request = ChatCompletionRequest::new(vec![Message::user("m1", "Hello!")]);
//! let ack = adapter.process(request, sink).await?;
//! println!("thread {}", ack.thread_id);
//!
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::AdapterConfig;
use crate::error::{AdapterError, Result};
use crate::providers::groq::{GroqChatRequest, GroqClient};
use crate::sink::EventSink;
use crate::traits::ChunkSource;
use crate::transformers::{GroqRequestTransformer, RequestTransformer};
use crate::translator::drive;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::utils::{CancelHandle, IdGenerator, UuidIdGenerator};

/// Groq service adapter
#[derive(Clone)]
pub struct GroqAdapter {
    config: Arc<AdapterConfig>,
    source: Arc<dyn ChunkSource>,
    ids: Arc<dyn IdGenerator>,
    transformer: GroqRequestTransformer,
}

impl GroqAdapter {
    /// Create an adapter talking to Groq over HTTP
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let client = GroqClient::new(config.clone())?;
        Ok(Self::with_source(config, Arc::new(client)))
    }

    /// Create an adapter configured from the environment
    pub fn from_env() -> Result<Self> {
        Self::new(AdapterConfig::from_env()?)
    }

    /// Create an adapter reading deltas from `source`
    pub fn with_source(config: AdapterConfig, source: Arc<dyn ChunkSource>) -> Self {
        let transformer = GroqRequestTransformer::new(config.max_context_tokens);
        Self {
            config: Arc::new(config),
            source,
            ids: Arc::new(UuidIdGenerator),
            transformer,
        }
    }

    /// Replace the thread id generator
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Model used for `request`
    pub fn model_for<'a>(&'a self, request: &'a ChatCompletionRequest) -> &'a str {
        request.model.as_deref().unwrap_or(&self.config.model)
    }

    /// Build the vendor payload for `request` without sending it
    pub fn normalize(&self, request: &ChatCompletionRequest) -> Result<GroqChatRequest> {
        self.transformer
            .transform_chat(&request.messages, &request.actions, self.model_for(request))
    }

    /// Process a request, streaming its events into `sink`.
    ///
    /// Returns once the vendor stream is open. A request the vendor rejects
    /// fails here and emits no event. Failures while streaming end the event
    /// sequence with `Complete` and are logged.
    pub async fn process<S>(
        &self,
        request: ChatCompletionRequest,
        sink: S,
    ) -> Result<ChatCompletionResponse>
    where
        S: EventSink + 'static,
    {
        Ok(self.process_with_handle(request, sink).await?.response)
    }

    /// Like [`process`](Self::process), also returning a handle to cancel or
    /// await the translation task.
    pub async fn process_with_handle<S>(
        &self,
        request: ChatCompletionRequest,
        sink: S,
    ) -> Result<ProcessHandle>
    where
        S: EventSink + 'static,
    {
        let thread_id = request
            .thread_id
            .clone()
            .unwrap_or_else(|| self.ids.generate());
        let model = self.model_for(&request).to_string();
        let payload = self.normalize(&request)?;

        tracing::debug!(
            thread_id = %thread_id,
            model = %model,
            messages = payload.messages.len(),
            tools = payload.tools.len(),
            "processing chat completion"
        );

        let stream = self.source.open_stream(payload).await?;

        let cancel = CancelHandle::new();
        let token = cancel.token().clone();
        let span = tracing::info_span!("groq_stream", thread_id = %thread_id, model = %model);
        let task = tokio::spawn(
            async move {
                let result = drive(stream, &sink, &token).await;
                match &result {
                    Ok(()) => tracing::debug!("event stream completed"),
                    Err(AdapterError::Cancelled) => tracing::debug!("event stream cancelled"),
                    Err(e) => tracing::error!(error = %e, "event stream failed"),
                }
                result
            }
            .instrument(span),
        );

        Ok(ProcessHandle {
            response: ChatCompletionResponse { thread_id },
            task,
            cancel,
        })
    }
}

impl std::fmt::Debug for GroqAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqAdapter")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

/// Handle to a running translation task
#[derive(Debug)]
pub struct ProcessHandle {
    response: ChatCompletionResponse,
    task: JoinHandle<Result<()>>,
    cancel: CancelHandle,
}

impl ProcessHandle {
    pub fn response(&self) -> &ChatCompletionResponse {
        &self.response
    }

    pub fn thread_id(&self) -> &str {
        &self.response.thread_id
    }

    /// Handle that can cancel the task from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stop reading the vendor stream. The event sequence still ends with
    /// the open entity's end event and `Complete`.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task; returns the error that ended the stream, if any
    pub async fn wait(self) -> Result<()> {
        self.task
            .await
            .map_err(|e| AdapterError::InternalError(format!("translation task failed: {e}")))?
    }
}
