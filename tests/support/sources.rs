//! In-process chunk sources

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use groq_runtime_adapter::error::Result;
use groq_runtime_adapter::providers::groq::GroqChatRequest;
use groq_runtime_adapter::stream::{DeltaChunk, DeltaStream};
use groq_runtime_adapter::traits::ChunkSource;

/// Replays a fixed list of deltas, then ends
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    items: Vec<Result<DeltaChunk>>,
    pub opened: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new(chunks: Vec<DeltaChunk>) -> Self {
        Self::with_items(chunks.into_iter().map(Ok).collect())
    }

    pub fn with_items(items: Vec<Result<DeltaChunk>>) -> Self {
        Self {
            items,
            opened: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ChunkSource for ScriptedSource {
    async fn open_stream(&self, _request: GroqChatRequest) -> Result<DeltaStream> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::pin(futures::stream::iter(self.items.clone())))
    }
}

/// Yields `prefix`, then never produces another chunk
#[derive(Debug, Clone, Default)]
pub struct StalledSource {
    pub prefix: Vec<DeltaChunk>,
}

#[async_trait]
impl ChunkSource for StalledSource {
    async fn open_stream(&self, _request: GroqChatRequest) -> Result<DeltaStream> {
        let prefix = futures::stream::iter(self.prefix.clone().into_iter().map(Ok));
        let stalled = futures::stream::pending();
        Ok(Box::pin(futures::StreamExt::chain(prefix, stalled)))
    }
}
