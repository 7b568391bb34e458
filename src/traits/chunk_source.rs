//! Upstream delta source

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::groq::GroqChatRequest;
use crate::stream::DeltaStream;

/// Something that can open a streaming chat completion.
///
/// `open_stream` resolves once the vendor has accepted the request; a
/// rejection is returned here, before any chunk exists. Failures after that
/// point arrive as error items on the returned stream.
#[async_trait]
pub trait ChunkSource: Send + Sync {
    async fn open_stream(&self, request: GroqChatRequest) -> Result<DeltaStream>;
}
