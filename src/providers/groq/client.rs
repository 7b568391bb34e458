//! `Groq` HTTP client
//!
//! Opens streaming chat completions and exposes them as a [`DeltaStream`].

use std::sync::Arc;

use async_trait::async_trait;

use super::streaming::delta_stream_from_response;
use super::types::GroqChatRequest;
use super::utils::{build_headers, parse_api_error};
use crate::config::AdapterConfig;
use crate::error::{AdapterError, Result};
use crate::stream::DeltaStream;
use crate::traits::ChunkSource;

/// `Groq` streaming client
#[derive(Clone)]
pub struct GroqClient {
    config: Arc<AdapterConfig>,
    http_client: reqwest::Client,
}

impl GroqClient {
    /// Create a client with an HTTP client built from the config timeouts
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(|e| {
            AdapterError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Create a client around an existing HTTP client
    pub fn with_http_client(config: AdapterConfig, http_client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

#[async_trait]
impl ChunkSource for GroqClient {
    async fn open_stream(&self, request: GroqChatRequest) -> Result<DeltaStream> {
        let url = self.chat_completions_url();
        let headers = build_headers(&self.config.api_key, &self.config.headers)?;

        tracing::debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "opening groq chat stream"
        );

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| AdapterError::HttpError(format!("Failed to send request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = parse_api_error(status.as_u16(), &body);
            tracing::error!(status = status.as_u16(), error = %error, "groq rejected the request");
            return Err(error);
        }

        Ok(delta_stream_from_response(
            response,
            self.config.idle_timeout,
        ))
    }
}
