//! Adapter Configuration
//!
//! Everything the adapter needs is carried by an explicit [`AdapterConfig`];
//! there is no process-wide default client.
//!
//! ```rust
//! use groq_runtime_adapter::config::AdapterConfig;
//!
//! let config = AdapterConfig::builder()
//!     .api_key("gsk-test")
//!     .model("llama-3.3-70b-versatile")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
//! ```

use std::collections::HashMap;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AdapterError, Result};

/// Groq's OpenAI-compatible API root
pub const GROQ_DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when neither the config nor the request names one
pub const DEFAULT_MODEL: &str = "llama3-groq-70b-8192-tool-use-preview";

/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default maximum silence between two SSE events
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";
pub const MODEL_ENV: &str = "GROQ_MODEL";

/// Adapter configuration
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// API key sent as bearer token. Never logged.
    pub api_key: SecretString,
    /// API root, default [`GROQ_DEFAULT_BASE_URL`]
    pub base_url: String,
    /// Default model, default [`DEFAULT_MODEL`]
    pub model: String,
    /// Whole-request timeout; `None` (default) lets long streams run
    pub timeout: Option<Duration>,
    /// Connect timeout, default [`DEFAULT_CONNECT_TIMEOUT`]
    pub connect_timeout: Duration,
    /// Maximum silence between SSE events, default [`DEFAULT_IDLE_TIMEOUT`]
    pub idle_timeout: Duration,
    /// Context window override; `None` (default) uses the per-model table
    pub max_context_tokens: Option<usize>,
    /// Extra headers added to every request
    pub headers: HashMap<String, String>,
}

impl AdapterConfig {
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// Build from `GROQ_API_KEY`, `GROQ_BASE_URL` and `GROQ_MODEL`.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            builder = builder.api_key(key);
        }
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            builder = builder.base_url(url);
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            builder = builder.model(model);
        }
        builder.build()
    }
}

/// Builder for [`AdapterConfig`]
#[derive(Debug, Default)]
pub struct AdapterConfigBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    idle_timeout: Option<Duration>,
    max_context_tokens: Option<usize>,
    headers: HashMap<String, String>,
}

impl AdapterConfigBuilder {
    pub fn api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the API root.
    ///
    /// A bare host such as `https://proxy.example.com` gets `/openai/v1`
    /// appended; URLs with a path are used as given.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    pub fn max_context_tokens(mut self, tokens: usize) -> Self {
        self.max_context_tokens = Some(tokens);
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn custom_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn build(self) -> Result<AdapterConfig> {
        let api_key = self
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                AdapterError::ConfigurationError(format!(
                    "missing API key (set it explicitly or via {API_KEY_ENV})"
                ))
            })?;

        let base_url = normalize_base_url(self.base_url.as_deref().unwrap_or(GROQ_DEFAULT_BASE_URL))?;

        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(AdapterError::ConfigurationError(
                "model must not be empty".to_string(),
            ));
        }

        if self.max_context_tokens == Some(0) {
            return Err(AdapterError::ConfigurationError(
                "max_context_tokens must be positive".to_string(),
            ));
        }

        Ok(AdapterConfig {
            api_key,
            base_url,
            model,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            idle_timeout: self.idle_timeout.unwrap_or(DEFAULT_IDLE_TIMEOUT),
            max_context_tokens: self.max_context_tokens,
            headers: self.headers,
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let Some((scheme, rest)) = trimmed.split_once("://") else {
        return Err(AdapterError::ConfigurationError(format!(
            "invalid base URL: {raw}"
        )));
    };
    if !matches!(scheme, "http" | "https") || rest.is_empty() {
        return Err(AdapterError::ConfigurationError(format!(
            "invalid base URL: {raw}"
        )));
    }
    if rest.contains('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/openai/v1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let config = AdapterConfig::builder().api_key("k").build().unwrap();
        assert_eq!(config.base_url, GROQ_DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.idle_timeout, DEFAULT_IDLE_TIMEOUT);
        assert!(config.timeout.is_none());
        assert!(config.max_context_tokens.is_none());
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = AdapterConfig::builder().build().unwrap_err();
        assert!(matches!(err, AdapterError::ConfigurationError(_)));
        let err = AdapterConfig::builder().api_key("  ").build().unwrap_err();
        assert!(matches!(err, AdapterError::ConfigurationError(_)));
    }

    #[test]
    fn bare_host_gets_api_path() {
        let config = AdapterConfig::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:8080/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080/openai/v1");

        let config = AdapterConfig::builder()
            .api_key("k")
            .base_url("https://proxy.example.com/groq/v1/")
            .build()
            .unwrap();
        assert_eq!(config.base_url, "https://proxy.example.com/groq/v1");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = AdapterConfig::builder()
            .api_key("k")
            .base_url("api.groq.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, AdapterError::ConfigurationError(_)));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = AdapterConfig::builder().api_key("gsk-secret").build().unwrap();
        assert!(!format!("{config:?}").contains("gsk-secret"));
    }
}
