//! `Groq` Utility Functions

use std::collections::HashMap;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use super::types::GroqErrorEnvelope;
use crate::error::{AdapterError, Result};

/// Build request headers: bearer auth, JSON body, SSE response, then any
/// custom headers.
pub fn build_headers(
    api_key: &SecretString,
    custom_headers: &HashMap<String, String>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
        .map_err(|e| AdapterError::ConfigurationError(format!("Invalid API key: {e}")))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));

    for (key, value) in custom_headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            AdapterError::ConfigurationError(format!("Invalid header name '{key}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            AdapterError::ConfigurationError(format!("Invalid header value for '{key}': {e}"))
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Map a non-success HTTP response body to an `ApiError`.
///
/// Groq answers with `{"error": {"message", "type", "code"}}`; anything else
/// is passed through verbatim.
pub fn parse_api_error(status: u16, body: &str) -> AdapterError {
    let details = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = details
        .clone()
        .and_then(|value| serde_json::from_value::<GroqErrorEnvelope>(value).ok())
        .map(|envelope| {
            let error = envelope.error;
            match (error.code, error.r#type) {
                (Some(code), _) => format!("{} ({code})", error.message),
                (None, Some(kind)) => format!("{} ({kind})", error.message),
                (None, None) => error.message,
            }
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });

    AdapterError::ApiError {
        code: status,
        message,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_include_auth_and_custom_entries() {
        let key = SecretString::from("gsk-test".to_string());
        let mut custom = HashMap::new();
        custom.insert("x-trace".to_string(), "abc".to_string());
        let headers = build_headers(&key, &custom).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer gsk-test");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers["x-trace"], "abc");
    }

    #[test]
    fn invalid_header_name_is_a_configuration_error() {
        let key = SecretString::from("k".to_string());
        let mut custom = HashMap::new();
        custom.insert("bad header".to_string(), "v".to_string());
        assert!(matches!(
            build_headers(&key, &custom),
            Err(AdapterError::ConfigurationError(_))
        ));
    }

    #[test]
    fn parses_groq_error_envelope() {
        let body = r#"{"error":{"message":"The model `nope` does not exist","type":"invalid_request_error","code":"model_not_found"}}"#;
        let err = parse_api_error(404, body);
        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().contains("model_not_found"));
    }

    #[test]
    fn keeps_unstructured_bodies() {
        let err = parse_api_error(502, "Bad Gateway");
        assert!(err.to_string().contains("Bad Gateway"));
        let err = parse_api_error(500, "");
        assert!(err.to_string().contains("HTTP 500"));
    }
}
