//! Shared helpers for integration tests
#![allow(dead_code)]

pub mod sources;
pub mod stream_fixture;

use groq_runtime_adapter::prelude::*;

/// Config pointing at a mock server
pub fn mock_config(uri: &str) -> AdapterConfig {
    AdapterConfig::builder()
        .api_key("test-api-key")
        .base_url(uri)
        .build()
        .expect("valid config")
}

/// Read events until `Complete` (inclusive) or until every sender is gone
pub async fn collect_until_complete(receiver: &mut EventReceiver) -> Vec<RuntimeEvent> {
    let mut events = Vec::new();
    while let Some(event) = receiver.recv().await {
        let done = event == RuntimeEvent::Complete;
        events.push(event);
        if done {
            break;
        }
    }
    events
}
