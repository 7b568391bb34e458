//! Test fixtures utilities: load SSE streaming bodies and build byte streams

use std::io;

/// Path of a fixture under `tests/fixtures/groq`
pub fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/groq/{name}", env!("CARGO_MANIFEST_DIR"))
}

/// Load an `.sse` fixture as a response body with normalized line endings
pub fn load_sse_fixture(name: &str) -> String {
    let raw = std::fs::read_to_string(fixture_path(name)).expect("fixture exists");
    raw.replace("\r\n", "\n")
}

/// Load an `.sse` fixture and split it into one byte chunk per SSE event
pub fn load_sse_fixture_as_bytes(name: &str) -> Vec<Result<Vec<u8>, io::Error>> {
    load_sse_fixture(name)
        .split("\n\n")
        .map(|chunk| chunk.trim_end_matches('\n'))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| Ok(format!("{chunk}\n\n").into_bytes()))
        .collect()
}
