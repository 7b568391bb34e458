//! Identifier generation
//!
//! Thread ids are the only random values the adapter produces; generation is
//! kept behind [`IdGenerator`] so tests can make it deterministic.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh identifiers
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random `ck-<uuid v4>` identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        format!("ck-{}", uuid::Uuid::new_v4())
    }
}

/// Deterministic `<prefix>-<n>` identifiers, counting from 1
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
