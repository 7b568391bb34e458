//! Capability traits

mod chunk_source;

pub use chunk_source::ChunkSource;
