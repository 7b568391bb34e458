//! Utility modules
//!
//! Cancellation handles and identifier generation shared by the adapter.

pub mod cancel;
pub mod id;

pub use cancel::CancelHandle;
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
