//! Vendor providers

pub mod groq;
