//! VIA: a strict knowledge-base chat service.
//!
//! Questions are answered only from a small bundled knowledge base. Records
//! are ranked lexically (no embeddings), the best ones are joined into a
//! context block, and a completion provider is asked to answer from that
//! context alone. When nothing relevant is found the provider is never
//! called and a fixed refusal is returned.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod knowledge;
pub mod llm;
pub mod logging;
pub mod models;
pub mod rag;

#[cfg(test)]
mod config_tests;

pub use config::AppConfig;
pub use errors::*;
