//! CLI command handlers module
//!
//! This module is organized by functional domains:
//! - serve: API server
//! - chat: One-shot questions and retrieval inspection
//! - info: Information display (config)

pub mod chat;
pub mod info;
pub mod serve;

// Re-export all public handlers
pub use chat::*;
pub use info::*;
pub use serve::*;
