//! Retrieval-augmented chat over the bundled knowledge base
//!
//! The flow for one message is:
//! - Normalize and tokenize the query ([`text`])
//! - Detect topic and intent, drop stopwords, expand synonyms ([`vocabulary`])
//! - Score every candidate record ([`scorer`]) and rank them ([`retriever`])
//! - Join the top records into a context block ([`context`])
//! - Ask the completion provider, or refuse when nothing was found ([`pipeline`])
//!
//! # Examples
//!
//! ```rust,no_run
//! use viarag::config::AppConfig;
//! use viarag::rag::RagService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (config, _) = AppConfig::load()?;
//!     let service = RagService::new(&config)?;
//!
//!     let reply = service.reply("Who is Dr. Willingham?", None).await?;
//!     println!("{}", reply.reply);
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod retriever;
pub mod scorer;
pub mod text;
pub mod vocabulary;

pub use context::ContextAssembler;
pub use pipeline::ChatReply;
pub use pipeline::RagService;
pub use pipeline::ReplyOutcome;
pub use retriever::RankedResults;
pub use retriever::Retriever;
pub use scorer::Scorer;
pub use vocabulary::Vocabulary;

use crate::models::ScoredCandidate;

/// Result of context retrieval for one query
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    Found {
        /// Kept records as `"{title}: {content}"` lines
        context: String,
        /// Most common source tag among the kept records
        detected_topic: String,
        records: Vec<ScoredCandidate>,
    },
    /// Nothing scored above the threshold
    NotFound,
}

impl Retrieval {
    /// Display form of [`Retrieval::NotFound`]
    pub const NOT_FOUND_SENTINEL: &'static str = "NO_CONTEXT_FOUND";

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Context block, or the sentinel when nothing was found
    pub fn context(&self) -> &str {
        match self {
            Self::Found { context, .. } => context,
            Self::NotFound => Self::NOT_FOUND_SENTINEL,
        }
    }

    pub fn detected_topic(&self) -> Option<&str> {
        match self {
            Self::Found { detected_topic, .. } => Some(detected_topic),
            Self::NotFound => None,
        }
    }

    pub fn records(&self) -> &[ScoredCandidate] {
        match self {
            Self::Found { records, .. } => records,
            Self::NotFound => &[],
        }
    }
}
