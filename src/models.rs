use serde::Deserialize;
use serde::Serialize;

/// Knowledge base entry, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    pub title: String,
    pub content: String,
    /// Topic tag, taken from the data file the record was loaded from
    pub source: String,
}

impl KnowledgeRecord {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source: source.into(),
        }
    }

    /// Line used when the record is placed in a prompt context
    pub fn context_line(&self) -> String {
        format!("{}: {}", self.title, self.content)
    }
}

/// Record shape inside a data file; the source tag is attached on load
#[derive(Debug, Clone, Deserialize)]
pub struct RawKnowledgeRecord {
    pub title: String,
    pub content: String,
}

/// A record with its relevance score for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub record: KnowledgeRecord,
    pub score: f64,
}
