//! Context assembly from ranked records

use crate::models::ScoredCandidate;
use crate::rag::Retrieval;

/// Assembler for creating context from ranked records
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    /// Create a new context assembler
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    /// Join ranked records as `"{title}: {content}"` lines.
    ///
    /// Records are appended until the length budget would be exceeded; the
    /// best record is always kept. The reported topic is the most common
    /// source tag among kept records, ties going to the first seen.
    #[must_use]
    pub fn assemble(&self, candidates: &[ScoredCandidate]) -> Retrieval {
        let mut lines: Vec<String> = Vec::new();
        let mut kept: Vec<ScoredCandidate> = Vec::new();
        let mut total_length = 0;

        for candidate in candidates {
            let line = candidate.record.context_line();
            // +1 for the joining newline
            let added = line.len() + usize::from(!lines.is_empty());
            if !lines.is_empty() && total_length + added > self.max_context_length {
                break;
            }

            total_length += added;
            lines.push(line);
            kept.push(candidate.clone());
        }

        match majority_source(&kept) {
            Some(detected_topic) => Retrieval::Found {
                context: lines.join("\n"),
                detected_topic,
                records: kept,
            },
            None => Retrieval::NotFound,
        }
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(8000)
    }
}

/// Most frequent source tag; ties resolved by first appearance
fn majority_source(candidates: &[ScoredCandidate]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for candidate in candidates {
        let source = candidate.record.source.as_str();
        match counts.iter_mut().find(|(name, _)| *name == source) {
            Some((_, count)) => *count += 1,
            None => counts.push((source, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name.to_string())
}
