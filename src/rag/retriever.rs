//! Candidate selection and ranking over the knowledge store

use std::sync::Arc;

use tracing::debug;

use crate::config::RetrievalConfig;
use crate::config::TopicMode;
use crate::knowledge::KnowledgeStore;
use crate::models::ScoredCandidate;
use crate::rag::scorer::Scorer;
use crate::rag::text::contains_phrase;
use crate::rag::vocabulary::Vocabulary;

/// Outcome of ranking one query, before context assembly
#[derive(Debug, Clone)]
pub struct RankedResults {
    /// Topic the candidates were filtered or ordered by, if any
    pub topic: Option<String>,
    pub intent: Option<String>,
    /// Query tokens after filtering and expansion
    pub tokens: Vec<String>,
    /// Best first, at most `top_k`
    pub candidates: Vec<ScoredCandidate>,
}

/// Lexical retriever for the knowledge store
pub struct Retriever {
    store: Arc<KnowledgeStore>,
    vocabulary: Arc<Vocabulary>,
    config: RetrievalConfig,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(
        store: Arc<KnowledgeStore>,
        vocabulary: Arc<Vocabulary>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            vocabulary,
            config,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Query tokens used for scoring
    pub fn query_tokens(&self, query: &str) -> Vec<String> {
        let tokens = self.vocabulary.meaningful_tokens(query);
        if self.config.expand_synonyms {
            self.vocabulary.expand_meaning(&tokens)
        } else {
            tokens
        }
    }

    /// Score, filter, sort and truncate. A forced topic takes precedence
    /// over the one detected from the query.
    ///
    /// A record whose full title appears in the query is never dropped by
    /// topic restriction and sorts with the on-topic block.
    pub fn rank(&self, query: &str, forced_topic: Option<&str>) -> RankedResults {
        let topic = forced_topic
            .map(str::to_string)
            .or_else(|| self.vocabulary.detect_topic(query));
        let intent = self.vocabulary.detect_intent(query);
        let tokens = self.query_tokens(query);

        debug!(
            "Ranking query: topic={:?} intent={:?} tokens={:?}",
            topic, intent, tokens
        );

        let scorer = Scorer::new(&self.config, &self.vocabulary);
        let restrict = self.config.topic_mode == TopicMode::Restrict;

        let mut scored: Vec<(bool, ScoredCandidate)> = self
            .store
            .records()
            .iter()
            .filter_map(|record| {
                let on_topic = topic.as_deref() == Some(record.source.as_str());
                let pinned = on_topic || contains_phrase(query, &record.title);
                if restrict && topic.is_some() && !pinned {
                    return None;
                }

                let score = scorer.score(record, &tokens, intent.as_deref());
                (score > self.config.min_score).then(|| {
                    (
                        pinned,
                        ScoredCandidate {
                            record: record.clone(),
                            score,
                        },
                    )
                })
            })
            .collect();

        // stable: equal keys keep store order
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.score.total_cmp(&a.1.score)));
        scored.truncate(self.config.top_k);

        debug!(
            "Kept {} of {} records",
            scored.len(),
            self.store.len()
        );

        RankedResults {
            topic,
            intent,
            tokens,
            candidates: scored.into_iter().map(|(_, c)| c).collect(),
        }
    }
}
