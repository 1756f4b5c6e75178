//! Relevance scoring: best-sentence fuzzy similarity plus fixed boosts
//!
//! A record's base score is the best score of any single sentence of its
//! content, where a sentence earns points for every (query token, sentence
//! token) pair that is similar enough. Boosts are then added once per
//! condition:
//!
//! - a query token equals the record's source tag
//! - a query token is a keyword of the record's topic
//! - per query token found inside the normalized title
//! - the detected intent name is found inside the normalized title

use crate::config::RetrievalConfig;
use crate::models::KnowledgeRecord;
use crate::rag::text::normalize;
use crate::rag::text::split_sentences;
use crate::rag::text::tokenize;
use crate::rag::vocabulary::Vocabulary;

/// Scores records against one query's tokens
pub struct Scorer<'a> {
    config: &'a RetrievalConfig,
    vocabulary: &'a Vocabulary,
}

impl<'a> Scorer<'a> {
    pub const fn new(config: &'a RetrievalConfig, vocabulary: &'a Vocabulary) -> Self {
        Self { config, vocabulary }
    }

    /// Character similarity in [0, 1]
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }

        let a_len = a.chars().count();
        let b_len = b.chars().count();
        let (shorter, shorter_len, longer, longer_len) = if a_len <= b_len {
            (a, a_len, b, b_len)
        } else {
            (b, b_len, a, a_len)
        };

        if shorter_len >= self.config.min_containment_len && longer.contains(shorter) {
            return self.config.containment_similarity;
        }
        if longer_len == 0 {
            return 0.0;
        }

        let same_position = shorter
            .chars()
            .zip(longer.chars())
            .filter(|(x, y)| x == y)
            .count();
        same_position as f64 / longer_len as f64
    }

    /// Points awarded for one token pair
    pub fn points(&self, similarity: f64) -> f64 {
        if similarity > self.config.exact_threshold {
            self.config.exact_points
        } else if similarity > self.config.strong_threshold {
            self.config.strong_points
        } else if similarity > self.config.weak_threshold {
            self.config.weak_points
        } else {
            0.0
        }
    }

    /// Points for one sentence: sum over all token pairs
    pub fn sentence_score(&self, sentence: &str, query_tokens: &[String]) -> f64 {
        let sentence_tokens: Vec<String> = tokenize(sentence)
            .into_iter()
            .filter(|t| self.vocabulary.is_meaningful(t))
            .collect();

        query_tokens
            .iter()
            .flat_map(|q| sentence_tokens.iter().map(move |s| (q, s)))
            .map(|(q, s)| self.points(self.similarity(q, s)))
            .sum()
    }

    /// Relevance of a record; zero means "not relevant"
    pub fn score(
        &self,
        record: &KnowledgeRecord,
        query_tokens: &[String],
        intent: Option<&str>,
    ) -> f64 {
        let mut score = split_sentences(&record.content)
            .into_iter()
            .map(|sentence| self.sentence_score(sentence, query_tokens))
            .fold(0.0, f64::max);

        let source = record.source.to_lowercase();
        if query_tokens.iter().any(|t| *t == source) {
            score += self.config.source_boost;
        }

        if let Some(topic) = self.vocabulary.topic(&record.source) {
            if query_tokens.iter().any(|t| topic.contains(t)) {
                score += self.config.topic_keyword_boost;
            }
        }

        let title = normalize(&record.title);
        let title_hits = query_tokens
            .iter()
            .filter(|t| title.contains(t.as_str()))
            .count();
        score += self.config.title_token_boost * title_hits as f64;

        if let Some(intent) = intent {
            if title.contains(intent) {
                score += self.config.intent_title_boost;
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocabularyConfig;

    fn fixtures() -> (RetrievalConfig, Vocabulary) {
        let config = RetrievalConfig::default();
        let vocabulary = Vocabulary::new(&VocabularyConfig::default(), config.min_token_len);
        (config, vocabulary)
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_similarity_exact() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        assert!((scorer.similarity("melinda", "melinda") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_containment_needs_three_chars() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        assert!((scorer.similarity("pay", "payment") - 0.85).abs() < f64::EPSILON);
        // "dr" is too short for containment; falls back to positions: 2 of 3
        assert!((scorer.similarity("dr", "dry") - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_positional_fraction() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        // c-a-t vs c-a-r: two positions match out of three
        assert!((scorer.similarity("cat", "car") - 2.0 / 3.0).abs() < 1e-9);
        assert!(scorer.similarity("weather", "today").abs() < 1e-9);
    }

    #[test]
    fn test_points_thresholds() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        assert!((scorer.points(1.0) - 6.0).abs() < f64::EPSILON);
        assert!((scorer.points(0.85) - 3.0).abs() < f64::EPSILON);
        assert!((scorer.points(0.7) - 1.0).abs() < f64::EPSILON);
        assert!(scorer.points(0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pinned_score_for_canonical_record() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        let record = KnowledgeRecord::new(
            "Dr. Willingham",
            "Melinda is a pediatrician. She works at the clinic.",
            "melinda",
        );

        // 6 (best sentence) + 50 (source tag) + 10 (topic keyword), each boost once
        let score = scorer.score(&record, &tokens(&["melinda"]), None);
        assert!((score - 66.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_best_sentence_wins_over_sum() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        let record = KnowledgeRecord::new(
            "Notes",
            "Clinic hours are long. The clinic is downtown. Clinic parking is free.",
            "misc",
        );

        // each sentence has one exact "clinic" hit: 6, not 18
        let score = scorer.score(&record, &tokens(&["clinic"]), None);
        assert!((score - 6.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_title_and_intent_boosts() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        let record = KnowledgeRecord::new("Pay Rate", "Annotators are paid weekly.", "misc");

        // "pay": no sentence token scores above the weak threshold
        // ("paid" shares 2 of 4 positions), title hit +5, intent in title +10
        let score = scorer.score(&record, &tokens(&["pay"]), Some("pay"));
        assert!((score - 15.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_unrelated_query_scores_zero() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        let record = KnowledgeRecord::new(
            "Dr. Willingham",
            "Melinda is a pediatrician. She works at the clinic.",
            "melinda",
        );

        let score = scorer.score(&record, &tokens(&["weather", "today"]), None);
        assert!(score.abs() < f64::EPSILON, "got {score}");
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let (config, vocab) = fixtures();
        let scorer = Scorer::new(&config, &vocab);
        let record = KnowledgeRecord::new("Title", "Some content here.", "melinda");
        assert!(scorer.score(&record, &[], Some("pay")).abs() < f64::EPSILON);
    }
}
