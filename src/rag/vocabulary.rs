//! Topic and intent classification, stopword filtering and synonym expansion

use std::collections::HashSet;

use crate::config::KeywordSet;
use crate::config::SynonymGroup;
use crate::config::VocabularyConfig;
use crate::rag::text::tokenize;

/// Static keyword vocabularies loaded from configuration
#[derive(Debug, Clone)]
pub struct Vocabulary {
    topics: Vec<KeywordSet>,
    intents: Vec<KeywordSet>,
    synonyms: Vec<SynonymGroup>,
    stopwords: HashSet<String>,
    min_token_len: usize,
}

impl Vocabulary {
    pub fn new(config: &VocabularyConfig, min_token_len: usize) -> Self {
        Self {
            topics: config.topics.clone(),
            intents: config.intents.clone(),
            synonyms: config.synonyms.clone(),
            stopwords: config.stopwords.iter().cloned().collect(),
            min_token_len,
        }
    }

    /// First declared topic sharing a keyword with the query; `None` means "any"
    pub fn detect_topic(&self, query: &str) -> Option<String> {
        first_match(&self.topics, &tokenize(query)).map(str::to_string)
    }

    /// First declared intent sharing a keyword with the query
    pub fn detect_intent(&self, query: &str) -> Option<String> {
        first_match(&self.intents, &tokenize(query)).map(str::to_string)
    }

    /// Keyword set declared for a topic name
    pub fn topic(&self, name: &str) -> Option<&KeywordSet> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Query tokens minus stopwords and tokens shorter than the minimum length
    pub fn meaningful_tokens(&self, text: &str) -> Vec<String> {
        tokenize(text)
            .into_iter()
            .filter(|t| self.is_meaningful(t))
            .collect()
    }

    pub fn is_meaningful(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_len && !self.stopwords.contains(token)
    }

    /// One level of synonym closure.
    ///
    /// A synonym pulls in its concept; a concept pulls in all of its
    /// synonyms. Only the input tokens are expanded, so a token added here
    /// is not expanded again within the same call. Output keeps the input
    /// first, has no duplicates, and preserves first-seen order.
    pub fn expand_meaning(&self, tokens: &[String]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut expanded = Vec::new();
        let mut push = |token: &str| {
            if seen.insert(token.to_string()) {
                expanded.push(token.to_string());
            }
        };

        for token in tokens {
            push(token.as_str());
        }

        for token in tokens {
            for group in &self.synonyms {
                if group.synonyms.iter().any(|s| s == token) {
                    push(group.concept.as_str());
                }
                if group.concept == *token {
                    for synonym in &group.synonyms {
                        push(synonym.as_str());
                    }
                }
            }
        }

        expanded
    }
}

fn first_match<'a>(sets: &'a [KeywordSet], tokens: &[String]) -> Option<&'a str> {
    sets.iter()
        .find(|set| tokens.iter().any(|t| set.contains(t)))
        .map(|set| set.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_vocabulary() -> Vocabulary {
        Vocabulary::new(&VocabularyConfig::default(), 2)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_detect_topic_by_keyword() {
        let vocab = default_vocabulary();
        assert_eq!(vocab.detect_topic("Do you know Dr. Melinda?"), Some("melinda".to_string()));
        assert_eq!(vocab.detect_topic("how does annotation pay"), Some("xfinite".to_string()));
    }

    #[test]
    fn test_detect_topic_none_is_any() {
        let vocab = default_vocabulary();
        assert_eq!(vocab.detect_topic("what is the weather today"), None);
        assert_eq!(vocab.detect_topic(""), None);
    }

    #[test]
    fn test_first_declared_topic_wins() {
        let config = VocabularyConfig {
            topics: vec![
                KeywordSet::new("first", &["shared", "alpha"]),
                KeywordSet::new("second", &["shared", "beta"]),
            ],
            ..VocabularyConfig::default()
        };
        let vocab = Vocabulary::new(&config, 2);

        // query mentions the second topic's own keyword before the shared one
        assert_eq!(vocab.detect_topic("beta shared"), Some("first".to_string()));
        assert_eq!(vocab.detect_topic("beta"), Some("second".to_string()));
    }

    #[test]
    fn test_topic_match_is_whole_token() {
        let vocab = default_vocabulary();
        // "working" is not the keyword "work"
        assert_eq!(vocab.detect_topic("working"), None);
    }

    #[test]
    fn test_detect_intent() {
        let vocab = default_vocabulary();
        assert_eq!(vocab.detect_intent("What is the salary?"), Some("pay".to_string()));
        assert_eq!(
            vocab.detect_intent("what do I need to start"),
            Some("requirements".to_string())
        );
        assert_eq!(vocab.detect_intent("hello there"), None);
    }

    #[test]
    fn test_meaningful_tokens_drop_stopwords_and_short_tokens() {
        let vocab = default_vocabulary();
        assert_eq!(
            vocab.meaningful_tokens("Do you know Dr. Melinda? x"),
            strings(&["dr", "melinda"])
        );
        assert!(vocab.meaningful_tokens("what is the").is_empty());
    }

    #[test]
    fn test_expand_synonym_adds_concept() {
        let vocab = default_vocabulary();
        assert_eq!(
            vocab.expand_meaning(&strings(&["salary"])),
            strings(&["salary", "pay"])
        );
    }

    #[test]
    fn test_expand_concept_adds_synonyms() {
        let vocab = default_vocabulary();
        assert_eq!(
            vocab.expand_meaning(&strings(&["doctor"])),
            strings(&["doctor", "dr", "physician", "pediatrician"])
        );
    }

    #[test]
    fn test_expand_unknown_tokens_unchanged() {
        let vocab = default_vocabulary();
        let tokens = strings(&["melinda", "melinda", "clinic"]);
        assert_eq!(vocab.expand_meaning(&tokens), strings(&["melinda", "clinic"]));
    }

    #[test]
    fn test_expansion_is_one_level_and_settles_on_second_pass() {
        let vocab = default_vocabulary();

        let once = vocab.expand_meaning(&strings(&["salary"]));
        assert_eq!(once, strings(&["salary", "pay"]));

        // the concept added by the first pass brings its siblings on the second
        let twice = vocab.expand_meaning(&once);
        assert_eq!(
            twice,
            strings(&["salary", "pay", "income", "earnings", "wage", "payment"])
        );

        let thrice = vocab.expand_meaning(&twice);
        assert_eq!(thrice, twice);
    }

    #[test]
    fn test_expansion_does_not_chain_across_concepts() {
        let config = VocabularyConfig {
            synonyms: vec![
                SynonymGroup::new("a", &["b"]),
                SynonymGroup::new("b", &["c"]),
            ],
            ..VocabularyConfig::default()
        };
        let vocab = Vocabulary::new(&config, 1);

        // "a" -> "b" only; "b" is not expanded to "c" within the same pass
        assert_eq!(vocab.expand_meaning(&strings(&["a"])), strings(&["a", "b"]));
    }
}
