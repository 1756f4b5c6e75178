//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::*;
    use crate::ViaRagError;

    // ====== Default Value Tests ======

    #[test]
    fn test_default_llm_settings() {
        let config = LlmConfig::default();
        assert_eq!(
            config.endpoint,
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.title, "RAG Chatbot");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_default_retrieval_constants() {
        let config = RetrievalConfig::default();
        assert_eq!(config.top_k, 10);
        assert!((config.source_boost - 50.0).abs() < f64::EPSILON);
        assert!((config.topic_keyword_boost - 10.0).abs() < f64::EPSILON);
        assert!((config.title_token_boost - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.topic_mode, TopicMode::Restrict);
    }

    #[test]
    fn test_default_prompt_strings() {
        let config = PromptConfig::default();
        assert_eq!(config.refusal, "I don't have information about that.");
        assert_eq!(config.provider_error, "AI provider error.");
    }

    #[test]
    fn test_default_topic_order() {
        let vocabulary = VocabularyConfig::default();
        let names: Vec<&str> = vocabulary.topics.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["melinda", "xfinite"]);
        assert_eq!(vocabulary.intents[0].name, "requirements");
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.knowledge.sources.len(), 2);
        assert_eq!(config.session.max_entries, 10_000);
    }

    #[test]
    fn test_partial_retrieval_section() {
        let config = AppConfig::from_toml_str(
            r#"
[retrieval]
top_k = 3
topic_mode = "reorder"
"#,
        )
        .unwrap();

        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.topic_mode, TopicMode::Reorder);
        // untouched constants keep their defaults
        assert!((config.retrieval.exact_points - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_custom_vocabulary_keeps_declaration_order() {
        let config = AppConfig::from_toml_str(
            r#"
[[vocabulary.topics]]
name = "zeta"
keywords = ["shared"]

[[vocabulary.topics]]
name = "alpha"
keywords = ["shared", "alpha"]
"#,
        )
        .unwrap();

        assert_eq!(config.vocabulary.topics[0].name, "zeta");
        assert_eq!(config.vocabulary.topics[1].name, "alpha");
        // sections not mentioned fall back to defaults
        assert!(!config.vocabulary.intents.is_empty());
    }

    #[test]
    fn test_knowledge_sources_from_toml() {
        let config = AppConfig::from_toml_str(
            r#"
[knowledge]
sources = [{ name = "faq", path = "kb/faq.json" }]
"#,
        )
        .unwrap();

        assert_eq!(
            config.knowledge.sources,
            vec![KnowledgeSource {
                name: "faq".to_string(),
                path: PathBuf::from("kb/faq.json"),
            }]
        );
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml_str("[retrieval\ntop_k = 1").unwrap_err();
        assert!(matches!(err, ViaRagError::TomlParsing(_)));
    }

    // ====== Validation Tests ======

    #[test]
    fn test_zero_top_k_rejected() {
        let err = AppConfig::from_toml_str("[retrieval]\ntop_k = 0").unwrap_err();
        assert!(matches!(err, ViaRagError::ConfigError(_)));
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let mut config = AppConfig::default();
        config.knowledge.sources.push(KnowledgeSource {
            name: "melinda".to_string(),
            path: PathBuf::from("other.json"),
        });
        assert!(matches!(config.validate(), Err(ViaRagError::ConfigError(_))));
    }

    #[test]
    fn test_empty_topic_name_rejected() {
        let mut config = AppConfig::default();
        config.vocabulary.topics.push(KeywordSet::new(" ", &["x"]));
        assert!(config.validate().is_err());
    }

    // ====== Helper Tests ======

    #[test]
    fn test_redacted_masks_api_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = "sk-secret".to_string();
        let redacted = config.redacted();
        assert_eq!(redacted.llm.api_key, "********");
        assert_eq!(config.llm.api_key, "sk-secret");
    }

    #[test]
    fn test_configured_api_key_wins_over_env() {
        let config = LlmConfig {
            api_key: "from-config".to_string(),
            ..LlmConfig::default()
        };
        assert_eq!(config.resolved_api_key(), "from-config");
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = AppConfig::from_toml_str("[llm]\ntimeout_secs = 0").unwrap_err();
        assert!(matches!(err, ViaRagError::ConfigError(_)), "got {err:?}");

        let config = AppConfig::from_toml_str("[llm]\ntimeout_secs = 1").unwrap();
        assert_eq!(config.llm.timeout_secs, 1);
    }

    // ====== Config Discovery Tests ======

    #[test]
    fn test_load_prefers_config_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[server]\nport = 4000").unwrap();
        std::fs::write(dir.path().join("config.example.toml"), "[server]\nport = 5000").unwrap();

        let (config, source) = AppConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(source, ConfigSource::File(dir.path().join("config.toml")));
    }

    #[test]
    fn test_load_reports_example_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.example.toml"), "[server]\nport = 5000").unwrap();

        let (config, source) = AppConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(
            source,
            ConfigSource::Example(dir.path().join("config.example.toml"))
        );
    }

    #[test]
    fn test_load_reports_defaults_when_nothing_found() {
        let dir = tempfile::tempdir().unwrap();

        let (config, source) = AppConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert_eq!(config.server.port, AppConfig::default().server.port);
    }
}
