use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable consulted when `llm.api_key` is empty
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,
    /// Bearer credential; falls back to `OPENROUTER_API_KEY` when empty
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Sent as `HTTP-Referer`
    #[serde(default)]
    pub referer: String,
    /// Sent as `X-Title`
    #[serde(default = "default_llm_title")]
    pub title: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_llm_title() -> String {
    "RAG Chatbot".to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

impl LlmConfig {
    /// API key from config, or from the environment when the config leaves it blank
    pub fn resolved_api_key(&self) -> String {
        if self.api_key.trim().is_empty() {
            std::env::var(API_KEY_ENV).unwrap_or_default()
        } else {
            self.api_key.clone()
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            api_key: String::new(),
            model: default_llm_model(),
            referer: String::new(),
            title: default_llm_title(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// One bundled data file; `name` becomes the source tag of every record in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeSource {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    #[serde(default = "default_knowledge_sources")]
    pub sources: Vec<KnowledgeSource>,
}

fn default_knowledge_sources() -> Vec<KnowledgeSource> {
    vec![
        KnowledgeSource {
            name: "melinda".to_string(),
            path: PathBuf::from("data/melinda.json"),
        },
        KnowledgeSource {
            name: "xfinite".to_string(),
            path: PathBuf::from("data/xfinite.json"),
        },
    ]
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            sources: default_knowledge_sources(),
        }
    }
}

/// How a detected or forced topic narrows retrieval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TopicMode {
    /// Only records of the topic are candidates
    #[default]
    Restrict,
    /// Records of the topic rank ahead of every other record
    Reorder,
}

/// Scorer and ranker constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    /// Records must score strictly above this
    pub min_score: f64,
    pub max_context_chars: usize,
    pub exact_threshold: f64,
    pub strong_threshold: f64,
    pub weak_threshold: f64,
    pub exact_points: f64,
    pub strong_points: f64,
    pub weak_points: f64,
    pub containment_similarity: f64,
    pub min_containment_len: usize,
    pub min_token_len: usize,
    pub source_boost: f64,
    pub topic_keyword_boost: f64,
    pub title_token_boost: f64,
    pub intent_title_boost: f64,
    pub topic_mode: TopicMode,
    pub expand_synonyms: bool,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            min_score: 0.0,
            max_context_chars: 8000,
            exact_threshold: 0.9,
            strong_threshold: 0.75,
            weak_threshold: 0.6,
            exact_points: 6.0,
            strong_points: 3.0,
            weak_points: 1.0,
            containment_similarity: 0.85,
            min_containment_len: 3,
            min_token_len: 2,
            source_boost: 50.0,
            topic_keyword_boost: 10.0,
            title_token_boost: 5.0,
            intent_title_boost: 10.0,
            topic_mode: TopicMode::Restrict,
            expand_synonyms: true,
        }
    }
}

/// Named keyword list; used for both topics and intents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordSet {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.keywords.iter().any(|k| k == token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SynonymGroup {
    pub concept: String,
    pub synonyms: Vec<String>,
}

impl SynonymGroup {
    pub fn new(concept: &str, synonyms: &[&str]) -> Self {
        Self {
            concept: concept.to_string(),
            synonyms: synonyms.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Keyword vocabularies. Topic and intent order is significant: the first
/// declared entry wins when keyword sets overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    #[serde(default = "default_topics")]
    pub topics: Vec<KeywordSet>,
    #[serde(default = "default_intents")]
    pub intents: Vec<KeywordSet>,
    #[serde(default = "default_synonyms")]
    pub synonyms: Vec<SynonymGroup>,
    #[serde(default = "default_stopwords")]
    pub stopwords: Vec<String>,
}

fn default_topics() -> Vec<KeywordSet> {
    vec![
        KeywordSet::new(
            "melinda",
            &[
                "melinda",
                "doctor",
                "dr",
                "physician",
                "pediatrician",
                "willingham",
                "clinic",
            ],
        ),
        KeywordSet::new(
            "xfinite",
            &[
                "xfinite",
                "xfnite",
                "labeling",
                "annotation",
                "project",
                "task",
                "training",
                "work",
            ],
        ),
    ]
}

fn default_intents() -> Vec<KeywordSet> {
    vec![
        KeywordSet::new(
            "requirements",
            &[
                "requirement",
                "requirements",
                "qualifications",
                "needed",
                "need",
                "prerequisite",
            ],
        ),
        KeywordSet::new(
            "apply",
            &["apply", "application", "join", "register", "enroll", "start"],
        ),
        KeywordSet::new(
            "pay",
            &[
                "salary", "pay", "income", "earn", "earnings", "rate", "payment",
            ],
        ),
        KeywordSet::new(
            "hours",
            &["time", "hours", "schedule", "shift", "workload"],
        ),
        KeywordSet::new(
            "training",
            &["training", "orientation", "lesson", "course", "tutorial"],
        ),
        KeywordSet::new(
            "contact",
            &["contact", "email", "facebook", "instagram", "link"],
        ),
    ]
}

fn default_synonyms() -> Vec<SynonymGroup> {
    vec![
        SynonymGroup::new("doctor", &["dr", "physician", "pediatrician"]),
        SynonymGroup::new(
            "pay",
            &["salary", "income", "earnings", "wage", "payment"],
        ),
        SynonymGroup::new("apply", &["application", "register", "enroll", "signup"]),
        SynonymGroup::new(
            "requirements",
            &["requirement", "qualifications", "prerequisite"],
        ),
        SynonymGroup::new("hours", &["schedule", "shift", "workload"]),
        SynonymGroup::new("contact", &["email", "facebook", "instagram"]),
    ]
}

fn default_stopwords() -> Vec<String> {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "am", "do", "does", "did",
        "you", "your", "i", "me", "my", "we", "our", "he", "she", "it", "its", "they", "them",
        "his", "her", "what", "who", "whom", "how", "when", "where", "which", "why", "of", "to",
        "in", "on", "at", "for", "and", "or", "with", "about", "from", "by", "as", "know",
        "tell", "can", "could", "would", "should", "please", "this", "that", "there", "any",
        "some", "have", "has", "had", "if", "so", "not", "no",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            topics: default_topics(),
            intents: default_intents(),
            synonyms: default_synonyms(),
            stopwords: default_stopwords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_session_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_session_max_entries() -> usize {
    10_000
}

fn default_session_ttl() -> u64 {
    3600
}

fn default_session_cleanup_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_entries: default_session_max_entries(),
            ttl_secs: default_session_ttl(),
            cleanup_interval_secs: default_session_cleanup_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
    /// Reply used when no context is found or the model answers with nothing
    #[serde(default = "default_refusal")]
    pub refusal: String,
    /// Reply used when the completion call fails
    #[serde(default = "default_provider_error")]
    pub provider_error: String,
}

fn default_assistant_name() -> String {
    "VIA".to_string()
}

pub(crate) fn default_refusal() -> String {
    "I don't have information about that.".to_string()
}

pub(crate) fn default_provider_error() -> String {
    "AI provider error.".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            refusal: default_refusal(),
            provider_error: default_provider_error(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The sample file shipped with the repo
    Example(PathBuf),
    Defaults,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the working directory. Logging is not up
    /// yet at this point, so the caller reports the returned source.
    pub fn load() -> crate::Result<(Self, ConfigSource)> {
        Self::load_from_dir(".")
    }

    /// Load `config.toml` from `dir`, else `config.example.toml`, else defaults
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> crate::Result<(Self, ConfigSource)> {
        let dir = dir.as_ref();
        let primary = dir.join("config.toml");
        if primary.exists() {
            return Ok((Self::from_file(&primary)?, ConfigSource::File(primary)));
        }
        let example = dir.join("config.example.toml");
        if example.exists() {
            return Ok((Self::from_file(&example)?, ConfigSource::Example(example)));
        }
        Ok((Self::default(), ConfigSource::Defaults))
    }

    /// Reject settings the retriever cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.llm.timeout_secs == 0 {
            return Err(crate::ViaRagError::ConfigError(
                "llm.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(crate::ViaRagError::ConfigError(
                "retrieval.top_k must be at least 1".to_string(),
            ));
        }
        if self.session.max_entries == 0 {
            return Err(crate::ViaRagError::ConfigError(
                "session.max_entries must be at least 1".to_string(),
            ));
        }
        if let Some(set) = self
            .vocabulary
            .topics
            .iter()
            .chain(self.vocabulary.intents.iter())
            .find(|set| set.name.trim().is_empty())
        {
            return Err(crate::ViaRagError::ConfigError(format!(
                "vocabulary entry with keywords {:?} has an empty name",
                set.keywords
            )));
        }

        let mut seen = HashSet::new();
        for source in &self.knowledge.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(crate::ViaRagError::ConfigError(format!(
                    "knowledge source '{}' is declared more than once",
                    source.name
                )));
            }
        }

        Ok(())
    }

    /// Copy safe to print: the API key is masked
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.llm.api_key.is_empty() {
            copy.llm.api_key = "********".to_string();
        }
        copy
    }

    /// Socket address the API server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
