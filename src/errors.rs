use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViaRagError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeError(String),

    #[error("Invalid configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP client error: {0}")]
    HttpError(String),

    #[error("LLM provider error: {0}")]
    LlmError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<reqwest::Error> for ViaRagError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::LlmError(format!("request timed out: {err}"))
        } else {
            Self::HttpError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ViaRagError>;
