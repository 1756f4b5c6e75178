//! API request and response types

use serde::Deserialize;
use serde::Serialize;

/// Chat request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Opaque client token; follow-ups in the same session inherit the topic
    #[serde(default, rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Trimmed message, `None` when missing or blank
    #[must_use]
    pub fn trimmed_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

/// Chat reply body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_session_id_rename() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message": "hi", "sessionId": "abc"}"#).unwrap();
        assert_eq!(request.message.as_deref(), Some("hi"));
        assert_eq!(request.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_chat_request_missing_fields() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.trimmed_message(), None);
        assert_eq!(request.session_id, None);
    }

    #[test]
    fn test_blank_message_is_none() {
        let request = ChatRequest {
            message: Some("   \n".to_string()),
            session_id: None,
        };
        assert_eq!(request.trimmed_message(), None);
    }

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new("No message provided")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "No message provided"}));
    }
}
