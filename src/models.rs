use serde::{Deserialize, Deserializer, Serialize};

// Provider chat message format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

// Provider chat-completion request format
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Choices deserializer that tolerates `null`, non-array values and malformed
/// entries. Anything unusable decodes as no choices.
fn deserialize_lenient_choices<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ serde_json::Value::Array(_)) => serde_json::from_value(v).unwrap_or_default(),
        _ => Vec::new(),
    })
}

/// Body of a 2xx chat-completion answer. Decoded leniently so a body without
/// usable `choices` still reaches the handler, which reports it as a protocol
/// error along with any upstream `error` text.
#[derive(Debug, Deserialize, Default)]
pub struct ChatResponse {
    #[serde(default, deserialize_with = "deserialize_lenient_choices")]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl ChatResponse {
    /// Upstream error text, if the provider embedded one. Accepts both
    /// `{"error": {"message": ".."}}` and `{"error": ".."}`.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Inbound body of `POST /paraphrase`.
#[derive(Debug, Deserialize, Default)]
pub struct ParaphraseParams {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub academic_level: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParaphraseResponse {
    pub paraphrased_text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /test-api`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: String,
    pub message: String,
}

impl ProbeResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
