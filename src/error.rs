use axum::http::StatusCode;
use thiserror::Error;

/// Failures of a paraphrase or connectivity request. Every variant is terminal
/// for the request that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParaphraseError {
    #[error("No text provided")]
    InvalidInput,

    #[error("API key not configured")]
    Configuration,

    #[error("Authentication error: Your API key is invalid or expired")]
    Authentication,

    #[error("Unexpected status code: {status}")]
    Provider { status: u16 },

    #[error("Failed to get proper response from API: {0}")]
    ProviderProtocol(String),

    #[error("API request error: {0}")]
    Transport(String),
}

impl ParaphraseError {
    /// Status code the HTTP shells answer with for this failure.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ParaphraseError::InvalidInput => StatusCode::BAD_REQUEST,
            ParaphraseError::Authentication => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ParaphraseError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ParaphraseError::Transport(format!("request timed out: {e}"))
        } else {
            ParaphraseError::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ParaphraseError>;
