use std::sync::Arc;

use crate::config::{Config, ProviderCredential};
use crate::error::{ParaphraseError, Result};
use crate::models::{ChatMessage, ChatRequest};
use crate::prompt::{SYSTEM_PROMPT, build_prompt, strip_commentary};
use crate::transport::{ModelCatalog, ProviderTransport, Transport};

/// Fixed parameters of every completion request.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub default_academic_level: String,
}

impl CompletionSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            model: cfg.provider.model.clone(),
            temperature: cfg.paraphrase.temperature,
            max_tokens: cfg.paraphrase.max_tokens,
            default_academic_level: cfg.paraphrase.default_academic_level.clone(),
        }
    }
}

/// Paraphrase request handler and connectivity probe. Holds no mutable state;
/// one instance is shared by every request a shell serves.
pub struct Paraphraser {
    transport: Arc<dyn Transport>,
    catalog: Arc<dyn ModelCatalog>,
    credential: Option<ProviderCredential>,
    settings: CompletionSettings,
}

impl Paraphraser {
    pub fn new(
        transport: Arc<dyn Transport>,
        catalog: Arc<dyn ModelCatalog>,
        credential: Option<ProviderCredential>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            transport,
            catalog,
            credential,
            settings,
        }
    }

    /// Wire up the HTTP provider described by `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let provider = Arc::new(ProviderTransport::new(
            &cfg.provider.base_url,
            cfg.chat_timeout(),
            cfg.probe_timeout(),
        )?);

        Ok(Self::new(
            Arc::clone(&provider) as Arc<dyn Transport>,
            provider as Arc<dyn ModelCatalog>,
            cfg.credential(),
            CompletionSettings::from_config(cfg),
        ))
    }

    pub fn default_academic_level(&self) -> &str {
        &self.settings.default_academic_level
    }

    /// The level to use when the caller gave none (or a blank one).
    pub fn resolve_level<'a>(&'a self, academic_level: Option<&'a str>) -> &'a str {
        match academic_level.map(str::trim) {
            Some(level) if !level.is_empty() => level,
            _ => self.default_academic_level(),
        }
    }

    /// The exact completion request sent upstream for these inputs.
    pub fn build_request(&self, text: &str, academic_level: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(text, academic_level)),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    pub async fn paraphrase(&self, text: &str, academic_level: Option<&str>) -> Result<String> {
        if text.trim().is_empty() {
            return Err(ParaphraseError::InvalidInput);
        }
        let credential = self
            .credential
            .as_ref()
            .ok_or(ParaphraseError::Configuration)?;

        let level = self.resolve_level(academic_level);
        tracing::info!(
            academic_level = level,
            chars = text.chars().count(),
            model = %self.settings.model,
            "Paraphrasing text"
        );

        let request = self.build_request(text, level);
        let response = self.transport.chat(credential, &request).await?;

        let Some(choice) = response.choices.first() else {
            let detail = response
                .error_message()
                .unwrap_or_else(|| "response contained no choices".to_string());
            return Err(ParaphraseError::ProviderProtocol(detail));
        };

        let content = choice
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .ok_or_else(|| {
                ParaphraseError::ProviderProtocol("first choice has no message content".to_string())
            })?;

        Ok(strip_commentary(content))
    }

    pub async fn check_connection(&self) -> Result<()> {
        let credential = self
            .credential
            .as_ref()
            .ok_or(ParaphraseError::Configuration)?;
        self.catalog.list_models(credential).await?;
        tracing::info!("Provider accepted the credential");
        Ok(())
    }
}
