use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

use crate::config::ProviderCredential;
use crate::error::{ParaphraseError, Result};
use crate::models::{ChatRequest, ChatResponse};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const MODELS_PATH: &str = "/v1/models";

/// Sends one chat completion to the provider. A 2xx answer is returned as a
/// decoded body; status failures are already mapped to `ParaphraseError`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(
        &self,
        credential: &ProviderCredential,
        req: &ChatRequest,
    ) -> Result<ChatResponse>;
}

/// Asks the provider to list its models; used only to prove the credential works.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn list_models(&self, credential: &ProviderCredential) -> Result<()>;
}

/// OpenAI-compatible HTTP provider. One attempt per call, no retries.
pub struct ProviderTransport {
    client: Client,
    base_url: String,
    chat_timeout: Duration,
    probe_timeout: Duration,
}

impl ProviderTransport {
    pub fn new(base_url: &str, chat_timeout: Duration, probe_timeout: Duration) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_timeout,
            probe_timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map a non-2xx status to the error taxonomy, logging what the provider said.
async fn status_error(response: Response) -> ParaphraseError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!(error_details = %body, "Provider rejected the credential");
        ParaphraseError::Authentication
    } else {
        tracing::error!(
            status = status.as_u16(),
            body = %body,
            "Provider returned an error status"
        );
        ParaphraseError::Provider {
            status: status.as_u16(),
        }
    }
}

#[async_trait]
impl Transport for ProviderTransport {
    async fn chat(
        &self,
        credential: &ProviderCredential,
        req: &ChatRequest,
    ) -> Result<ChatResponse> {
        let response = self
            .client
            .post(self.url(CHAT_COMPLETIONS_PATH))
            .bearer_auth(credential.expose())
            .header("Content-Type", "application/json")
            .timeout(self.chat_timeout)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat completion request failed: {}", e);
                ParaphraseError::from(e)
            })?;

        tracing::info!(status = response.status().as_u16(), "Chat completion response");
        tracing::debug!(headers = ?response.headers(), "Chat completion response headers");

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body = response.text().await?;
        tracing::debug!(body = %body, "Chat completion response body");

        serde_json::from_str(&body).map_err(|e| {
            ParaphraseError::ProviderProtocol(format!("could not decode response body: {e}"))
        })
    }
}

#[async_trait]
impl ModelCatalog for ProviderTransport {
    async fn list_models(&self, credential: &ProviderCredential) -> Result<()> {
        let response = self
            .client
            .get(self.url(MODELS_PATH))
            .bearer_auth(credential.expose())
            .timeout(self.probe_timeout)
            .send()
            .await?;

        tracing::info!(status = response.status().as_u16(), "Model listing response");

        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(status_error(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_strips_trailing_slash() {
        let transport = ProviderTransport::new(
            "https://provider.example/",
            Duration::from_secs(60),
            Duration::from_secs(10),
        )
        .expect("client should build");
        assert_eq!(
            transport.url(CHAT_COMPLETIONS_PATH),
            "https://provider.example/v1/chat/completions"
        );
        assert_eq!(transport.url(MODELS_PATH), "https://provider.example/v1/models");
    }
}
