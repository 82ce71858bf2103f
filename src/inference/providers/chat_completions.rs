//! Provider for OpenAI-compatible `/chat/completions` endpoints
//! (OpenRouter, LM Studio, and anything else speaking the same format).
//!
//! One request, one response: no streaming, no conversation history.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::config::ResolvedConfig;
use crate::inference::types::{ChatRequest, ChatResponse, extract_error_message};
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

pub struct ChatCompletionsProvider {
    api_key: Option<String>,
    require_key: bool,
    base_url: String,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    /// Creates a new provider.
    ///
    /// # Arguments
    /// * `api_key` - Bearer credential, if any
    /// * `base_url` - API root, e.g. `https://openrouter.ai/api/v1`
    /// * `require_key` - When true, a missing key fails the call before any network traffic
    pub fn new(api_key: Option<String>, base_url: impl Into<String>, require_key: bool) -> Self {
        Self {
            api_key,
            require_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.provider.requires_credential(),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        if self.require_key && self.api_key.is_none() {
            return Err(ProviderError::MissingCredential);
        }

        let body = ChatRequest::single_turn(
            request.model,
            request.system_prompt,
            request.user_text,
            request.max_tokens,
            request.temperature,
        );

        info!(
            "Chat completion request: model={}, max_tokens={}, temperature={}, user_len={}",
            body.model,
            body.max_tokens,
            body.temperature,
            request.user_text.len()
        );

        let mut builder = self.client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Completion response status: {}", status);

        if !status.is_success() {
            let err_body = response.text().await.unwrap_or_default();
            warn!("Completion API error: {} - {}", status.as_u16(), err_body);
            let message = extract_error_message(&err_body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| status.to_string())
            });
            return Err(ProviderError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;

        parsed
            .first_text()
            .ok_or_else(|| ProviderError::Parse("response contained no completion text".to_string()))
    }
}
