use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking the completion endpoint for a reply.
/// None of these reach the UI: the resolver turns every one into a fallback reply.
#[derive(Debug)]
pub enum ProviderError {
    /// No API key configured. Raised before any network traffic.
    MissingCredential,
    /// Endpoint answered with a non-2xx status.
    Remote { status: u16, message: String },
    /// Transport failure or timeout.
    Network(String),
    /// 2xx response that did not contain a usable completion.
    Parse(String),
}

impl ProviderError {
    /// Short label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::MissingCredential => "missing_credential",
            ProviderError::Remote { .. } => "remote_error",
            ProviderError::Network(_) => "network_error",
            ProviderError::Parse(_) => "parse_error",
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingCredential => write!(f, "API key not configured"),
            ProviderError::Remote { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a single-turn completion.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system_prompt: &'a str,
    pub user_text: &'a str,
    pub model: &'a str,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends one request and returns the trimmed completion text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
