//! # Reply Resolver
//!
//! Turns user text into a reply, always. The remote completion is tried
//! first; any failure is logged, padded with a short delay so the offline
//! path doesn't feel instant, and answered from the fallback catalog.
//!
//! ```text
//! resolve(text)
//!   ├─ provider.complete()  ──ok──▶ Reply::model(text)
//!   └─ err (credential / remote / network / timeout / parse)
//!        └─ sleep(fallback_delay) ─▶ Reply::fallback(catalog reply)
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{info, warn};

use crate::core::config::{
    DEFAULT_FALLBACK_DELAY_MS, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE,
};
use crate::core::message::Reply;
use crate::inference::fallback::{self, RandomSource, ThreadRandom};
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// Fixed parameters sent with every request, plus the resolver's timing knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on the remote call; expiry counts as a network failure.
    pub request_timeout: Duration,
    /// Pause before a fallback reply is returned.
    pub fallback_delay: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fallback_delay: Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS),
        }
    }
}

pub struct ReplyResolver {
    provider: Arc<dyn CompletionProvider>,
    settings: ResolverSettings,
    rng: Mutex<Box<dyn RandomSource>>,
}

impl ReplyResolver {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: ResolverSettings) -> Self {
        Self {
            provider,
            settings,
            rng: Mutex::new(Box::new(ThreadRandom)),
        }
    }

    /// Replaces the random source used to pick echo templates.
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolves a reply for `user_text`. Never fails.
    pub async fn resolve(&self, user_text: &str) -> Reply {
        match self.request_completion(user_text).await {
            Ok(text) => {
                info!(
                    "Completion from {} ({} chars)",
                    self.provider.name(),
                    text.len()
                );
                Reply::model(text)
            }
            Err(e) => {
                log_failure(&e);
                tokio::time::sleep(self.settings.fallback_delay).await;
                Reply::fallback(self.fallback_text(user_text))
            }
        }
    }

    async fn request_completion(&self, user_text: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest {
            system_prompt: &self.settings.system_prompt,
            user_text,
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        match tokio::time::timeout(self.settings.request_timeout, self.provider.complete(request))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Network(format!(
                "request timed out after {}ms",
                self.settings.request_timeout.as_millis()
            ))),
        }
    }

    fn fallback_text(&self, user_text: &str) -> String {
        // A poisoned lock only means another reply panicked mid-pick; the RNG is still usable.
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        fallback::fallback_reply(user_text, rng.as_mut())
    }
}

fn log_failure(error: &ProviderError) {
    match error {
        ProviderError::MissingCredential => {
            warn!("No API key configured, answering with a fallback reply")
        }
        ProviderError::Remote { status, message } => {
            warn!("Completion endpoint returned HTTP {status}: {message}; using fallback")
        }
        ProviderError::Network(msg) => {
            warn!("Network failure reaching completion endpoint: {msg}; using fallback")
        }
        ProviderError::Parse(msg) => {
            warn!("Unusable completion response: {msg}; using fallback")
        }
    }
    info!("Fallback path taken ({})", error.kind());
}
