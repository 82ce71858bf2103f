//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::inference::fallback::RandomSource;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// Owned copy of a request a fake provider received.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub system_prompt: String,
    pub user_text: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

type Outcome = Box<dyn Fn() -> Result<String, ProviderError> + Send + Sync>;

/// Provider that returns a canned outcome and records what it was asked.
pub struct ScriptedProvider {
    outcome: Outcome,
    calls: AtomicUsize,
    last: Mutex<Option<SeenRequest>>,
}

impl ScriptedProvider {
    pub fn ok(text: &str) -> Self {
        let text = text.to_string();
        Self::with_outcome(Box::new(move || Ok(text.clone())))
    }

    pub fn err(make: impl Fn() -> ProviderError + Send + Sync + 'static) -> Self {
        Self::with_outcome(Box::new(move || Err(make())))
    }

    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SeenRequest> {
        self.last.lock().unwrap().clone()
    }

    pub fn last_user_text(&self) -> Option<String> {
        self.last_request().map(|r| r.user_text)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(SeenRequest {
            system_prompt: request.system_prompt.to_string(),
            user_text: request.user_text.to_string(),
            model: request.model.to_string(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        });
        (self.outcome)()
    }
}

/// Provider that never answers within a reasonable time.
pub struct SlowProvider(pub Duration);

#[async_trait]
impl CompletionProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, _request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        tokio::time::sleep(self.0).await;
        Ok("too late".to_string())
    }
}

/// Random source that always picks the same index.
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

/// Creates a test App.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new("test-model".to_string())
}
