//! Chatbox library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod inference;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Completion endpoint preset. Both speak the OpenAI chat-completions wire format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Hosted OpenRouter API. Needs an API key.
    #[default]
    #[value(name = "openrouter")]
    OpenRouter,
    /// Local LM Studio server. No key required.
    #[value(name = "lmstudio")]
    LmStudio,
}

impl Provider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::LmStudio => "http://localhost:1234/v1",
        }
    }

    pub fn requires_credential(self) -> bool {
        matches!(self, Provider::OpenRouter)
    }
}
