//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.chatbox/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Nothing here is read again at request time: the resolved values are
//! handed to the resolver and provider when they are built.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Provider;
use crate::inference::ResolverSettings;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatboxConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<Provider>,
    pub default_model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub system_prompt: Option<String>,
    pub fallback_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RemoteConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 1000;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful, concise, friendly assistant.";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub request_timeout: Duration,
    pub fallback_delay: Duration,
}

impl ResolvedConfig {
    /// The fixed request parameters the resolver sends with every call.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            model: self.model_name.clone(),
            system_prompt: self.system_prompt.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            request_timeout: self.request_timeout,
            fallback_delay: self.fallback_delay,
        }
    }
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.chatbox/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatbox").join("config.toml"))
}

/// Load config from `~/.chatbox/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ChatboxConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ChatboxConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ChatboxConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ChatboxConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<ChatboxConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ChatboxConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config that never prints the API key.
fn redacted(config: &ChatboxConfig) -> String {
    format!(
        "general={:?}, remote.base_url={:?}, remote.api_key={}",
        config.general,
        config.remote.base_url,
        if config.remote.api_key.is_some() { "<set>" } else { "<unset>" }
    )
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Chatbox Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "openrouter"    # "openrouter" or "lmstudio"
# default_model = "meta-llama/llama-3.1-8b-instruct"
# max_tokens = 150
# temperature = 0.7
# system_prompt = "You are a helpful, concise, friendly assistant."
# fallback_delay_ms = 1000           # pause before an offline reply

# [remote]
# api_key = "sk-or-..."              # Or set CHATBOX_API_KEY / OPENROUTER_API_KEY
# base_url = "https://openrouter.ai/api/v1"
# request_timeout_secs = 30
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ChatboxConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], with the environment lookup injected.
pub fn resolve_with_env<F>(config: &ChatboxConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .or_else(|| env("CHATBOX_PROVIDER").and_then(|p| parse_provider(&p)))
        .or(config.general.default_provider)
        .unwrap_or_default();

    // Model: CLI → env → config → default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env("CHATBOX_MODEL"))
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: CLI → env → config. A blank value at any layer counts as unset.
    let non_blank = |k: &String| !k.trim().is_empty();
    let api_key = cli
        .api_key
        .clone()
        .filter(non_blank)
        .or_else(|| env("CHATBOX_API_KEY").filter(non_blank))
        .or_else(|| env("OPENROUTER_API_KEY").filter(non_blank))
        .or_else(|| config.remote.api_key.clone().filter(non_blank));

    // Base URL: CLI → env → config → provider default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("CHATBOX_BASE_URL"))
        .or_else(|| config.remote.base_url.clone())
        .unwrap_or_else(|| provider.default_base_url().to_string());

    let system_prompt = config
        .general
        .system_prompt
        .clone()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

    ResolvedConfig {
        provider,
        model_name,
        max_tokens: config.general.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: config.general.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        system_prompt,
        api_key,
        base_url: base_url.trim_end_matches('/').to_string(),
        request_timeout: Duration::from_secs(
            config
                .remote
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        fallback_delay: Duration::from_millis(
            config
                .general
                .fallback_delay_ms
                .unwrap_or(DEFAULT_FALLBACK_DELAY_MS),
        ),
    }
}

fn parse_provider(value: &str) -> Option<Provider> {
    match value.trim().to_ascii_lowercase().as_str() {
        "openrouter" => Some(Provider::OpenRouter),
        "lmstudio" => Some(Provider::LmStudio),
        other => {
            warn!("Unknown provider '{}' in environment, ignoring", other);
            None
        }
    }
}
