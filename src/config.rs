//! Configuration types for the proxy server and client controller.
//!
//! Values come from an optional TOML file (`JOSEAI_CONFIG`) and are then
//! overridden by environment variables. The LLM API key is injected here and
//! nowhere else.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::llm::prompt::SYSTEM_PROMPT;

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "JOSEAI_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Upstream LLM completion settings.
    pub llm: LlmConfig,
    /// Simulated image generation settings.
    pub image: ImageConfig,
    /// Client controller settings.
    pub client: ClientConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Listen port (use `0` for auto-assign).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5000,
        }
    }
}

/// Upstream LLM completion configuration.
///
/// The defaults target Groq's OpenAI-compatible endpoint with the
/// `llama-3.1-8b-instant` model.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    pub api_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Bearer credential. Empty means "not configured".
    pub api_key: String,
    /// Sampling temperature (0.0–2.0).
    pub temperature: f64,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Nucleus sampling threshold.
    pub top_p: f64,
    /// System prompt prepended to every user message.
    pub system_prompt: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.groq.com/openai/v1".to_owned(),
            model: "llama-3.1-8b-instant".to_owned(),
            api_key: String::new(),
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 1.0,
            system_prompt: SYSTEM_PROMPT.to_owned(),
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<unset>" })
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    /// Returns `true` if a non-blank API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Simulated image generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Lower bound of the artificial generation delay, in milliseconds.
    pub min_delay_ms: u64,
    /// Upper bound of the artificial generation delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2_000,
            max_delay_ms: 5_000,
        }
    }
}

/// Client controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the proxy server.
    pub base_url: String,
    /// Delay between a final voice transcript and its automatic submission.
    pub transcript_submit_delay_ms: u64,
    /// Lifetime of error notifications.
    pub error_notice_ms: u64,
    /// Lifetime of success notifications.
    pub success_notice_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_owned(),
            transcript_submit_delay_ms: 1_000,
            error_notice_ms: 5_000,
            success_notice_ms: 3_000,
        }
    }
}

impl ClientConfig {
    /// Delay before a final transcript is submitted as chat.
    pub fn transcript_submit_delay(&self) -> Duration {
        Duration::from_millis(self.transcript_submit_delay_ms)
    }

    /// How long error notifications stay visible.
    pub fn error_notice_ttl(&self) -> Duration {
        Duration::from_millis(self.error_notice_ms)
    }

    /// How long success notifications stay visible.
    pub fn success_notice_ttl(&self) -> Duration {
        Duration::from_millis(self.success_notice_ms)
    }
}

impl AppConfig {
    /// Load configuration from the file named by `JOSEAI_CONFIG`, else from
    /// [`Self::default_config_path`] if it exists, else defaults. Then apply
    /// environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed, or the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let fallback = Self::default_config_path();
                if fallback.is_file() {
                    Self::from_file(&fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `PORT`, `HOST`, `GROQ_API_KEY` and `GROQ_API_URL` from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable `PORT` values are ignored with a warning.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!(value = %port, "ignoring invalid PORT: {e}"),
            }
        }
        if let Some(host) = lookup("HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_owned();
        }
        if let Some(key) = lookup("GROQ_API_KEY") {
            self.llm.api_key = key.trim().to_owned();
        }
        if let Some(url) = lookup("GROQ_API_URL").filter(|u| !u.trim().is_empty()) {
            self.llm.api_url = url.trim().trim_end_matches('/').to_owned();
        }
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `llm.max_tokens` must be greater than 0
    /// - `llm.temperature` must lie in 0.0–2.0
    /// - `image.min_delay_ms` must be <= `image.max_delay_ms`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.llm.max_tokens == 0 {
            return Err(AppError::Config(
                "llm.max_tokens must be greater than 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AppError::Config(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.image.min_delay_ms > self.image.max_delay_ms {
            return Err(AppError::Config(
                "image.min_delay_ms must be <= image.max_delay_ms".into(),
            ));
        }
        Ok(())
    }

    /// Returns `$XDG_CONFIG_HOME/joseai/config.toml`, falling back to
    /// `~/.config/joseai/config.toml`.
    pub fn default_config_path() -> PathBuf {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("joseai").join("config.toml")
    }
}
