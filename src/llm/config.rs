use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Configuration for the completion client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer credential. `None` until resolved from an explicit value or the environment
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Full chat-completions endpoint URL
    pub api_base: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens for the completion
    pub max_tokens: u32,

    pub temperature: f32,

    /// Log prompt and response sizes
    pub debug: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
            max_tokens: 4000,
            temperature: 0.7,
            debug: false,
        }
    }
}

impl LlmConfig {
    /// Load configuration from the environment (and `.env`), letting an explicit
    /// credential take precedence over `DEEPSEEK_API_KEY`.
    pub fn resolve(explicit_api_key: Option<String>) -> Self {
        Self::resolve_internal(explicit_api_key, true)
    }

    #[cfg(test)]
    fn resolve_no_dotenv(explicit_api_key: Option<String>) -> Self {
        Self::resolve_internal(explicit_api_key, false)
    }

    fn resolve_internal(explicit_api_key: Option<String>, load_dotenv: bool) -> Self {
        if load_dotenv {
            let _ = dotenv::dotenv();
        }

        let api_key = explicit_api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty()));

        let mut config = Self {
            api_key,
            ..Default::default()
        };

        if let Ok(api_base) = env::var("DEEPSEEK_API_BASE") {
            config.api_base = api_base;
        }

        if let Ok(model) = env::var("DEEPSEEK_MODEL") {
            config.model = model;
        }

        if let Ok(timeout) = env::var("LLM_REQUEST_TIMEOUT") {
            if let Ok(timeout_secs) = timeout.parse::<u64>() {
                config.timeout_secs = timeout_secs;
            }
        }

        if let Ok(debug) = env::var("LLM_DEBUG") {
            config.debug = debug.to_lowercase() == "true" || debug == "1";
        }

        config
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = self.debug || debug;
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match &self.api_key {
            None => {
                return Err(format!(
                    "No API key available. Pass --api-key or set {} in the environment or a .env file.",
                    API_KEY_ENV
                ))
            }
            Some(key) if key.trim().is_empty() => return Err("API key is empty".to_string()),
            Some(_) => {}
        }

        if self.api_base.trim().is_empty() {
            return Err("API base URL is empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.max_tokens == 0 {
            return Err("Max tokens must be greater than 0".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }

        Ok(())
    }
}
