//! Configuration for the voxrelay agent.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "VOXRELAY_PORT";
/// Environment variable overriding the completion model name.
pub const MODEL_ENV: &str = "VOXRELAY_MODEL";
/// Environment variable overriding the provider base URL.
pub const PROVIDER_URL_ENV: &str = "VOXRELAY_OPENAI_URL";

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// URL parse error.
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration for the agent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Completion provider settings.
    pub provider: ProviderConfig,
    /// Conversation settings.
    pub conversation: ConversationConfig,
}

impl AgentConfig {
    /// Build the default configuration with environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = std::env::var(PORT_ENV).ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            config.provider.model = model;
        }
        if let Ok(base_url) = std::env::var(PROVIDER_URL_ENV) {
            config.provider.base_url = Some(base_url);
        }

        config
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.conversation.max_entries < 2 {
            return Err(ConfigError::InvalidConfig(
                "conversation.max_entries must be >= 2".to_string(),
            ));
        }

        if self.conversation.system_prompt.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "conversation.system_prompt must not be empty".to_string(),
            ));
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "provider.model must not be empty".to_string(),
            ));
        }

        if self.provider.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "provider.request_timeout_secs must be > 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::InvalidConfig(
                "provider.temperature must be within [0, 2]".to_string(),
            ));
        }

        if let Some(base_url) = &self.provider.base_url {
            Url::parse(base_url)?;
        }

        Ok(())
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the server listens on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

/// Completion provider settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Chat completion model name.
    pub model: String,
    /// Optional custom base URL.
    pub base_url: Option<String>,
    /// Temperature for generation.
    pub temperature: f64,
    /// Optional max tokens per reply.
    pub max_tokens: Option<u64>,
    /// Request timeout in seconds for provider calls.
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            base_url: None,
            temperature: 0.7,
            max_tokens: Some(200),
            request_timeout_secs: 30,
        }
    }
}

/// Conversation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// System prompt seeded as the first transcript entry.
    pub system_prompt: String,
    /// Maximum transcript entries kept per session, system entry included.
    pub max_entries: usize,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are a helpful AI voice assistant.".to_string(),
            max_entries: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_tiny_retention_window() {
        let mut config = AgentConfig::default();
        config.conversation.max_entries = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut config = AgentConfig::default();
        config.provider.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let mut config = AgentConfig::default();
        config.provider.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = AgentConfig::default();
        config.provider.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
