//! deepresearch configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main deepresearch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interaction service client configuration
    pub client: ClientConfig,

    /// Model selection per pipeline phase
    pub models: ModelsConfig,

    /// Research polling behavior
    pub research: ResearchConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that required environment variables are set. Call this early
    /// in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        // Check the API key environment variable is set
        if std::env::var(&self.client.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.client.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .deepresearch.yml
        let local_config = PathBuf::from(".deepresearch.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/deepresearch/deepresearch.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("deepresearch").join("deepresearch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Interaction service client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .wrap_err_with(|| format!("API key not found. Set the {} environment variable.", self.api_key_env))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_ms: 300_000,
        }
    }
}

/// Model selection per pipeline phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Fast model that drafts the numbered plan
    pub planner: String,

    /// Managed deep-research agent identifier
    pub researcher: String,

    /// Strong model that writes the executive report
    pub synthesizer: String,

    /// Image model for the TL;DR infographic
    pub illustrator: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            planner: "gemini-3-flash-preview".to_string(),
            researcher: "deep-research-pro-preview-12-2025".to_string(),
            synthesizer: "gemini-3-pro-preview".to_string(),
            illustrator: "gemini-3-pro-image-preview".to_string(),
        }
    }
}

/// Research polling behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    /// Seconds between status queries while research runs
    #[serde(rename = "poll-interval-secs")]
    pub poll_interval_secs: u64,

    /// Seconds to wait for research before giving up
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 3,
            timeout_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.client.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.models.planner, "gemini-3-flash-preview");
        assert_eq!(config.research.poll_interval_secs, 3);
        assert_eq!(config.research.timeout_secs, 300);
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.timeout_ms, 300_000);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
client:
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  timeout-ms: 60000

models:
  planner: fast-model
  researcher: deep-agent
  synthesizer: strong-model
  illustrator: image-model

research:
  poll-interval-secs: 1
  timeout-secs: 120
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.client.api_key_env, "MY_API_KEY");
        assert_eq!(config.client.timeout_ms, 60000);
        assert_eq!(config.models.planner, "fast-model");
        assert_eq!(config.models.researcher, "deep-agent");
        assert_eq!(config.research.poll_interval_secs, 1);
        assert_eq!(config.research.timeout_secs, 120);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
models:
  planner: my-planner
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.models.planner, "my-planner");

        // Defaults for unspecified
        assert_eq!(config.models.synthesizer, "gemini-3-pro-preview");
        assert_eq!(config.client.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.research.timeout_secs, 300);
    }

    #[test]
    fn test_validate_fails_without_api_key_env() {
        let config = Config {
            client: ClientConfig {
                api_key_env: "DEEPRESEARCH_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
                ..ClientConfig::default()
            },
            ..Config::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("DEEPRESEARCH_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_get_api_key_reports_variable_name() {
        let config = ClientConfig {
            api_key_env: "DEEPRESEARCH_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..ClientConfig::default()
        };

        let err = config.get_api_key().unwrap_err();
        assert!(err.to_string().contains("DEEPRESEARCH_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
