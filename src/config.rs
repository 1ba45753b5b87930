//! Configuration types and loading

use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM backend configuration
    pub llm: LlmConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call early in startup to fail fast with a clear message instead of
    /// burning a full failover cycle against an unauthenticated backend.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(eyre::eyre!("llm.model must not be empty"));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path is an error if unreadable
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config: .orbit.yml
        let local_config = PathBuf::from(".orbit.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/orbit/orbit.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("orbit").join("orbit.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

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

/// LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Primary model identifier
    pub model: String,

    /// Backup models tried in order when the primary fails
    #[serde(rename = "backup-models")]
    pub backup_models: Vec<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| eyre::eyre!("Environment variable {} is not set", self.api_key_env))
    }

    /// Ordered candidate models: primary first, then backups with the
    /// primary deduplicated
    pub fn candidate_models(&self) -> Vec<String> {
        let mut candidates = vec![self.model.clone()];
        candidates.extend(self.backup_models.iter().filter(|m| **m != self.model).cloned());
        candidates
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "microsoft/phi-3-mini-128k-instruct:free".to_string(),
            backup_models: vec![
                "microsoft/mai-ds-r1:free".to_string(),
                "google/gemma-2-9b-it:free".to_string(),
                "meta-llama/llama-3.1-8b-instruct:free".to_string(),
                "mistralai/mistral-7b-instruct:free".to_string(),
            ],
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            base_url: "https://openrouter.ai/api/v1".to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.llm.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.llm.backup_models.len(), 4);
    }

    #[test]
    fn test_candidate_models_order() {
        let config = LlmConfig::default();
        let candidates = config.candidate_models();

        assert_eq!(candidates[0], config.model);
        assert_eq!(candidates.len(), 5);
    }

    #[test]
    fn test_candidate_models_dedupes_primary() {
        let config = LlmConfig {
            model: "shared/model:free".to_string(),
            backup_models: vec!["shared/model:free".to_string(), "other/model:free".to_string()],
            ..LlmConfig::default()
        };

        let candidates = config.candidate_models();
        assert_eq!(candidates, vec!["shared/model:free", "other/model:free"]);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  model: some/primary:free
  backup-models:
    - some/backup:free
  api-key-env: MY_API_KEY
  base-url: https://api.example.com/v1
  max-tokens: 300
  temperature: 0.5
  timeout-ms: 10000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "some/primary:free");
        assert_eq!(config.llm.backup_models, vec!["some/backup:free"]);
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 300);
        assert_eq!(config.llm.timeout_ms, 10000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: another/model:free
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "another/model:free");
        assert_eq!(config.llm.api_key_env, "OPENROUTER_API_KEY");
        assert_eq!(config.llm.max_tokens, 500);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orbit.yml");
        fs::write(&path, "llm:\n  model: from/file:free\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "from/file:free");
    }

    #[test]
    fn test_load_explicit_path_missing_is_error() {
        let path = PathBuf::from("/nonexistent/orbit.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_validation_missing_api_key() {
        let config = Config {
            llm: LlmConfig {
                api_key_env: "NONEXISTENT_TEST_API_KEY_12345".to_string(),
                ..LlmConfig::default()
            },
        };

        let result = config.validate();

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("NONEXISTENT_TEST_API_KEY_12345"));
    }
}
