use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Narrative API settings loaded from TOML. Every field has a default that
/// replicates the original service, so an empty file (or no file at all) is
/// a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Optional override for the built-in prompt template
    /// ({{field}} placeholders).
    #[serde(default)]
    pub prompt_template: Option<String>,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.95
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_seconds: default_timeout_seconds(),
            prompt_template: None,
        }
    }
}

impl NarrativeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NarrativeConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for NarrativeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_non_empty_string("api_key_env", &self.api_key_env)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validation::validate_range("top_p", self.top_p, 0.0, 1.0)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_replicate_original_service() {
        let config = NarrativeConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: NarrativeConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoint, "https://generativelanguage.googleapis.com");
        assert!(config.prompt_template.is_none());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: NarrativeConfig = toml::from_str(
            "model = \"gemini-pro\"\ntemperature = 0.2\n",
        )
        .unwrap();
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.top_p, 0.95);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = NarrativeConfig::default();
        config.temperature = 5.0;
        assert!(config.validate().is_err());

        let mut config = NarrativeConfig::default();
        config.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
