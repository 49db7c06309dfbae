use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Serper shopping search API key
    pub serper_api_key: String,

    /// Serper API base URL
    #[serde(default = "default_serper_api_url")]
    pub serper_api_url: String,

    /// Google Gemini API key
    pub gemini_api_key: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for recommendation text
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Connect + read timeout for the shopping search call, in seconds
    #[serde(default = "default_search_timeout_secs")]
    pub search_timeout_secs: u64,

    /// Timeout for the generation call, in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_serper_api_url() -> String {
    "https://google.serper.dev".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_search_timeout_secs() -> u64 {
    10
}

fn default_generation_timeout_secs() -> u64 {
    60
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects blank API keys; envy only catches missing ones.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.serper_api_key.trim().is_empty() {
            anyhow::bail!("SERPER_API_KEY must not be empty");
        }
        if self.gemini_api_key.trim().is_empty() {
            anyhow::bail!("GEMINI_API_KEY must not be empty");
        }
        Ok(())
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(vars(&[
            ("SERPER_API_KEY", "serper"),
            ("GEMINI_API_KEY", "gemini"),
        ]))
        .unwrap();

        assert_eq!(config.serper_api_url, "https://google.serper.dev");
        assert_eq!(config.gemini_model, "gemini-2.0-flash-exp");
        assert_eq!(config.search_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = envy::from_iter::<_, Config>(vars(&[("SERPER_API_KEY", "serper")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_key_fails_validation() {
        let config: Config = envy::from_iter(vars(&[
            ("SERPER_API_KEY", "  "),
            ("GEMINI_API_KEY", "gemini"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.validate().is_err());
    }
}
