//! Configuration management for Promptreel CLI
//!
//! Stores the server URL, OpenAI key and route timeout in
//! ~/.config/promptreel/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR: &str = "promptreel";
const CONFIG_FILE: &str = "config.toml";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Promptreel server; blank means no remote route
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_base_url: Option<String>,
    /// Bound on each remote or direct attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            openai_api_key: None,
            openai_base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Load, then apply `PROMPTREEL_URL` and `OPENAI_API_KEY` from the environment
    pub fn load_with_env() -> Result<Self> {
        Ok(Self::load()?.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Environment values win over the file
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PROMPTREEL_URL") {
            self.base_url = url.trim().to_string();
        }
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.openai_api_key = Some(key.trim().to_string());
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            self.openai_base_url = Some(url.trim().to_string());
        }
        self
    }

    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url.trim().trim_end_matches('/').to_string();
    }

    pub fn set_api_key(&mut self, key: String) {
        self.openai_api_key = Some(key);
    }

    pub fn set_timeout(&mut self, secs: u64) {
        self.timeout_secs = secs;
    }

    /// Server URL when one is configured
    pub fn remote_url(&self) -> Option<&str> {
        let url = self.base_url.trim();
        (!url.is_empty()).then_some(url)
    }

    pub fn route_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::parse("openai_api_key = \"sk-file\"\n").unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.set_base_url("https://promptreel.example.com/ ".to_string());
        config.set_timeout(5);
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
        assert_eq!(config.remote_url(), Some("https://promptreel.example.com"));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::default().with_overrides(|key| match key {
            "PROMPTREEL_URL" => Some("".to_string()),
            "OPENAI_API_KEY" => Some("sk-env".to_string()),
            _ => None,
        });
        assert_eq!(config.remote_url(), None);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-env"));
        assert!(config.openai_base_url.is_none());
    }
}
