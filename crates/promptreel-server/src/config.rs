//! Server configuration from the secret store

use std::time::Duration;

use anyhow::{Context, Result};
use promptreel::{GateConfig, DEFAULT_ROUTE_TIMEOUT};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub gate: GateConfig,
    pub route_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            gate: GateConfig::default(),
            route_timeout: DEFAULT_ROUTE_TIMEOUT,
        }
    }
}

impl ServerConfig {
    /// Build from any key lookup (the shuttle `SecretStore` in production).
    ///
    /// Blank values count as unset. Malformed numbers are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let secs = |key: &str, default: Duration| -> Result<Duration> {
            match get(key) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .with_context(|| format!("{} must be a whole number of seconds", key)),
                None => Ok(default),
            }
        };

        let defaults = Self::default();
        let max_requests = match get("RATE_LIMIT_MAX_REQUESTS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("RATE_LIMIT_MAX_REQUESTS must be a positive integer")?,
            None => defaults.gate.max_requests,
        };

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL"),
            gate: GateConfig {
                window: secs("RATE_LIMIT_WINDOW_SECS", defaults.gate.window)?,
                max_requests,
                cache_ttl: secs("CACHE_TTL_SECS", defaults.gate.cache_ttl)?,
            },
            route_timeout: secs("ROUTE_TIMEOUT_SECS", defaults.route_timeout)?,
        })
    }
}
