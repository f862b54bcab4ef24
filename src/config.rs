use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Logical name looked up in the registry at startup.
    pub upstream_service: String,
    pub registry: RegistrySource,
    pub upstream_timeout: Duration,
}

/// Where registry records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    Http(String),
    File(String),
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let registry = match get("REGISTRY_URL") {
            Some(url) if !url.trim().is_empty() => RegistrySource::Http(url),
            _ => RegistrySource::File(
                get("REGISTRY_FILE").unwrap_or_else(|| "registry.json".to_string()),
            ),
        };

        let timeout_ms: u64 = get("UPSTREAM_TIMEOUT_MS")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .context("UPSTREAM_TIMEOUT_MS must be a number of milliseconds")?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .unwrap_or_else(|| "8081".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            upstream_service: get("UPSTREAM_SERVICE").unwrap_or_else(|| "project006".to_string()),
            registry,
            upstream_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
