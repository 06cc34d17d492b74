// src/infra/config.rs — Configuration loading (TOML file + environment)
//
// Provider credentials only ever come from the environment. Everything else
// has a default and can be tuned from an optional TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::core::cache::DEFAULT_CACHE_CAPACITY;
use crate::infra::errors::CapitalsError;

pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_KEY";
pub const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_DEPLOYMENT";
pub const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
pub const ENV_TIMEOUT_SECS: &str = "AZURE_OPENAI_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Tuning for the completion call. Credentials live in [`AzureCredentials`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub api_version: String,
    /// Request timeout; `None` keeps the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_version: "2024-02-01".into(),
            timeout_secs: None,
            max_tokens: 50,
            temperature: 0.1,
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply `AZURE_OPENAI_API_VERSION` / `AZURE_OPENAI_TIMEOUT_SECS` overrides.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), CapitalsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(version) = non_empty(lookup(ENV_API_VERSION)) {
            self.api_version = version;
        }
        if let Some(raw) = non_empty(lookup(ENV_TIMEOUT_SECS)) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                CapitalsError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }
}

/// Azure OpenAI connection identifiers. All three are required.
#[derive(Clone)]
pub struct AzureCredentials {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
}

impl std::fmt::Debug for AzureCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureCredentials")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .finish()
    }
}

impl AzureCredentials {
    pub fn from_env() -> Result<Self, CapitalsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`, reporting every missing variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CapitalsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = non_empty(lookup(ENV_ENDPOINT));
        let api_key = non_empty(lookup(ENV_API_KEY));
        let deployment = non_empty(lookup(ENV_DEPLOYMENT));

        match (endpoint, api_key, deployment) {
            (Some(endpoint), Some(api_key), Some(deployment)) => Ok(Self {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                api_key,
                deployment,
            }),
            (endpoint, api_key, deployment) => {
                let missing: Vec<&str> = [
                    (ENV_ENDPOINT, endpoint.is_none()),
                    (ENV_API_KEY, api_key.is_none()),
                    (ENV_DEPLOYMENT, deployment.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                Err(CapitalsError::Config(format!(
                    "Missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load config from `path` when given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
