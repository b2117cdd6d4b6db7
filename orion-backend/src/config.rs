use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::module::neo::summary::RiskPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "ORION_CONFIG";
pub const API_KEY_ENV: &str = "NASA_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Enable CORS for browser front-ends served from another origin
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    #[serde(default)]
    pub nasa: NasaConfig,

    #[serde(default)]
    pub risk: RiskPolicy,

    #[serde(default)]
    pub table: TableConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NasaConfig {
    #[serde(default = "default_api_key")]
    pub api_key: String,

    #[serde(default = "default_apod_base_url")]
    pub apod_base_url: String,

    #[serde(default = "default_neo_base_url")]
    pub neo_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_api_key() -> String {
    "DEMO_KEY".to_string()
}

fn default_apod_base_url() -> String {
    "https://api.nasa.gov/planetary/apod".to_string()
}

fn default_neo_base_url() -> String {
    "https://api.nasa.gov/neo/rest/v1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    15
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            apod_base_url: default_apod_base_url(),
            neo_base_url: default_neo_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            enable_cors: default_enable_cors(),
            nasa: NasaConfig::default(),
            risk: RiskPolicy::default(),
            table: TableConfig::default(),
        }
    }
}

impl BackendConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let config: BackendConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$ORION_CONFIG` (or `config.toml`), falling back to defaults
    /// when the file does not exist. `$NASA_API_KEY` overrides the key.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            eprintln!("Config file '{}' not found, using defaults", path);
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.nasa.api_key = key.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.table.default_page_size == 0 {
            anyhow::bail!("table.default_page_size must be positive");
        }
        if self.risk.high_above_percent > 100 {
            anyhow::bail!(
                "risk.high_above_percent must be within 0..=100, got {}",
                self.risk.high_above_percent
            );
        }
        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
