//! Configuration loading for OncoLens.
//! Reads oncolens.toml from the current directory or the path in the ONCOLENS_CONFIG env var.
//! Every key is optional; a missing file means the compiled-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{OncolensError, Result};
use crate::form::SourcePolicy;

/// The single prediction endpoint.
pub const DEFAULT_PREDICT_URL: &str = "https://ml-models-bc.azurewebsites.net/api/predict";

pub const CONFIG_ENV: &str = "ONCOLENS_CONFIG";
pub const CONFIG_FILE: &str = "oncolens.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Idle time after which a browser session is discarded.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

fn default_bind()        -> String { "127.0.0.1:3001".to_string() }
fn default_static_dir()  -> String { "static".to_string() }
fn default_session_ttl() -> u64    { 3600 }
fn default_max_upload()  -> usize  { 10 * 1024 * 1024 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
            session_ttl_secs: default_session_ttl(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String { DEFAULT_PREDICT_URL.to_string() }
fn default_timeout()  -> u64    { 20 }

impl Default for PredictionConfig {
    fn default() -> Self {
        Self { endpoint: default_endpoint(), timeout_secs: default_timeout() }
    }
}

impl PredictionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub source_policy: SourcePolicy,
}


impl Config {
    /// Load configuration from oncolens.toml.
    /// Checks ONCOLENS_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());

        if !Path::new(&path).exists() {
            info!(path = %path, "No config file found, using built-in defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| OncolensError::Config(format!("cannot read {}: {}", path, e)))?;
        let config = Self::from_toml(&content)?;
        info!(path = %path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| OncolensError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.prediction.timeout_secs == 0 {
            return Err(OncolensError::Config("prediction.timeout_secs must be positive".into()));
        }
        if self.prediction.endpoint.trim().is_empty() {
            return Err(OncolensError::Config("prediction.endpoint must not be empty".into()));
        }
        Ok(())
    }
}
