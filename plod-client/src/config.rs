use crate::error::{Result, SparqlError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://52.170.134.25:3030/plod_endpoint/query";
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/plod/config.json";
pub const ENV_ENDPOINT: &str = "PLOD_ENDPOINT";
pub const ENV_TIMEOUT: &str = "PLOD_TIMEOUT";

/// Settings for talking to the triplestore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub cache: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            user_agent: format!("plod/{}", env!("CARGO_PKG_VERSION")),
            cache: true,
        }
    }
}

impl ClientConfig {
    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
    }

    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        let content = fs::read_to_string(&expanded).map_err(|e| {
            SparqlError::Config(format!("Failed to read config file {}: {}", expanded, e))
        })?;
        let config: ClientConfig = serde_json::from_str(&content).map_err(|e| {
            SparqlError::Config(format!("Failed to parse config file {}: {}", expanded, e))
        })?;
        debug!("Loaded config from {}", expanded);
        Ok(config)
    }

    /// An explicit path must exist; the default path is only read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overlay `PLOD_ENDPOINT` / `PLOD_TIMEOUT` using the given lookup
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT)
            && !endpoint.trim().is_empty()
        {
            self.endpoint = endpoint.trim().to_string();
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                SparqlError::Config(format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT, timeout))
            })?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| SparqlError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SparqlError::InvalidEndpoint(format!(
                "{}: scheme must be http or https",
                self.endpoint
            )));
        }

        if self.timeout_secs == 0 {
            return Err(SparqlError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(())
    }
}
