use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use tokenlist_core::shared::constants::{DEFAULT_EXTERNAL_LIST_URL, DEFAULT_PRIVILEGED_CHAIN};
use tokenlist_core::ChainId;

use crate::domain::error::ValidatorError;

pub const DEFAULT_CONFIG_FILE: &str = "tokenlist.config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidatorConfig {
    pub datadir: PathBuf,
    pub rpc_urls: BTreeMap<ChainId, String>,
    pub external_list_url: String,
    /// Chain whose tokens are cross-checked against the external list.
    pub privileged_chain: ChainId,
    pub rpc_timeout_secs: u64,
    /// Entries validated in flight at once.
    pub concurrency: usize,
    pub log_level: String,
    pub log_directory: Option<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            datadir: PathBuf::from("./data"),
            rpc_urls: ChainId::ALL
                .iter()
                .map(|chain| (*chain, chain.default_rpc_url().to_string()))
                .collect(),
            external_list_url: DEFAULT_EXTERNAL_LIST_URL.to_string(),
            privileged_chain: DEFAULT_PRIVILEGED_CHAIN,
            rpc_timeout_secs: 30,
            concurrency: 8,
            log_level: "info".to_string(),
            log_directory: None,
        }
    }
}

impl ValidatorConfig {
    /// Loads `.env`, then the JSON config file if one exists, otherwise the
    /// environment on top of defaults. Fails if the result does not validate.
    pub fn new() -> Result<Self, ValidatorError> {
        dotenv::dotenv().ok();

        let config_file = env::var("CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let config = if Path::new(&config_file).exists() {
            Self::load_from_file(&config_file)?
        } else {
            Self::from_env()?
        };

        config.ensure_valid()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ValidatorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ValidatorError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ValidatorError::config(format!("Failed to deserialize config {}: {}", path.display(), e))
        })
    }

    pub fn from_env() -> Result<Self, ValidatorError> {
        let mut config = Self::default();

        if let Some(datadir) = Self::env_var("DATADIR") {
            config.datadir = PathBuf::from(datadir);
        }
        for chain in ChainId::ALL {
            if let Some(url) = Self::env_var(&chain.rpc_env_key()) {
                config.rpc_urls.insert(chain, url);
            }
        }
        if let Some(url) = Self::env_var("EXTERNAL_LIST_URL") {
            config.external_list_url = url;
        }
        if let Some(chain) = Self::env_var("PRIVILEGED_CHAIN") {
            config.privileged_chain = ChainId::from_str(&chain)
                .map_err(|e| ValidatorError::config(format!("PRIVILEGED_CHAIN: {}", e)))?;
        }
        if let Some(secs) = Self::env_var("RPC_TIMEOUT_SECS") {
            config.rpc_timeout_secs = secs
                .parse()
                .map_err(|e| ValidatorError::config(format!("RPC_TIMEOUT_SECS '{}': {}", secs, e)))?;
        }
        if let Some(concurrency) = Self::env_var("VALIDATION_CONCURRENCY") {
            config.concurrency = concurrency.parse().map_err(|e| {
                ValidatorError::config(format!("VALIDATION_CONCURRENCY '{}': {}", concurrency, e))
            })?;
        }
        if let Some(level) = Self::env_var("LOG_LEVEL") {
            config.log_level = level;
        }
        config.log_directory = Self::env_var("LOG_DIR");

        Ok(config)
    }

    /// Every problem with the configuration, empty if it is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (chain, url) in &self.rpc_urls {
            if url.is_empty() {
                errors.push(format!("RPC URL for chain {} is empty", chain));
            } else if !Self::is_http_url(url) {
                errors.push(format!("RPC URL for chain {} must be http(s): '{}'", chain, url));
            }
        }

        if !self.rpc_urls.contains_key(&self.privileged_chain) {
            errors.push(format!("Privileged chain {} has no RPC URL", self.privileged_chain));
        }

        if !Self::is_http_url(&self.external_list_url) {
            errors.push(format!("External list URL must be http(s): '{}'", self.external_list_url));
        }

        if self.rpc_timeout_secs == 0 {
            errors.push("RPC timeout must be greater than 0".to_string());
        }

        if self.concurrency == 0 {
            errors.push("Concurrency must be greater than 0".to_string());
        }

        errors
    }

    pub fn ensure_valid(&self) -> Result<(), ValidatorError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidatorError::config(format!(
                "Configuration validation failed: {}",
                errors.join(", ")
            )))
        }
    }

    pub fn rpc_url(&self, chain: ChainId) -> Option<&str> {
        self.rpc_urls.get(&chain).map(String::as_str)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "datadir": self.datadir.display().to_string(),
            "privileged_chain": self.privileged_chain,
            "external_list_url": self.external_list_url,
            "rpc_timeout_secs": self.rpc_timeout_secs,
            "concurrency": self.concurrency,
            "log_level": self.log_level,
            "configured_chains": self.rpc_urls.len(),
        })
    }

    fn is_http_url(url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }

    fn env_var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}
