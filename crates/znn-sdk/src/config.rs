//! SDK configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::SdkError;

/// Connection and chain settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Chain identifier stamped on outgoing blocks
    #[serde(default = "default_chain_identifier")]
    pub chain_identifier: u64,
    /// Network identifier
    #[serde(default = "default_network_identifier")]
    pub network_identifier: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:35997".to_string()
}

fn default_chain_identifier() -> u64 {
    crate::model::DEFAULT_CHAIN_IDENTIFIER
}

fn default_network_identifier() -> u64 {
    1
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_identifier: default_chain_identifier(),
            network_identifier: default_network_identifier(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Parse TOML; absent keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, SdkError> {
        toml::from_str(content).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Load from a TOML file, or defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, SdkError> {
        toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.rpc_url, "http://127.0.0.1:35997");
        assert_eq!(config.chain_identifier, 1);
        assert_eq!(config.network_identifier, 1);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_serialize() {
        let toml = Config::default().to_toml_string().unwrap();
        assert!(toml.contains("rpc_url"));
        assert!(toml.contains("chain_identifier"));
    }

    #[test]
    fn test_config_deserialize() {
        let config = Config::from_toml_str(
            r#"
            rpc_url = "http://example.com:35997"
            chain_identifier = 3
        "#,
        )
        .unwrap();
        assert_eq!(config.rpc_url, "http://example.com:35997");
        assert_eq!(config.chain_identifier, 3);
        assert_eq!(config.network_identifier, 1);
    }

    #[test]
    fn test_config_malformed() {
        let result = Config::from_toml_str("chain_identifier = \"one\"");
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_config_load() {
        let dir = std::env::temp_dir().join(format!("znn-sdk-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = Config::load(dir.join("absent.toml")).unwrap();
        assert_eq!(missing, Config::default());

        let path = dir.join("config.toml");
        std::fs::write(&path, "request_timeout_secs = 5\n").unwrap();
        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.request_timeout_secs, 5);

        std::fs::write(&path, "not toml [").unwrap();
        assert!(matches!(Config::load(&path), Err(SdkError::Config(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
