//! # Node Configuration
//!
//! Startup settings, read from a JSON file named by `NODE_CLIENT_CONFIG`. Every field has a
//! default, so an absent variable or a partial file is fine.
//!
//! ```json
//! {
//!   "endpoint_name": "kitchen-sensor",
//!   "lifetime": 300,
//!   "catalog": "/etc/node/catalog.json"
//! }
//! ```

use crate::error::NodeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "NODE_CLIENT_CONFIG";

pub const DEFAULT_ENDPOINT_NAME: &str = "mbedM2M";
pub const DEFAULT_SERVER_URI: &str = "coap://[2a01:111:f100:9001::1761:93fa]:5684";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Name the node registers under.
    pub endpoint_name: String,
    pub server_uri: String,
    /// Registration lifetime in seconds; seeds resource `/1/0/1`.
    pub lifetime: i32,
    /// Channel capacity of each object task.
    pub mailbox_size: usize,
    /// JSON catalog replacing the built-in objects.
    pub catalog: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            endpoint_name: DEFAULT_ENDPOINT_NAME.to_string(),
            server_uri: DEFAULT_SERVER_URI.to_string(),
            lifetime: crate::catalog::server::DEFAULT_LIFETIME,
            mailbox_size: 32,
            catalog: None,
        }
    }
}

impl NodeConfig {
    /// Loads the file named by `NODE_CLIENT_CONFIG`, or the defaults when it is unset.
    pub fn load() -> Result<Self, NodeError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(Path::new(&path)),
            None => {
                debug!("{CONFIG_ENV} not set, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, NodeError> {
        let text = std::fs::read_to_string(path).map_err(|source| NodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| NodeError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), endpoint = %config.endpoint_name, "Configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: NodeConfig = serde_json::from_str(r#"{ "lifetime": 300 }"#).unwrap();
        assert_eq!(config.lifetime, 300);
        assert_eq!(config.endpoint_name, "mbedM2M");
        assert_eq!(config.mailbox_size, 32);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = NodeConfig::from_path(Path::new("/nonexistent/node.json")).unwrap_err();
        assert!(matches!(err, NodeError::Io { .. }));
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("node-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "endpoint_name": "kitchen", "mailbox_size": 4 }"#).unwrap();
        let config = NodeConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.endpoint_name, "kitchen");
        assert_eq!(config.mailbox_size, 4);
        assert_eq!(config.lifetime, 600);
    }
}
