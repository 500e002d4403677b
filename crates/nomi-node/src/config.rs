//! Node configuration for the Nomi engine.
//!
//! [`NodeConfig`] wraps the engine's [`ConstraintConfig`] with the settings
//! only the composition layer needs. Values are layered: built-in defaults,
//! then an optional TOML file, then `NOMI__`-prefixed environment variables
//! (`NOMI__LOG_LEVEL`, `NOMI__CONSTRAINTS__MAX_COMMISSION`, ...).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use nomi_core::config::ConstraintConfig;
use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// Environment variable prefix and nesting separator.
pub const ENV_PREFIX: &str = "NOMI";
pub const ENV_SEPARATOR: &str = "__";

/// Configuration for a node instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub constraints: ConstraintConfig,
    /// Base URL of the secondary-network candidate service. The cross-network
    /// check is disabled when unset.
    pub cross_network_endpoint: Option<String>,
    pub lookup_timeout_ms: u64,
    /// Log level filter string (e.g. "info", "debug", "nomi_engine=trace").
    pub log_level: String,
    /// "text" or "json".
    pub log_format: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            constraints: ConstraintConfig::default(),
            cross_network_endpoint: None,
            lookup_timeout_ms: 5_000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl NodeConfig {
    /// Default config file location, `<config dir>/nomi/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nomi")
            .join("config.toml")
    }

    /// Load from `path` (or the default location) and the process
    /// environment, then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, NodeError> {
        let env = Environment::with_prefix(ENV_PREFIX);
        Self::load_with_env(path, env)
    }

    /// Load with an explicit environment source.
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, NodeError> {
        // An explicitly named file must exist; the default one is optional.
        let (file, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        let loaded: NodeConfig = Config::builder()
            .add_source(File::from(file).format(FileFormat::Toml).required(required))
            // Values stay strings; typed fields parse them on deserialize.
            .add_source(env.prefix_separator(ENV_SEPARATOR).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()?;

        loaded.constraints.validate()?;
        Ok(loaded)
    }
}
