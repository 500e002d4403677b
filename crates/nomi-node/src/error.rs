//! Error types for the composition layer.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("io error on {path:?}: {source}")] Io { path: PathBuf, source: std::io::Error },
    #[error("snapshot decode: {0}")] Snapshot(#[from] serde_json::Error),
    #[error("config: {0}")] Load(#[from] config::ConfigError),
    #[error("invalid config: {0}")] Invalid(#[from] nomi_core::error::ConfigError),
    #[error("lookup client: {0}")] Lookup(#[from] nomi_core::error::LookupError),
    #[error(transparent)] Engine(nomi_core::error::EngineError),
}

impl From<nomi_core::error::EngineError> for NodeError {
    fn from(err: nomi_core::error::EngineError) -> Self {
        match err {
            nomi_core::error::EngineError::Config(c) => Self::Invalid(c),
            other => Self::Engine(other),
        }
    }
}

impl NodeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
