//! # nomi-node — Composition layer for the Nomi engine.
//!
//! Wires configuration, logging, and concrete collaborators around a
//! [`CandidateEngine`](nomi_engine::CandidateEngine):
//! - [`config::NodeConfig`] — layered file and environment configuration
//! - [`logging::init_logging`] — tracing subscriber setup
//! - [`lookup::HttpCandidateLookup`] — secondary-network HTTP lookup
//! - [`snapshot::SnapshotChainData`] — chain reads served from a JSON snapshot
//! - [`store::MemoryScoreStore`] — in-memory score store with JSON export

pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod snapshot;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use nomi_core::traits::{ChainData, ScoreStore};
use nomi_engine::CandidateEngine;
use tracing::info;

pub use config::NodeConfig;
pub use error::NodeError;
pub use lookup::HttpCandidateLookup;
pub use snapshot::{Snapshot, SnapshotChainData};
pub use store::MemoryScoreStore;

/// Build an engine over the given collaborators. The cross-network check is
/// enabled when `config.cross_network_endpoint` is set.
pub fn build_engine(
    config: &NodeConfig,
    chain: Arc<dyn ChainData>,
    store: Arc<dyn ScoreStore>,
) -> Result<CandidateEngine, NodeError> {
    let engine = CandidateEngine::new(config.constraints.clone(), chain, store)?;

    match &config.cross_network_endpoint {
        Some(endpoint) => {
            let timeout = Duration::from_millis(config.lookup_timeout_ms);
            let lookup = HttpCandidateLookup::new(endpoint, timeout)?;
            info!(%endpoint, "cross-network check enabled");
            Ok(engine.with_lookup(Arc::new(lookup)))
        }
        None => Ok(engine),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomi_core::config::ReadPolicy;

    fn collaborators() -> (Arc<dyn ChainData>, Arc<dyn ScoreStore>) {
        let snapshot = Snapshot::default();
        (
            Arc::new(SnapshotChainData::new(&snapshot)),
            Arc::new(MemoryScoreStore::default()),
        )
    }

    #[test]
    fn builds_with_defaults() {
        let (chain, store) = collaborators();
        let engine = build_engine(&NodeConfig::default(), chain, store).unwrap();
        assert_eq!(engine.config(), &NodeConfig::default().constraints);
    }

    #[test]
    fn rejects_invalid_constraints() {
        let (chain, store) = collaborators();
        let mut cfg = NodeConfig::default();
        cfg.constraints.reads = ReadPolicy {
            max_concurrent_reads: 0,
            ..ReadPolicy::default()
        };
        let result = build_engine(&cfg, chain, store);
        assert!(matches!(result, Err(NodeError::Invalid(_))));
    }
}
