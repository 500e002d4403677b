//! Shared test helpers for scenario and property tests.

use std::sync::Arc;

use nomi_core::config::ConstraintConfig;
use nomi_core::types::Candidate;
use nomi_engine::CandidateEngine;
use nomi_engine::testing::{MockChain, MockStore, candidate, clock, fast_reads};

pub use nomi_engine::testing::NOW;

/// Default constraints with test read timings.
pub fn test_config() -> ConstraintConfig {
    ConstraintConfig {
        reads: fast_reads(),
        ..ConstraintConfig::default()
    }
}

/// A healthy candidate with the given bonded amount.
pub fn bonded(stash: &str, amount: u128) -> Candidate {
    Candidate {
        bonded: amount,
        ..candidate(stash)
    }
}

/// Three healthy candidates with bonded `[10, 20, 30]` and every other
/// dimension equal.
pub fn bonded_trio() -> Vec<Candidate> {
    [("low", 10u128), ("mid", 20), ("high", 30)]
        .iter()
        .map(|(stash, amount)| bonded(stash, *amount))
        .collect()
}

/// A chain where every candidate in `candidates` is healthy.
pub fn chain_for(candidates: &[Candidate]) -> Arc<MockChain> {
    let refs: Vec<&Candidate> = candidates.iter().collect();
    Arc::new(MockChain::with_candidates(&refs))
}

/// An engine over `chain` and `store` with [`test_config`] and a fixed clock.
pub fn engine(chain: Arc<MockChain>, store: Arc<MockStore>) -> CandidateEngine {
    engine_with(test_config(), chain, store)
}

pub fn engine_with(
    config: ConstraintConfig,
    chain: Arc<MockChain>,
    store: Arc<MockStore>,
) -> CandidateEngine {
    CandidateEngine::new(config, chain, store)
        .expect("test config is valid")
        .with_clock(clock)
}

/// Wrap every candidate as a present cohort entry.
pub fn cohort(candidates: &[Candidate]) -> Vec<Option<Candidate>> {
    candidates.iter().cloned().map(Some).collect()
}
