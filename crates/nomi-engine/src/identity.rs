//! Identity hash index.
//!
//! Maps the BLAKE3 digest of each candidate's declared identity string to the
//! number of candidates declaring it. Two candidates sharing an identity
//! collide here; the validity checker uses the count as a Sybil bound.

use std::collections::HashMap;

use futures::stream::{self, StreamExt};
use nomi_core::config::ReadPolicy;
use nomi_core::traits::ChainData;
use nomi_core::types::Candidate;
use tracing::{debug, warn};

use crate::remote::guarded;

/// Digest-to-occurrence table for one candidate population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityHashTable {
    counts: HashMap<String, u32>,
}

impl IdentityHashTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hex-encoded BLAKE3 digest of an identity string.
    pub fn digest(identity: &str) -> String {
        blake3::hash(identity.as_bytes()).to_hex().to_string()
    }

    /// Record one more candidate declaring `identity`.
    pub fn insert(&mut self, identity: &str) {
        *self.counts.entry(Self::digest(identity)).or_insert(0) += 1;
    }

    /// How many candidates declared `identity`. `0` if none did.
    pub fn count(&self, identity: &str) -> u32 {
        self.count_digest(&Self::digest(identity))
    }

    pub fn count_digest(&self, digest: &str) -> u32 {
        self.counts.get(digest).copied().unwrap_or(0)
    }

    /// Number of distinct identity digests.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Build the identity table for `candidates`, one identity read each.
///
/// A failed read is recorded as the empty identity rather than aborting the
/// build.
pub async fn build_identity_table(
    chain: &dyn ChainData,
    candidates: &[Candidate],
    policy: &ReadPolicy,
) -> IdentityHashTable {
    let identities: Vec<String> = stream::iter(candidates)
        .map(|candidate| async move {
            match guarded(policy, "identity", || chain.identity(&candidate.stash)).await {
                Ok(identity) => identity,
                Err(err) => {
                    warn!(stash = %candidate.stash, error = %err, "identity lookup failed, using empty identity");
                    String::new()
                }
            }
        })
        .buffered(policy.max_concurrent_reads.max(1))
        .collect()
        .await;

    let mut table = IdentityHashTable::new();
    for identity in &identities {
        table.insert(identity);
    }
    debug!(candidates = candidates.len(), distinct = table.len(), "identity table built");
    table
}
