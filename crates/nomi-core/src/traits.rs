//! Collaborator contracts consumed by the engine.
//!
//! - [`ChainData`] — remote chain-data reads (validator set, identity, staking)
//! - [`ScoreStore`] — persistence of scores, metadata, and release info
//! - [`CandidateLookup`] — advisory cross-network candidate lookup
//!
//! The engine holds these behind `Arc<dyn ..>` and never owns their
//! lifetimes.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::{ChainError, LookupError, StorageError};
use crate::types::{CrossNetworkReport, IdentityStatus, Release, Score, ScoreMetadata};

/// Read-only view of on-chain staking data.
#[async_trait]
pub trait ChainData: Send + Sync {
    /// Stashes that currently declare validation intent.
    async fn validators(&self) -> Result<HashSet<String>, ChainError>;

    /// Declared identity string for `stash`. Empty when none is set.
    async fn identity(&self, stash: &str) -> Result<String, ChainError>;

    /// Whether `stash` has an identity and whether a registrar verified it.
    async fn identity_status(&self, stash: &str) -> Result<IdentityStatus, ChainError>;

    /// Whether staking rewards for `stash` are compounded ("Staked").
    async fn destination_is_staked(&self, stash: &str) -> Result<bool, ChainError>;

    /// Current commission in Perbill.
    async fn commission(&self, stash: &str) -> Result<u32, ChainError>;

    /// Self-bonded amount in the smallest on-chain unit.
    async fn bonded_amount(&self, stash: &str) -> Result<u128, ChainError>;

    async fn active_era(&self) -> Result<u32, ChainError>;

    /// Render `address` in the network's canonical encoding.
    ///
    /// Default implementation returns the address unchanged.
    fn format_address(&self, address: &str) -> String {
        address.to_string()
    }
}

/// Persistence for scoring output. Writes are idempotent upserts.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn latest_release(&self) -> Result<Option<Release>, StorageError>;

    async fn set_score_metadata(&self, metadata: &ScoreMetadata) -> Result<(), StorageError>;

    async fn set_validator_score(&self, score: &Score) -> Result<(), StorageError>;
}

/// Advisory lookup of a candidate's status on the secondary network.
#[async_trait]
pub trait CandidateLookup: Send + Sync {
    async fn lookup(&self, stash: &str) -> Result<CrossNetworkReport, LookupError>;
}
