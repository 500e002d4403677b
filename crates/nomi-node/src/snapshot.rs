//! File-backed chain data.
//!
//! A [`Snapshot`] is a JSON capture of everything the engine reads from the
//! chain for one pass: the validator set, per-account staking state, the
//! active era, the candidate list, and the currently nominated stashes.
//! [`SnapshotChainData`] serves [`ChainData`] reads from it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use async_trait::async_trait;
use nomi_core::error::ChainError;
use nomi_core::traits::ChainData;
use nomi_core::types::{Candidate, IdentityStatus, Release};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::NodeError;

/// On-chain state of one account.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSnapshot {
    pub identity: Option<String>,
    pub verified: bool,
    pub staked: bool,
    /// Perbill.
    pub commission: u32,
    pub bonded: u128,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub active_era: u32,
    pub validators: Vec<String>,
    pub accounts: BTreeMap<String, AccountSnapshot>,
    pub candidates: Vec<Candidate>,
    /// Stashes nominated in the current round.
    pub nominated: Vec<String>,
    pub latest_release: Option<Release>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, NodeError> {
        let bytes = std::fs::read(path).map_err(|e| NodeError::io(path, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// The nominated cohort, resolved against the candidate list. Stashes
    /// with no candidate record come back as `None`.
    pub fn nominated_cohort(&self) -> Vec<Option<Candidate>> {
        self.nominated
            .iter()
            .map(|stash| {
                let found = self.candidates.iter().find(|c| &c.stash == stash).cloned();
                if found.is_none() {
                    warn!(%stash, "nominated stash has no candidate record");
                }
                found
            })
            .collect()
    }
}

/// [`ChainData`] served from a [`Snapshot`].
pub struct SnapshotChainData {
    era: u32,
    validators: HashSet<String>,
    accounts: BTreeMap<String, AccountSnapshot>,
}

impl SnapshotChainData {
    pub fn new(snapshot: &Snapshot) -> Self {
        Self {
            era: snapshot.active_era,
            validators: snapshot.validators.iter().cloned().collect(),
            accounts: snapshot.accounts.clone(),
        }
    }

    fn account(&self, stash: &str) -> Result<&AccountSnapshot, ChainError> {
        self.accounts
            .get(stash)
            .ok_or_else(|| ChainError::AccountNotFound(stash.to_string()))
    }
}

#[async_trait]
impl ChainData for SnapshotChainData {
    async fn validators(&self) -> Result<HashSet<String>, ChainError> {
        Ok(self.validators.clone())
    }

    async fn identity(&self, stash: &str) -> Result<String, ChainError> {
        Ok(self.account(stash)?.identity.clone().unwrap_or_default())
    }

    async fn identity_status(&self, stash: &str) -> Result<IdentityStatus, ChainError> {
        let account = self.account(stash)?;
        Ok(IdentityStatus {
            has_identity: account.identity.as_deref().is_some_and(|i| !i.is_empty()),
            verified: account.verified,
        })
    }

    async fn destination_is_staked(&self, stash: &str) -> Result<bool, ChainError> {
        Ok(self.account(stash)?.staked)
    }

    async fn commission(&self, stash: &str) -> Result<u32, ChainError> {
        Ok(self.account(stash)?.commission)
    }

    async fn bonded_amount(&self, stash: &str) -> Result<u128, ChainError> {
        Ok(self.account(stash)?.bonded)
    }

    async fn active_era(&self) -> Result<u32, ChainError> {
        Ok(self.era)
    }
}
