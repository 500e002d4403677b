//! In-memory collaborators and candidate builders for tests.
//!
//! Compiled for this crate's unit tests and, through the `testing` feature,
//! for downstream test suites.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use nomi_core::config::ReadPolicy;
use nomi_core::constants::WEEK_MS;
use nomi_core::error::{ChainError, LookupError, StorageError};
use nomi_core::traits::{CandidateLookup, ChainData, ScoreStore};
use nomi_core::types::{
    Candidate, CrossNetworkReport, IdentityStatus, Release, Score, ScoreMetadata,
};
use parking_lot::Mutex;

use crate::checker::PassContext;
use crate::identity::build_identity_table;

/// Fixed wall-clock time used by tests, Unix milliseconds.
pub const NOW: u64 = 1_700_000_000_000;

pub fn clock() -> u64 {
    NOW
}

/// Read policy with short timeouts and near-zero backoff.
pub fn fast_reads() -> ReadPolicy {
    ReadPolicy {
        timeout_ms: 500,
        retries: 1,
        backoff_ms: 1,
        max_concurrent_reads: 4,
    }
}

/// A candidate that passes every admission rule against a chain built with
/// [`MockChain::with_candidates`].
pub fn candidate(stash: &str) -> Candidate {
    Candidate {
        stash: stash.to_string(),
        name: stash.to_string(),
        discovered_at: NOW - 4 * WEEK_MS,
        online_since: NOW - 4 * WEEK_MS,
        offline_since: 0,
        offline_accumulated: 0,
        version: Some("0.9.12".to_string()),
        bonded: 1_000,
        inclusion: 0.5,
        span_inclusion: 0.5,
        faults: 0,
        rank: 50,
        nominated_at: NOW - WEEK_MS,
        unclaimed_eras: Vec::new(),
        kusama_stash: None,
        skip_self_stake: false,
    }
}

/// Per-account on-chain state.
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub identity: Option<String>,
    pub verified: bool,
    pub staked: bool,
    /// Perbill.
    pub commission: u32,
    pub bonded: u128,
    pub fail_identity: bool,
    pub fail_commission: bool,
    pub fail_bonded: bool,
    pub fail_destination: bool,
}

impl MockAccount {
    fn healthy(stash: &str) -> Self {
        Self {
            identity: Some(format!("identity-{stash}")),
            verified: true,
            staked: true,
            commission: 10_000_000,
            bonded: 1_000,
            fail_identity: false,
            fail_commission: false,
            fail_bonded: false,
            fail_destination: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct MockState {
    pub validators: HashSet<String>,
    pub accounts: HashMap<String, MockAccount>,
    pub era: u32,
    pub fail_validators: bool,
    pub fail_era: bool,
    /// Delay applied to every commission read.
    pub commission_delay: Option<Duration>,
}

/// Chain reader backed by a mutable in-memory state.
#[derive(Debug, Default)]
pub struct MockChain {
    pub state: Mutex<MockState>,
    /// Number of reads served, across all methods.
    pub reads: AtomicUsize,
    /// Commission reads currently awaiting their delay.
    pub in_flight: AtomicUsize,
    /// Highest value `in_flight` has reached.
    pub peak_in_flight: AtomicUsize,
}

impl MockChain {
    /// A chain where each candidate has a validate intention and a healthy
    /// account.
    pub fn with_candidates(candidates: &[&Candidate]) -> Self {
        let chain = Self::default();
        {
            let mut state = chain.state.lock();
            state.era = 100;
            for c in candidates {
                state.validators.insert(c.stash.clone());
                state
                    .accounts
                    .insert(c.stash.clone(), MockAccount::healthy(&c.stash));
            }
        }
        chain
    }

    /// Mutate the account for `stash`. Panics if it does not exist.
    pub fn account_mut(&self, stash: &str, f: impl FnOnce(&mut MockAccount)) {
        let mut state = self.state.lock();
        let account = state
            .accounts
            .get_mut(stash)
            .unwrap_or_else(|| panic!("no mock account for {stash}"));
        f(account);
    }

    fn account(&self, stash: &str) -> Result<MockAccount, ChainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .accounts
            .get(stash)
            .cloned()
            .ok_or_else(|| ChainError::AccountNotFound(stash.to_string()))
    }
}

#[async_trait]
impl ChainData for MockChain {
    async fn validators(&self) -> Result<HashSet<String>, ChainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        if state.fail_validators {
            return Err(ChainError::Rpc("validators unavailable".into()));
        }
        Ok(state.validators.clone())
    }

    async fn identity(&self, stash: &str) -> Result<String, ChainError> {
        let account = self.account(stash)?;
        if account.fail_identity {
            return Err(ChainError::Rpc("identity unavailable".into()));
        }
        Ok(account.identity.unwrap_or_default())
    }

    async fn identity_status(&self, stash: &str) -> Result<IdentityStatus, ChainError> {
        let account = self.account(stash)?;
        if account.fail_identity {
            return Err(ChainError::Rpc("identity unavailable".into()));
        }
        Ok(IdentityStatus {
            has_identity: account.identity.is_some(),
            verified: account.verified,
        })
    }

    async fn destination_is_staked(&self, stash: &str) -> Result<bool, ChainError> {
        let account = self.account(stash)?;
        if account.fail_destination {
            return Err(ChainError::Rpc("destination unavailable".into()));
        }
        Ok(account.staked)
    }

    async fn commission(&self, stash: &str) -> Result<u32, ChainError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        let delay = self.state.lock().commission_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let account = self.account(stash)?;
        if account.fail_commission {
            return Err(ChainError::Rpc("commission unavailable".into()));
        }
        Ok(account.commission)
    }

    async fn bonded_amount(&self, stash: &str) -> Result<u128, ChainError> {
        let account = self.account(stash)?;
        if account.fail_bonded {
            return Err(ChainError::Rpc("bonded unavailable".into()));
        }
        Ok(account.bonded)
    }

    async fn active_era(&self) -> Result<u32, ChainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock();
        if state.fail_era {
            return Err(ChainError::Rpc("era unavailable".into()));
        }
        Ok(state.era)
    }
}

/// Score store recording every write.
#[derive(Debug, Default)]
pub struct MockStore {
    pub release: Mutex<Option<Release>>,
    pub metadata: Mutex<Vec<ScoreMetadata>>,
    pub scores: Mutex<Vec<Score>>,
    pub fail_writes: AtomicBool,
    pub fail_release: AtomicBool,
}

impl MockStore {
    pub fn with_release(name: &str) -> Self {
        let store = Self::default();
        *store.release.lock() = Some(Release {
            name: name.to_string(),
            published_at: NOW - WEEK_MS,
        });
        store
    }
}

#[async_trait]
impl ScoreStore for MockStore {
    async fn latest_release(&self) -> Result<Option<Release>, StorageError> {
        if self.fail_release.load(Ordering::SeqCst) {
            return Err(StorageError::Serialization("corrupt release record".into()));
        }
        Ok(self.release.lock().clone())
    }

    async fn set_score_metadata(&self, metadata: &ScoreMetadata) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Serialization("write rejected".into()));
        }
        self.metadata.lock().push(metadata.clone());
        Ok(())
    }

    async fn set_validator_score(&self, score: &Score) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Serialization("write rejected".into()));
        }
        self.scores.lock().push(score.clone());
        Ok(())
    }
}

/// Cross-network lookup returning a canned report or a canned error.
pub struct MockLookup {
    outcome: Result<CrossNetworkReport, fn() -> LookupError>,
    pub calls: AtomicUsize,
}

impl MockLookup {
    pub fn report(report: CrossNetworkReport) -> Self {
        Self {
            outcome: Ok(report),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: fn() -> LookupError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CandidateLookup for MockLookup {
    async fn lookup(&self, _stash: &str) -> Result<CrossNetworkReport, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(report) => Ok(report.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

/// Build a pass context for `population` against `chain`, with no release
/// record and [`NOW`] as the pass time.
pub async fn pass_context(chain: &MockChain, population: &[Candidate]) -> PassContext {
    let identities = build_identity_table(chain, population, &fast_reads()).await;
    PassContext {
        now: NOW,
        identities,
        validators: chain.validators().await,
        latest_release: Ok(None),
        active_era: chain.active_era().await,
    }
}
