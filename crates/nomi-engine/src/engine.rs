//! The candidate engine: owns the constraint configuration and result caches,
//! and drives filter, score, and partition passes over the shared
//! chain-data reader and score store.

use std::sync::Arc;

use nomi_core::config::ConstraintConfig;
use nomi_core::error::EngineError;
use nomi_core::traits::{CandidateLookup, ChainData, ScoreStore};
use nomi_core::types::{Candidate, InvalidCandidate, RankedCandidate, Score, ScoreMetadata, Validity};
use tracing::{info, warn};

use crate::cache::SnapshotCell;
use crate::checker::{Checker, PassContext};
use crate::filter::{check_bounded, find_invalid};
use crate::identity::{IdentityHashTable, build_identity_table};
use crate::partition::{Partition, partition};
use crate::remote::guarded;
use crate::scoring;

/// Current wall-clock time in Unix milliseconds.
pub fn system_clock() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Candidate admission, ranking, and round partitioning.
///
/// The ranking and invalid-reason caches are replaced wholesale at the end
/// of each pass, so they can be read while a pass is in flight.
pub struct CandidateEngine {
    config: ConstraintConfig,
    chain: Arc<dyn ChainData>,
    store: Arc<dyn ScoreStore>,
    lookup: Option<Arc<dyn CandidateLookup>>,
    valid_cache: SnapshotCell<Vec<RankedCandidate>>,
    invalid_cache: SnapshotCell<Vec<InvalidCandidate>>,
    clock: fn() -> u64,
}

impl CandidateEngine {
    pub fn new(
        config: ConstraintConfig,
        chain: Arc<dyn ChainData>,
        store: Arc<dyn ScoreStore>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            chain,
            store,
            lookup: None,
            valid_cache: SnapshotCell::default(),
            invalid_cache: SnapshotCell::default(),
            clock: system_clock,
        })
    }

    /// Enable the cross-network check for candidates with a secondary stash.
    pub fn with_lookup(mut self, lookup: Arc<dyn CandidateLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ConstraintConfig {
        &self.config
    }

    fn checker(&self) -> Checker<'_> {
        Checker::new(&self.config, self.chain.as_ref(), self.lookup.as_deref())
    }

    /// Build the identity table for a candidate population.
    pub async fn identity_table(&self, candidates: &[Candidate]) -> IdentityHashTable {
        build_identity_table(self.chain.as_ref(), candidates, &self.config.reads).await
    }

    /// Fetch the per-pass shared reads.
    pub async fn pass_context(&self, identities: IdentityHashTable) -> PassContext {
        let policy = &self.config.reads;
        let validators = guarded(policy, "validators", || self.chain.validators()).await;
        let latest_release = guarded(policy, "latest_release", || self.store.latest_release()).await;
        let active_era = guarded(policy, "active_era", || self.chain.active_era()).await;

        if let Err(err) = &validators {
            warn!(error = %err, "validator set unavailable for this pass");
        }
        if let Err(err) = &latest_release {
            warn!(error = %err, "latest release unavailable for this pass");
        }
        if let Err(err) = &active_era {
            warn!(error = %err, "active era unavailable for this pass");
        }

        PassContext {
            now: (self.clock)(),
            identities,
            validators,
            latest_release,
            active_era,
        }
    }

    /// Evaluate one candidate against every admission rule.
    pub async fn check_candidate(
        &self,
        candidate: &Candidate,
        identities: &IdentityHashTable,
    ) -> Validity {
        let ctx = self.pass_context(identities.clone()).await;
        self.checker().check(candidate, &ctx).await
    }

    /// Check all candidates concurrently and cache the invalid ones.
    pub async fn find_invalid_candidates(
        &self,
        candidates: &[Candidate],
    ) -> Arc<Vec<InvalidCandidate>> {
        let identities = self.identity_table(candidates).await;
        let ctx = self.pass_context(identities).await;
        let invalid = Arc::new(find_invalid(&self.checker(), candidates, &ctx).await);

        info!(
            candidates = candidates.len(),
            invalid = invalid.len(),
            "batch validity filter complete"
        );
        self.invalid_cache.store(invalid.clone());
        invalid
    }

    /// Reasons from the most recent batch filter run.
    pub fn invalid_candidates(&self) -> Vec<String> {
        self.invalid_cache
            .load()
            .iter()
            .map(|i| i.reason.clone())
            .collect()
    }

    /// Full records from the most recent batch filter run.
    pub fn invalid_details(&self) -> Arc<Vec<InvalidCandidate>> {
        self.invalid_cache.load()
    }

    /// Filter `candidates` to the valid set, score and rank it, persist the
    /// scores, and cache the ranking.
    pub async fn score_candidates(&self, candidates: &[Candidate]) -> Arc<Vec<RankedCandidate>> {
        let identities = self.identity_table(candidates).await;
        let ctx = self.pass_context(identities).await;
        let verdicts = check_bounded(
            &self.checker(),
            candidates,
            &ctx,
            self.config.reads.max_concurrent_reads,
        )
        .await;

        let valid: Vec<Candidate> = candidates
            .iter()
            .zip(&verdicts)
            .filter(|(_, v)| v.is_valid())
            .map(|(c, _)| c.clone())
            .collect();

        let (metadata, ranked) =
            scoring::rank(&valid, &self.config.weights, ctx.now, &mut rand::thread_rng());

        self.persist(&metadata, &ranked).await;

        let ranked = Arc::new(ranked);
        self.valid_cache.store(ranked.clone());
        info!(
            candidates = candidates.len(),
            valid = ranked.len(),
            top = ranked.first().map(|r| r.name.as_str()).unwrap_or("-"),
            "scoring pass complete"
        );
        ranked
    }

    /// Ranking from the most recent scoring pass.
    pub fn valid_candidates(&self) -> Arc<Vec<RankedCandidate>> {
        self.valid_cache.load()
    }

    /// Score of `stash` in the current ranking.
    pub fn score_of(&self, stash: &str) -> Option<Score> {
        self.valid_cache
            .load()
            .iter()
            .find(|r| r.stash == stash)
            .map(|r| r.score.clone())
    }

    /// Split an already-nominated cohort into compliant and non-compliant
    /// candidates. Fails when the active era cannot be read.
    pub async fn partition_nominated(
        &self,
        cohort: &[Option<Candidate>],
    ) -> Result<Partition, EngineError> {
        partition(&self.checker(), cohort).await
    }

    async fn persist(&self, metadata: &ScoreMetadata, ranked: &[RankedCandidate]) {
        let policy = &self.config.reads;
        if let Err(err) = guarded(policy, "set_score_metadata", || {
            self.store.set_score_metadata(metadata)
        })
        .await
        {
            warn!(error = %err, "failed to persist score metadata");
        }

        for entry in ranked {
            if let Err(err) = guarded(policy, "set_validator_score", || {
                self.store.set_validator_score(&entry.score)
            })
            .await
            {
                warn!(stash = %entry.stash, error = %err, "failed to persist score");
            }
        }
    }
}
