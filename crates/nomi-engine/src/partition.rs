//! Round partitioning of an already-nominated cohort.
//!
//! At a round boundary each nominated candidate is re-checked against a
//! reduced rule set: commission, self-stake (skippable per candidate),
//! reward destination (skippable), and weekly uptime. Admission-only rules
//! such as identity, client version, or connection age are not re-applied.

use std::collections::BTreeMap;

use futures::stream::{self, StreamExt};
use nomi_core::error::EngineError;
use nomi_core::types::{Candidate, Validity};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::checker::{Checker, Rejection, check_uptime};
use crate::remote::guarded;

/// A nominated candidate that is no longer compliant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadCandidate {
    pub candidate: Candidate,
    pub reason: String,
}

/// Result of partitioning a cohort, keyed by stash.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Partition {
    /// Active era at the time of the call.
    pub era: u32,
    pub good: BTreeMap<String, Candidate>,
    pub bad: BTreeMap<String, BadCandidate>,
}

impl Checker<'_> {
    /// Evaluate the reduced rule set for an already-nominated candidate.
    pub async fn check_nominated(&self, candidate: &Candidate) -> Validity {
        match self.nominated_rules(candidate).await {
            Ok(()) => Validity::Valid,
            Err(reason) => {
                debug!(stash = %candidate.stash, %reason, "nominated candidate no longer compliant");
                Validity::Invalid(reason)
            }
        }
    }

    async fn nominated_rules(&self, c: &Candidate) -> Result<(), Rejection> {
        self.check_commission(c).await?;
        if !c.skip_self_stake {
            self.check_self_stake(c).await?;
        }
        if !self.config.skip_staked_destination {
            self.check_staked_destination(c).await?;
        }
        check_uptime(c)
    }
}

/// Split `cohort` into compliant and non-compliant candidates.
///
/// Fails only when the active era cannot be read. Empty entries are skipped.
pub async fn partition(
    checker: &Checker<'_>,
    cohort: &[Option<Candidate>],
) -> Result<Partition, EngineError> {
    let policy = &checker.config.reads;
    let era = guarded(policy, "active_era", || checker.chain.active_era())
        .await
        .map_err(EngineError::EraUnavailable)?;

    let present: Vec<&Candidate> = cohort
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if entry.is_none() {
                warn!(index, "skipping empty cohort entry");
            }
            entry.as_ref()
        })
        .collect();

    let verdicts: Vec<Validity> = stream::iter(present.iter().copied())
        .map(|c| checker.check_nominated(c))
        .buffered(policy.max_concurrent_reads.max(1))
        .collect()
        .await;

    let mut result = Partition {
        era,
        ..Partition::default()
    };
    for (candidate, verdict) in present.into_iter().zip(verdicts) {
        let stash = candidate.stash.clone();
        if result.good.contains_key(&stash) || result.bad.contains_key(&stash) {
            warn!(%stash, "duplicate stash in cohort, keeping the later entry");
            result.good.remove(&stash);
            result.bad.remove(&stash);
        }
        match verdict {
            Validity::Valid => {
                result.good.insert(stash, candidate.clone());
            }
            Validity::Invalid(reason) => {
                result.bad.insert(
                    stash,
                    BadCandidate {
                        candidate: candidate.clone(),
                        reason,
                    },
                );
            }
        }
    }

    info!(era, good = result.good.len(), bad = result.bad.len(), "cohort partitioned");
    Ok(result)
}
