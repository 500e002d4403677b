//! Single-candidate validity checker.
//!
//! Evaluates one candidate against the admission rules in a fixed order and
//! returns on the first failure:
//!
//! 1. online
//! 2. validate intention
//! 3. client version (skippable)
//! 4. connection age (skippable)
//! 5. identity (skippable)
//! 6. weekly uptime
//! 7. reward destination (skippable)
//! 8. commission
//! 9. self-stake (skippable per candidate)
//! 10. unclaimed rewards (skippable)
//! 11. cross-network rank (advisory, only with a secondary stash)
//!
//! Remote read failures become invalid verdicts carrying the error text.
//! Failures of the advisory lookup are logged and ignored.

use std::collections::HashSet;

use nomi_core::config::ConstraintConfig;
use nomi_core::constants::{
    MAX_IDENTITY_SHARES, MAX_OFFLINE_RATIO, MIN_CONNECTION_TIME_MS, MIN_CROSS_NETWORK_RANK,
    WEEK_MS, perbill_to_percent,
};
use nomi_core::error::{ChainError, StorageError};
use nomi_core::traits::{CandidateLookup, ChainData};
use nomi_core::types::{Candidate, Release, Validity};
use nomi_core::version;
use tracing::{debug, warn};

use crate::identity::IdentityHashTable;
use crate::remote::guarded;

/// A failed rule, carrying the human-readable reason.
pub(crate) type Rejection = String;

/// Reads shared by every candidate in one pass, fetched once.
///
/// A failed prefetch is kept as the error so each candidate reaching the
/// dependent rule is rejected with its text.
#[derive(Debug, Clone)]
pub struct PassContext {
    /// Wall-clock time of the pass, Unix milliseconds.
    pub now: u64,
    pub identities: IdentityHashTable,
    pub validators: Result<HashSet<String>, ChainError>,
    pub latest_release: Result<Option<Release>, StorageError>,
    pub active_era: Result<u32, ChainError>,
}

/// Runs the admission rules against candidates.
pub struct Checker<'a> {
    pub(crate) config: &'a ConstraintConfig,
    pub(crate) chain: &'a dyn ChainData,
    pub(crate) lookup: Option<&'a dyn CandidateLookup>,
}

impl<'a> Checker<'a> {
    pub fn new(
        config: &'a ConstraintConfig,
        chain: &'a dyn ChainData,
        lookup: Option<&'a dyn CandidateLookup>,
    ) -> Self {
        Self {
            config,
            chain,
            lookup,
        }
    }

    /// Evaluate every admission rule for `candidate`.
    pub async fn check(&self, candidate: &Candidate, ctx: &PassContext) -> Validity {
        match self.admission_rules(candidate, ctx).await {
            Ok(()) => Validity::Valid,
            Err(reason) => {
                debug!(stash = %candidate.stash, %reason, "candidate invalid");
                Validity::Invalid(reason)
            }
        }
    }

    async fn admission_rules(&self, c: &Candidate, ctx: &PassContext) -> Result<(), Rejection> {
        let cfg = self.config;

        check_online(c)?;
        self.check_validate_intention(c, ctx)?;
        if !cfg.skip_client_upgrade {
            check_client_version(c, ctx)?;
        }
        if !cfg.skip_connection_time {
            check_connection_time(c, ctx.now)?;
        }
        if !cfg.skip_identity {
            self.check_identity(c, &ctx.identities).await?;
        }
        check_uptime(c)?;
        if !cfg.skip_staked_destination {
            self.check_staked_destination(c).await?;
        }
        self.check_commission(c).await?;
        if !c.skip_self_stake {
            self.check_self_stake(c).await?;
        }
        if !cfg.skip_unclaimed {
            self.check_unclaimed(c, ctx)?;
        }
        if let Some(secondary) = &c.kusama_stash {
            self.check_cross_network(c, secondary).await?;
        }
        Ok(())
    }

    fn check_validate_intention(&self, c: &Candidate, ctx: &PassContext) -> Result<(), Rejection> {
        let validators = ctx
            .validators
            .as_ref()
            .map_err(|e| format!("{} validator set unavailable: {e}", c.name))?;
        if !validators.contains(&self.chain.format_address(&c.stash)) {
            return Err(format!("{} does not have a validate intention.", c.name));
        }
        Ok(())
    }

    async fn check_identity(&self, c: &Candidate, table: &IdentityHashTable) -> Result<(), Rejection> {
        let policy = &self.config.reads;
        let status = guarded(policy, "identity_status", || self.chain.identity_status(&c.stash))
            .await
            .map_err(|e| format!("{} identity unavailable: {e}", c.name))?;
        if !status.has_identity {
            return Err(format!("{} does not have an identity set.", c.name));
        }
        if !status.verified {
            return Err(format!(
                "{} has an identity but is not verified by a registrar.",
                c.name
            ));
        }

        let identity = guarded(policy, "identity", || self.chain.identity(&c.stash))
            .await
            .map_err(|e| format!("{} identity unavailable: {e}", c.name))?;
        let count = table.count(&identity);
        if count == 0 || count > MAX_IDENTITY_SHARES {
            return Err(format!(
                "{} identity count is {count}; an identity must be shared by 1 to {MAX_IDENTITY_SHARES} candidates.",
                c.name
            ));
        }
        Ok(())
    }

    pub(crate) async fn check_staked_destination(&self, c: &Candidate) -> Result<(), Rejection> {
        let staked = guarded(&self.config.reads, "destination", || {
            self.chain.destination_is_staked(&c.stash)
        })
        .await
        .map_err(|e| format!("{} reward destination unavailable: {e}", c.name))?;
        if !staked {
            return Err(format!(
                "{} does not have reward destination as Staked.",
                c.name
            ));
        }
        Ok(())
    }

    pub(crate) async fn check_commission(&self, c: &Candidate) -> Result<(), Rejection> {
        let commission = guarded(&self.config.reads, "commission", || {
            self.chain.commission(&c.stash)
        })
        .await
        .map_err(|e| format!("{} commission read failed: {e}", c.name))?;
        if commission > self.config.max_commission {
            return Err(format!(
                "{} commission is set higher than the maximum allowed. Set: {:.2}% Allowed: {:.2}%",
                c.name,
                perbill_to_percent(commission),
                perbill_to_percent(self.config.max_commission),
            ));
        }
        Ok(())
    }

    pub(crate) async fn check_self_stake(&self, c: &Candidate) -> Result<(), Rejection> {
        let bonded = guarded(&self.config.reads, "bonded", || {
            self.chain.bonded_amount(&c.stash)
        })
        .await
        .map_err(|e| format!("{} bonded amount read failed: {e}", c.name))?;
        if bonded < self.config.min_self_stake {
            return Err(format!(
                "{} has less than the minimum amount bonded: {bonded} is bonded, minimum is {}.",
                c.name, self.config.min_self_stake
            ));
        }
        Ok(())
    }

    fn check_unclaimed(&self, c: &Candidate, ctx: &PassContext) -> Result<(), Rejection> {
        let era = ctx
            .active_era
            .as_ref()
            .map_err(|e| format!("{} active era unavailable: {e}", c.name))?;
        let threshold = i64::from(*era) - i64::from(self.config.unclaimed_era_threshold) - 1;
        let stale: Vec<u32> = c
            .unclaimed_eras
            .iter()
            .copied()
            .filter(|e| i64::from(*e) <= threshold)
            .collect();
        if !stale.is_empty() {
            return Err(format!(
                "{} has unclaimed eras: {stale:?} at or before era {threshold}.",
                c.name
            ));
        }
        Ok(())
    }

    async fn check_cross_network(&self, c: &Candidate, secondary: &str) -> Result<(), Rejection> {
        let Some(lookup) = self.lookup else {
            debug!(stash = %c.stash, "no cross-network lookup configured, skipping");
            return Ok(());
        };

        let report =
            match tokio::time::timeout(self.config.reads.timeout(), lookup.lookup(secondary)).await
            {
                Ok(Ok(report)) => report,
                Ok(Err(err)) => {
                    warn!(stash = %c.stash, secondary, error = %err, "cross-network lookup failed, ignoring");
                    return Ok(());
                }
                Err(_) => {
                    warn!(stash = %c.stash, secondary, "cross-network lookup timed out, ignoring");
                    return Ok(());
                }
            };

        if let Some(reasons) = report.invalidity_reasons.filter(|r| !r.is_empty()) {
            return Err(format!(
                "{} has a secondary-network stash {secondary} that is invalid: {reasons}",
                c.name
            ));
        }
        if let Some(rank) = report.rank {
            if rank < MIN_CROSS_NETWORK_RANK {
                return Err(format!(
                    "{} secondary-network stash {secondary} has rank {rank}, below the minimum of {MIN_CROSS_NETWORK_RANK}.",
                    c.name
                ));
            }
        }
        Ok(())
    }
}

fn check_online(c: &Candidate) -> Result<(), Rejection> {
    if c.online_since == 0 {
        return Err(format!("{} offline. Not yet seen online.", c.name));
    }
    if c.offline_since != 0 {
        return Err(format!(
            "{} offline. Offline since {}.",
            c.name, c.offline_since
        ));
    }
    Ok(())
}

fn check_client_version(c: &Candidate, ctx: &PassContext) -> Result<(), Rejection> {
    let release = ctx
        .latest_release
        .as_ref()
        .map_err(|e| format!("{} latest release unavailable: {e}", c.name))?;
    // Without a release record there is nothing to compare against.
    let Some(release) = release else {
        return Ok(());
    };
    let Some(latest) = version::coerce(&release.name) else {
        warn!(release = %release.name, "latest release has no usable version, skipping");
        return Ok(());
    };

    let reported = c.version.as_deref().unwrap_or_default();
    let Some(current) = version::coerce(reported) else {
        return Err(format!(
            "{} reports an unrecognised client version {reported:?}. Latest: {latest}",
            c.name
        ));
    };
    if current < latest {
        return Err(format!(
            "{} is not running the latest client code. Latest: {latest}, current: {current}",
            c.name
        ));
    }
    Ok(())
}

fn check_connection_time(c: &Candidate, now: u64) -> Result<(), Rejection> {
    if now.saturating_sub(c.discovered_at) < MIN_CONNECTION_TIME_MS {
        return Err(format!(
            "{} has not been connected for minimum length of one week.",
            c.name
        ));
    }
    Ok(())
}

pub(crate) fn check_uptime(c: &Candidate) -> Result<(), Rejection> {
    let ratio = c.offline_accumulated as f64 / WEEK_MS as f64;
    if ratio > MAX_OFFLINE_RATIO {
        return Err(format!(
            "{} has been offline {:.2}% of the last week, above the {:.0}% limit.",
            c.name,
            ratio * 100.0,
            MAX_OFFLINE_RATIO * 100.0
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockChain, MockLookup, NOW, candidate, fast_reads, pass_context};
    use nomi_core::error::LookupError;
    use nomi_core::types::CrossNetworkReport;

    fn config() -> ConstraintConfig {
        ConstraintConfig {
            min_self_stake: 100,
            reads: fast_reads(),
            ..ConstraintConfig::default()
        }
    }

    async fn verdict(chain: &MockChain, c: &Candidate) -> Validity {
        verdict_with(&config(), chain, None, c).await
    }

    async fn verdict_with(
        cfg: &ConstraintConfig,
        chain: &MockChain,
        lookup: Option<&dyn CandidateLookup>,
        c: &Candidate,
    ) -> Validity {
        let ctx = pass_context(chain, std::slice::from_ref(c)).await;
        Checker::new(cfg, chain, lookup).check(c, &ctx).await
    }

    fn reason(v: &Validity) -> &str {
        v.reason().expect("expected an invalid verdict")
    }

    #[tokio::test]
    async fn healthy_candidate_is_valid() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        assert_eq!(verdict(&chain, &c).await, Validity::Valid);
    }

    #[tokio::test]
    async fn never_online_is_offline() {
        let mut c = candidate("alice");
        c.online_since = 0;
        let chain = MockChain::with_candidates(&[&c]);
        assert!(reason(&verdict(&chain, &c).await).contains("offline"));
    }

    #[tokio::test]
    async fn currently_offline_is_offline() {
        let mut c = candidate("alice");
        c.offline_since = NOW - 1_000;
        let chain = MockChain::with_candidates(&[&c]);
        assert!(reason(&verdict(&chain, &c).await).contains("offline"));
    }

    #[tokio::test]
    async fn missing_from_validator_set() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.state.lock().validators.clear();
        assert!(reason(&verdict(&chain, &c).await).contains("validate intention"));
    }

    #[tokio::test]
    async fn validator_set_failure_is_invalid() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.state.lock().fail_validators = true;
        assert!(reason(&verdict(&chain, &c).await).contains("validator set unavailable"));
    }

    async fn verdict_with_release(cfg: &ConstraintConfig, c: &Candidate, release: &str) -> Validity {
        let chain = MockChain::with_candidates(&[c]);
        let mut ctx = pass_context(&chain, std::slice::from_ref(c)).await;
        ctx.latest_release = Ok(Some(Release {
            name: release.into(),
            published_at: 0,
        }));
        Checker::new(cfg, &chain, None).check(c, &ctx).await
    }

    #[tokio::test]
    async fn outdated_client_rejected() {
        let mut c = candidate("alice");
        c.version = Some("0.9.11-abc".into());
        let r = verdict_with_release(&config(), &c, "v0.9.12").await;
        assert!(reason(&r).contains("latest client code"));
    }

    #[tokio::test]
    async fn current_client_accepted() {
        let mut c = candidate("alice");
        c.version = Some("0.9.12-5a7b0c2d-x86_64-linux-gnu".into());
        assert!(verdict_with_release(&config(), &c, "v0.9.12").await.is_valid());
    }

    #[tokio::test]
    async fn unknown_client_version_rejected() {
        let mut c = candidate("alice");
        c.version = None;
        let r = verdict_with_release(&config(), &c, "v0.9.12").await;
        assert!(reason(&r).contains("unrecognised client version"));
    }

    #[tokio::test]
    async fn outdated_client_skippable() {
        let mut c = candidate("alice");
        c.version = Some("0.9.11".into());
        let cfg = ConstraintConfig {
            skip_client_upgrade: true,
            ..config()
        };
        assert!(verdict_with_release(&cfg, &c, "v0.9.12").await.is_valid());
    }

    #[tokio::test]
    async fn release_read_failure_is_invalid() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        let mut ctx = pass_context(&chain, std::slice::from_ref(&c)).await;
        ctx.latest_release = Err(StorageError::Backend("db down".into()));
        let cfg = config();
        let r = Checker::new(&cfg, &chain, None).check(&c, &ctx).await;
        assert!(reason(&r).contains("db down"));
    }

    #[tokio::test]
    async fn no_release_record_skips_version_check() {
        let mut c = candidate("alice");
        c.version = None;
        let chain = MockChain::with_candidates(&[&c]);
        assert!(verdict(&chain, &c).await.is_valid());
    }

    #[tokio::test]
    async fn recently_discovered_rejected() {
        let mut c = candidate("alice");
        c.discovered_at = NOW - WEEK_MS + 1;
        let chain = MockChain::with_candidates(&[&c]);
        assert!(reason(&verdict(&chain, &c).await).contains("one week"));

        let cfg = ConstraintConfig {
            skip_connection_time: true,
            ..config()
        };
        assert!(verdict_with(&cfg, &chain, None, &c).await.is_valid());
    }

    #[tokio::test]
    async fn missing_identity_rejected() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.identity = None);
        assert!(reason(&verdict(&chain, &c).await).contains("does not have an identity"));
    }

    #[tokio::test]
    async fn unverified_identity_rejected() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.verified = false);
        assert!(reason(&verdict(&chain, &c).await).contains("not verified"));
    }

    #[tokio::test]
    async fn identity_shared_by_three_rejected() {
        let a = candidate("a");
        let b = candidate("b");
        let c = candidate("c");
        let chain = MockChain::with_candidates(&[&a, &b, &c]);
        for stash in ["a", "b", "c"] {
            chain.account_mut(stash, |acc| acc.identity = Some("operator".into()));
        }
        let ctx = pass_context(&chain, &[a.clone(), b, c]).await;
        let cfg = config();
        let v = Checker::new(&cfg, &chain, None).check(&a, &ctx).await;
        assert!(reason(&v).contains("identity count is 3"));
    }

    #[tokio::test]
    async fn identity_shared_by_two_allowed() {
        let a = candidate("a");
        let b = candidate("b");
        let chain = MockChain::with_candidates(&[&a, &b]);
        for stash in ["a", "b"] {
            chain.account_mut(stash, |acc| acc.identity = Some("operator".into()));
        }
        let ctx = pass_context(&chain, &[a.clone(), b]).await;
        let cfg = config();
        assert!(Checker::new(&cfg, &chain, None).check(&a, &ctx).await.is_valid());
    }

    #[tokio::test]
    async fn identity_absent_from_table_rejected() {
        let a = candidate("a");
        let chain = MockChain::with_candidates(&[&a]);
        // Table built from a population that does not include `a`.
        let ctx = pass_context(&chain, &[]).await;
        let cfg = config();
        let v = Checker::new(&cfg, &chain, None).check(&a, &ctx).await;
        assert!(reason(&v).contains("identity count is 0"));
    }

    #[tokio::test]
    async fn identity_skippable() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.identity = None);
        let cfg = ConstraintConfig {
            skip_identity: true,
            ..config()
        };
        assert!(verdict_with(&cfg, &chain, None, &c).await.is_valid());
    }

    #[tokio::test]
    async fn excessive_downtime_rejected_even_when_skips_set() {
        let mut c = candidate("alice");
        c.offline_accumulated = WEEK_MS / 20; // 5%
        let chain = MockChain::with_candidates(&[&c]);
        let cfg = ConstraintConfig {
            skip_connection_time: true,
            skip_identity: true,
            skip_staked_destination: true,
            skip_client_upgrade: true,
            skip_unclaimed: true,
            ..config()
        };
        assert!(reason(&verdict_with(&cfg, &chain, None, &c).await).contains("last week"));
    }

    #[tokio::test]
    async fn downtime_at_limit_allowed() {
        let mut c = candidate("alice");
        c.offline_accumulated = WEEK_MS / 50; // exactly 2%
        let chain = MockChain::with_candidates(&[&c]);
        assert!(verdict(&chain, &c).await.is_valid());
    }

    #[tokio::test]
    async fn unstaked_destination_rejected() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.staked = false);
        assert!(reason(&verdict(&chain, &c).await).contains("Staked"));
    }

    #[tokio::test]
    async fn destination_read_error_is_reason() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.fail_destination = true);
        let r = verdict(&chain, &c).await;
        assert!(reason(&r).starts_with("alice reward destination unavailable"));
        assert!(reason(&r).contains("rpc error: destination unavailable"));
    }

    #[tokio::test]
    async fn high_commission_rejected() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.commission = 100_000_000);
        let r = verdict(&chain, &c).await;
        assert!(reason(&r).contains("commission"));
        assert!(reason(&r).contains("10.00%"));
    }

    #[tokio::test]
    async fn commission_read_error_is_reason() {
        let c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.fail_commission = true);
        let r = verdict(&chain, &c).await;
        assert!(reason(&r).contains("commission read failed"));
        assert!(reason(&r).contains("commission unavailable"));
    }

    #[tokio::test]
    async fn low_self_stake_rejected_unless_exempt() {
        let mut c = candidate("alice");
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.bonded = 99);
        assert!(reason(&verdict(&chain, &c).await).contains("minimum amount bonded"));

        c.skip_self_stake = true;
        assert!(verdict(&chain, &c).await.is_valid());
    }

    #[tokio::test]
    async fn stale_unclaimed_era_rejected() {
        let mut c = candidate("alice");
        c.unclaimed_eras = vec![90];
        let chain = MockChain::with_candidates(&[&c]);
        chain.state.lock().era = 100;
        let cfg = ConstraintConfig {
            unclaimed_era_threshold: 4,
            ..config()
        };
        let r = verdict_with(&cfg, &chain, None, &c).await;
        assert!(reason(&r).contains("unclaimed eras"));
        assert!(reason(&r).contains("era 95"));
    }

    #[tokio::test]
    async fn recent_unclaimed_era_allowed() {
        let mut c = candidate("alice");
        c.unclaimed_eras = vec![96, 99];
        let chain = MockChain::with_candidates(&[&c]);
        chain.state.lock().era = 100;
        let cfg = ConstraintConfig {
            unclaimed_era_threshold: 4,
            ..config()
        };
        assert!(verdict_with(&cfg, &chain, None, &c).await.is_valid());
    }

    #[tokio::test]
    async fn unclaimed_threshold_boundary_is_inclusive() {
        let mut c = candidate("alice");
        c.unclaimed_eras = vec![95];
        let chain = MockChain::with_candidates(&[&c]);
        chain.state.lock().era = 100;
        let cfg = ConstraintConfig {
            unclaimed_era_threshold: 4,
            ..config()
        };
        assert!(!verdict_with(&cfg, &chain, None, &c).await.is_valid());
    }

    #[tokio::test]
    async fn early_era_does_not_underflow() {
        let mut c = candidate("alice");
        c.unclaimed_eras = vec![0];
        let chain = MockChain::with_candidates(&[&c]);
        chain.state.lock().era = 2;
        assert!(verdict(&chain, &c).await.is_valid());
    }

    #[tokio::test]
    async fn cross_network_invalid_rejected() {
        let mut c = candidate("alice");
        c.kusama_stash = Some("ksm-alice".into());
        let chain = MockChain::with_candidates(&[&c]);
        let lookup = MockLookup::report(CrossNetworkReport {
            invalidity_reasons: Some("offline on kusama".into()),
            rank: Some(100),
        });
        let r = verdict_with(&config(), &chain, Some(&lookup), &c).await;
        assert!(reason(&r).contains("offline on kusama"));
    }

    #[tokio::test]
    async fn cross_network_low_rank_rejected() {
        let mut c = candidate("alice");
        c.kusama_stash = Some("ksm-alice".into());
        let chain = MockChain::with_candidates(&[&c]);
        let lookup = MockLookup::report(CrossNetworkReport {
            invalidity_reasons: None,
            rank: Some(24),
        });
        let r = verdict_with(&config(), &chain, Some(&lookup), &c).await;
        assert!(reason(&r).contains("rank 24"));
    }

    #[tokio::test]
    async fn cross_network_good_standing_passes() {
        let mut c = candidate("alice");
        c.kusama_stash = Some("ksm-alice".into());
        let chain = MockChain::with_candidates(&[&c]);
        let lookup = MockLookup::report(CrossNetworkReport {
            invalidity_reasons: Some(String::new()),
            rank: Some(25),
        });
        assert!(verdict_with(&config(), &chain, Some(&lookup), &c).await.is_valid());
    }

    #[tokio::test]
    async fn cross_network_failure_is_advisory() {
        let mut c = candidate("alice");
        c.kusama_stash = Some("ksm-alice".into());
        let chain = MockChain::with_candidates(&[&c]);
        let lookup = MockLookup::failing(|| LookupError::Transport("connection refused".into()));
        assert!(verdict_with(&config(), &chain, Some(&lookup), &c).await.is_valid());
    }

    #[tokio::test]
    async fn first_failure_wins() {
        // Offline and over commission: the online rule runs first.
        let mut c = candidate("alice");
        c.online_since = 0;
        let chain = MockChain::with_candidates(&[&c]);
        chain.account_mut("alice", |a| a.commission = 900_000_000);
        let r = verdict(&chain, &c).await;
        assert!(reason(&r).contains("offline"));
        assert!(!reason(&r).contains("commission"));
    }
}
