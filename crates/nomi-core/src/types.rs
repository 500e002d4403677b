//! Core data types: candidates, verdicts, scores, and ranked projections.

use serde::{Deserialize, Serialize};

use crate::stats::Stats;

/// A validator node competing for nomination.
///
/// Candidates are supplied by an external source and treated as immutable
/// snapshots for the duration of one evaluation pass. Timestamps are Unix
/// milliseconds; `0` means "never" for `online_since`/`offline_since`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    /// Stable on-chain account identifier.
    pub stash: String,
    /// Display name.
    pub name: String,
    pub discovered_at: u64,
    pub online_since: u64,
    pub offline_since: u64,
    /// Total offline time within the trailing week.
    pub offline_accumulated: u64,
    /// Client version string as reported by telemetry.
    pub version: Option<String>,
    /// Self-stake in the smallest on-chain unit.
    pub bonded: u128,
    pub inclusion: f64,
    pub span_inclusion: f64,
    pub faults: u32,
    pub rank: i64,
    pub nominated_at: u64,
    /// Eras with rewards not yet claimed, oldest first.
    pub unclaimed_eras: Vec<u32>,
    /// Stash on the secondary network, if the operator runs one there.
    pub kusama_stash: Option<String>,
    /// Exempt this candidate from the self-stake minimum.
    pub skip_self_stake: bool,
}

/// Outcome of evaluating one candidate against a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure reason, or `None` for a valid verdict.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

/// An invalid verdict tied back to the candidate it was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidCandidate {
    pub stash: String,
    pub name: String,
    pub reason: String,
}

/// Identity registration status for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityStatus {
    pub has_identity: bool,
    /// A registrar has issued a positive judgement.
    pub verified: bool,
}

/// The most recent client release known to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Version string, e.g. `v0.9.12`.
    pub name: String,
    pub published_at: u64,
}

/// Response body of the cross-network candidate lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrossNetworkReport {
    pub invalidity_reasons: Option<String>,
    pub rank: Option<i64>,
}

/// Whether a higher raw value of a dimension is better or worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// The nine scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Inclusion,
    SpanInclusion,
    Discovered,
    Nominated,
    Rank,
    Unclaimed,
    Bonded,
    Faults,
    Offline,
}

impl Dimension {
    pub const ALL: [Dimension; 9] = [
        Dimension::Inclusion,
        Dimension::SpanInclusion,
        Dimension::Discovered,
        Dimension::Nominated,
        Dimension::Rank,
        Dimension::Unclaimed,
        Dimension::Bonded,
        Dimension::Faults,
        Dimension::Offline,
    ];

    pub fn polarity(self) -> Polarity {
        match self {
            Dimension::Rank | Dimension::Bonded => Polarity::HigherIsBetter,
            _ => Polarity::LowerIsBetter,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Inclusion => "inclusion",
            Dimension::SpanInclusion => "span_inclusion",
            Dimension::Discovered => "discovered",
            Dimension::Nominated => "nominated",
            Dimension::Rank => "rank",
            Dimension::Unclaimed => "unclaimed",
            Dimension::Bonded => "bonded",
            Dimension::Faults => "faults",
            Dimension::Offline => "offline",
        }
    }

    /// Raw value of this dimension for a candidate. Absent data reads as `0`.
    pub fn raw_value(self, candidate: &Candidate) -> f64 {
        match self {
            Dimension::Inclusion => candidate.inclusion,
            Dimension::SpanInclusion => candidate.span_inclusion,
            Dimension::Discovered => candidate.discovered_at as f64,
            Dimension::Nominated => candidate.nominated_at as f64,
            Dimension::Rank => candidate.rank as f64,
            Dimension::Unclaimed => candidate.unclaimed_eras.len() as f64,
            Dimension::Bonded => candidate.bonded as f64,
            Dimension::Faults => candidate.faults as f64,
            Dimension::Offline => candidate.offline_accumulated as f64,
        }
    }
}

/// The nine weighted sub-scores of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub inclusion: f64,
    pub span_inclusion: f64,
    pub discovered: f64,
    pub nominated: f64,
    pub rank: f64,
    pub unclaimed: f64,
    pub bonded: f64,
    pub faults: f64,
    pub offline: f64,
}

impl SubScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Inclusion => self.inclusion,
            Dimension::SpanInclusion => self.span_inclusion,
            Dimension::Discovered => self.discovered,
            Dimension::Nominated => self.nominated,
            Dimension::Rank => self.rank,
            Dimension::Unclaimed => self.unclaimed,
            Dimension::Bonded => self.bonded,
            Dimension::Faults => self.faults,
            Dimension::Offline => self.offline,
        }
    }

    pub fn set(&mut self, dimension: Dimension, value: f64) {
        let slot = match dimension {
            Dimension::Inclusion => &mut self.inclusion,
            Dimension::SpanInclusion => &mut self.span_inclusion,
            Dimension::Discovered => &mut self.discovered,
            Dimension::Nominated => &mut self.nominated,
            Dimension::Rank => &mut self.rank,
            Dimension::Unclaimed => &mut self.unclaimed,
            Dimension::Bonded => &mut self.bonded,
            Dimension::Faults => &mut self.faults,
            Dimension::Offline => &mut self.offline,
        };
        *slot = value;
    }

    /// Sum of all nine sub-scores.
    pub fn sum(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }
}

/// Per-candidate score record.
///
/// # Invariants
///
/// * `aggregate == sub.sum()`
/// * `total == aggregate * jitter`, `jitter` in `[1.0, 1.05)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub stash: String,
    pub updated_at: u64,
    pub sub: SubScores,
    pub aggregate: f64,
    pub jitter: f64,
    pub total: f64,
}

/// Statistics and weight of one dimension, as persisted in score metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSummary {
    pub dimension: Dimension,
    pub weight: f64,
    pub stats: Stats,
}

/// One scoring pass's population statistics, persisted as a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    pub updated_at: u64,
    /// One entry per dimension, in [`Dimension::ALL`] order.
    pub dimensions: Vec<DimensionSummary>,
}

/// A reduced projection of [`Candidate`] plus its [`Score`], as held in the
/// ranking cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub stash: String,
    pub name: String,
    pub kusama_stash: Option<String>,
    pub discovered_at: u64,
    pub nominated_at: u64,
    pub rank: i64,
    pub faults: u32,
    pub inclusion: f64,
    pub span_inclusion: f64,
    pub bonded: u128,
    pub offline_accumulated: u64,
    pub unclaimed_eras: Vec<u32>,
    pub score: Score,
}

impl RankedCandidate {
    pub fn new(candidate: &Candidate, score: Score) -> Self {
        Self {
            stash: candidate.stash.clone(),
            name: candidate.name.clone(),
            kusama_stash: candidate.kusama_stash.clone(),
            discovered_at: candidate.discovered_at,
            nominated_at: candidate.nominated_at,
            rank: candidate.rank,
            faults: candidate.faults,
            inclusion: candidate.inclusion,
            span_inclusion: candidate.span_inclusion,
            bonded: candidate.bonded,
            offline_accumulated: candidate.offline_accumulated,
            unclaimed_eras: candidate.unclaimed_eras.clone(),
            score,
        }
    }

    pub fn total(&self) -> f64 {
        self.score.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_reason() {
        assert!(Validity::Valid.is_valid());
        assert_eq!(Validity::Valid.reason(), None);
        let v = Validity::Invalid("bad".into());
        assert!(!v.is_valid());
        assert_eq!(v.reason(), Some("bad"));
    }

    #[test]
    fn polarity_of_each_dimension() {
        let higher: Vec<_> = Dimension::ALL
            .iter()
            .filter(|d| d.polarity() == Polarity::HigherIsBetter)
            .collect();
        assert_eq!(higher, vec![&Dimension::Rank, &Dimension::Bonded]);
    }

    #[test]
    fn unclaimed_raw_value_is_era_count() {
        let c = Candidate {
            unclaimed_eras: vec![1, 2, 3],
            ..Candidate::default()
        };
        assert_eq!(Dimension::Unclaimed.raw_value(&c), 3.0);
        assert_eq!(Dimension::Unclaimed.raw_value(&Candidate::default()), 0.0);
    }

    #[test]
    fn sub_scores_set_get_sum() {
        let mut sub = SubScores::default();
        for (i, d) in Dimension::ALL.iter().enumerate() {
            sub.set(*d, i as f64);
        }
        assert_eq!(sub.get(Dimension::Offline), 8.0);
        assert_eq!(sub.sum(), 36.0);
    }

    #[test]
    fn candidate_deserializes_with_missing_fields() {
        let c: Candidate = serde_json::from_str(r#"{"stash":"abc","name":"node"}"#).unwrap();
        assert_eq!(c.stash, "abc");
        assert_eq!(c.bonded, 0);
        assert!(c.unclaimed_eras.is_empty());
        assert!(c.kusama_stash.is_none());
    }

    #[test]
    fn cross_network_report_uses_camel_case() {
        let r: CrossNetworkReport =
            serde_json::from_str(r#"{"invalidityReasons":"offline","rank":12}"#).unwrap();
        assert_eq!(r.invalidity_reasons.as_deref(), Some("offline"));
        assert_eq!(r.rank, Some(12));
    }
}
