//! Constraint configuration: rule toggles, thresholds, score weights, and
//! remote-read policy. Supplied once at engine construction.

use std::fmt;
use std::time::Duration;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_MAX_COMMISSION, DEFAULT_MAX_CONCURRENT_READS, DEFAULT_READ_TIMEOUT_MS,
    DEFAULT_UNCLAIMED_ERA_THRESHOLD,
};
use crate::error::ConfigError;
use crate::types::Dimension;

/// Rule toggles and thresholds for candidate admission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintConfig {
    pub skip_connection_time: bool,
    pub skip_identity: bool,
    pub skip_staked_destination: bool,
    pub skip_client_upgrade: bool,
    pub skip_unclaimed: bool,
    /// Minimum self-stake, in the smallest on-chain unit. Accepts an
    /// integer or a decimal string.
    #[serde(deserialize_with = "amount")]
    pub min_self_stake: u128,
    /// Commission ceiling in Perbill.
    pub max_commission: u32,
    pub unclaimed_era_threshold: u32,
    pub weights: ScoreWeights,
    pub reads: ReadPolicy,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            skip_connection_time: false,
            skip_identity: false,
            skip_staked_destination: false,
            skip_client_upgrade: false,
            skip_unclaimed: false,
            min_self_stake: 0,
            max_commission: DEFAULT_MAX_COMMISSION,
            unclaimed_era_threshold: DEFAULT_UNCLAIMED_ERA_THRESHOLD,
            weights: ScoreWeights::default(),
            reads: ReadPolicy::default(),
        }
    }
}

impl ConstraintConfig {
    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reads.validate()?;
        self.weights.validate()
    }
}

/// An on-chain amount given as an integer or a decimal string. Layered
/// config sources carry integers as `i64` and environment values as strings.
fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = u128;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative integer or decimal string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u128, E> {
            Ok(v.into())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<u128, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u128, E> {
            u128::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u128, E> {
            v.trim()
                .parse()
                .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// Weight applied to each scoring dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
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

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            inclusion: 5.0,
            span_inclusion: 40.0,
            discovered: 5.0,
            nominated: 35.0,
            rank: 5.0,
            unclaimed: 15.0,
            bonded: 13.0,
            faults: 5.0,
            offline: 2.0,
        }
    }
}

impl ScoreWeights {
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

    fn validate(&self) -> Result<(), ConfigError> {
        for dimension in Dimension::ALL {
            let value = self.get(dimension);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    name: dimension.name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Timeout, retry, and concurrency policy for remote reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadPolicy {
    pub timeout_ms: u64,
    /// Extra attempts after the first failure.
    pub retries: u32,
    /// Base backoff, doubled on each retry.
    pub backoff_ms: u64,
    /// Candidate evaluations in flight at once in the gated paths.
    pub max_concurrent_reads: usize,
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            retries: 1,
            backoff_ms: 250,
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
        }
    }
}

impl ReadPolicy {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Backoff before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.max_concurrent_reads == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let w = ScoreWeights::default();
        assert_eq!(w.get(Dimension::SpanInclusion), 40.0);
        assert_eq!(w.get(Dimension::Nominated), 35.0);
        assert_eq!(w.get(Dimension::Bonded), 13.0);
        let total: f64 = Dimension::ALL.iter().map(|d| w.get(*d)).sum();
        assert_eq!(total, 125.0);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ConstraintConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = ConstraintConfig {
            reads: ReadPolicy {
                timeout_ms: 0,
                ..ReadPolicy::default()
            },
            ..ConstraintConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let cfg = ConstraintConfig {
            reads: ReadPolicy {
                max_concurrent_reads: 0,
                ..ReadPolicy::default()
            },
            ..ConstraintConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroConcurrency));
    }

    #[test]
    fn negative_weight_rejected() {
        let cfg = ConstraintConfig {
            weights: ScoreWeights {
                faults: -1.0,
                ..ScoreWeights::default()
            },
            ..ConstraintConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidWeight { name: "faults", .. })
        ));
    }

    #[test]
    fn backoff_doubles() {
        let p = ReadPolicy {
            backoff_ms: 100,
            ..ReadPolicy::default()
        };
        assert_eq!(p.backoff(1), Duration::from_millis(100));
        assert_eq!(p.backoff(2), Duration::from_millis(200));
        assert_eq!(p.backoff(3), Duration::from_millis(400));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: ConstraintConfig =
            serde_json::from_str(r#"{"skip_identity":true,"weights":{"bonded":20.0}}"#).unwrap();
        assert!(cfg.skip_identity);
        assert_eq!(cfg.weights.bonded, 20.0);
        assert_eq!(cfg.weights.span_inclusion, 40.0);
        assert_eq!(cfg.max_commission, DEFAULT_MAX_COMMISSION);
    }

    #[test]
    fn self_stake_from_number_or_string() {
        let cfg: ConstraintConfig = serde_json::from_str(r#"{"min_self_stake":5000}"#).unwrap();
        assert_eq!(cfg.min_self_stake, 5_000);

        let cfg: ConstraintConfig =
            serde_json::from_str(r#"{"min_self_stake":"123456789012345678901234567890"}"#).unwrap();
        assert_eq!(cfg.min_self_stake, 123_456_789_012_345_678_901_234_567_890);
    }

    #[test]
    fn negative_or_garbage_self_stake_rejected() {
        assert!(serde_json::from_str::<ConstraintConfig>(r#"{"min_self_stake":-1}"#).is_err());
        assert!(serde_json::from_str::<ConstraintConfig>(r#"{"min_self_stake":"lots"}"#).is_err());
    }
}
