//! Engine constants. All timestamps and durations are in milliseconds since
//! the Unix epoch; commission values are in Perbill (1e9 = 100%).

/// One week in milliseconds. Used as the uptime window and the minimum
/// connection age.
pub const WEEK_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Minimum time a candidate must have been known before it is eligible.
pub const MIN_CONNECTION_TIME_MS: u64 = WEEK_MS;

/// Maximum fraction of the trailing week a candidate may have been offline.
pub const MAX_OFFLINE_RATIO: f64 = 0.02;

/// Maximum number of registered candidates that may share one identity.
pub const MAX_IDENTITY_SHARES: u32 = 2;

/// Candidates on the secondary network ranked below this are rejected.
pub const MIN_CROSS_NETWORK_RANK: i64 = 25;

/// Perbill denominator: `1_000_000_000` is 100% commission.
pub const PERBILL: u32 = 1_000_000_000;

/// Upper bound (exclusive) of the per-candidate jitter added on top of 1.0.
pub const JITTER_SPAN: f64 = 0.05;

/// Default commission ceiling: 5%.
pub const DEFAULT_MAX_COMMISSION: u32 = 50_000_000;

/// Default unclaimed-era threshold.
pub const DEFAULT_UNCLAIMED_ERA_THRESHOLD: u32 = 4;

/// Default per-call timeout for remote reads.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Default number of in-flight candidate evaluations in the gated paths.
pub const DEFAULT_MAX_CONCURRENT_READS: usize = 4;

/// Convert a Perbill value to a percentage for display.
///
/// # Examples
///
/// ```
/// use nomi_core::constants::perbill_to_percent;
/// assert_eq!(perbill_to_percent(50_000_000), 5.0);
/// assert_eq!(perbill_to_percent(0), 0.0);
/// ```
pub fn perbill_to_percent(value: u32) -> f64 {
    value as f64 / PERBILL as f64 * 100.0
}
