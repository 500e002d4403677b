//! Distribution summaries and min-max normalisation.
//!
//! Pure computation, no IO. Degenerate populations (empty, singleton, or
//! constant) never panic or divide by zero; see [`get_stats`] and [`scaled`].

use serde::{Deserialize, Serialize};

/// Summary statistics of a numeric population.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Compute summary statistics for `values`.
///
/// An empty input yields all-zero fields. A single value is reported for
/// every location statistic, with `std == 0`.
///
/// # Examples
///
/// ```
/// use nomi_core::stats::get_stats;
///
/// let s = get_stats(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(s.min, 1.0);
/// assert_eq!(s.max, 4.0);
/// assert_eq!(s.median, 2.5);
/// assert_eq!(s.mean, 2.5);
/// ```
pub fn get_stats(values: &[f64]) -> Stats {
    if values.is_empty() {
        return Stats::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Stats {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        median: median(&sorted),
        p10: quantile(&sorted, 0.10),
        p25: quantile(&sorted, 0.25),
        p75: quantile(&sorted, 0.75),
        p90: quantile(&sorted, 0.90),
        std: variance.sqrt(),
    }
}

/// Median of an already-sorted, non-empty slice. Even lengths average the
/// two middle values.
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Linearly interpolated order statistic of an already-sorted, non-empty
/// slice at fraction `q` in `[0, 1]`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Min-max normalise `value` against `population`.
///
/// Returns `(value - min) / (max - min)`. When the population's range is
/// zero (empty, singleton, or constant) the result is `0`.
///
/// # Examples
///
/// ```
/// use nomi_core::stats::scaled;
///
/// let pop = [10.0, 20.0, 30.0];
/// assert_eq!(scaled(10.0, &pop), 0.0);
/// assert_eq!(scaled(20.0, &pop), 0.5);
/// assert_eq!(scaled(30.0, &pop), 1.0);
/// assert_eq!(scaled(7.0, &[7.0, 7.0]), 0.0);
/// ```
pub fn scaled(value: f64, population: &[f64]) -> f64 {
    let Some((min, max)) = range(population) else {
        return 0.0;
    };
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}

fn range(population: &[f64]) -> Option<(f64, f64)> {
    let mut iter = population.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}
