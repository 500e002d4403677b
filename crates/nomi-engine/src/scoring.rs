//! Weighted scoring and ranking over the valid candidate set.
//!
//! Pure computation, no IO. For each of the nine dimensions the valid
//! population is min-max normalised; lower-is-better dimensions contribute
//! `(1 - scaled) * weight`, higher-is-better ones `scaled * weight`. The sum
//! is multiplied by a jitter in `[1.0, 1.05)` so near-ties do not produce a
//! rigid ordering across consecutive rounds.

use nomi_core::config::ScoreWeights;
use nomi_core::constants::JITTER_SPAN;
use nomi_core::stats::{get_stats, scaled};
use nomi_core::types::{
    Candidate, Dimension, DimensionSummary, Polarity, RankedCandidate, Score, ScoreMetadata,
    SubScores,
};
use rand::Rng;

/// Raw values of every dimension across one population.
#[derive(Debug, Clone)]
pub struct Populations {
    values: [Vec<f64>; 9],
}

impl Populations {
    pub fn from_candidates(candidates: &[Candidate]) -> Self {
        let values = Dimension::ALL.map(|d| candidates.iter().map(|c| d.raw_value(c)).collect());
        Self { values }
    }

    pub fn get(&self, dimension: Dimension) -> &[f64] {
        &self.values[dimension as usize]
    }
}

/// Statistics for every dimension, paired with its weight.
pub fn score_metadata(pops: &Populations, weights: &ScoreWeights, now: u64) -> ScoreMetadata {
    ScoreMetadata {
        updated_at: now,
        dimensions: Dimension::ALL
            .iter()
            .map(|d| DimensionSummary {
                dimension: *d,
                weight: weights.get(*d),
                stats: get_stats(pops.get(*d)),
            })
            .collect(),
    }
}

/// Weighted sub-scores of one candidate against the population.
pub fn sub_scores(candidate: &Candidate, pops: &Populations, weights: &ScoreWeights) -> SubScores {
    let mut sub = SubScores::default();
    for d in Dimension::ALL {
        let x = scaled(d.raw_value(candidate), pops.get(d));
        let weighted = match d.polarity() {
            Polarity::HigherIsBetter => x * weights.get(d),
            Polarity::LowerIsBetter => (1.0 - x) * weights.get(d),
        };
        sub.set(d, weighted);
    }
    sub
}

/// Full score record for one candidate with the given jitter multiplier.
pub fn score_candidate(
    candidate: &Candidate,
    pops: &Populations,
    weights: &ScoreWeights,
    jitter: f64,
    now: u64,
) -> Score {
    let sub = sub_scores(candidate, pops, weights);
    let aggregate = sub.sum();
    Score {
        stash: candidate.stash.clone(),
        updated_at: now,
        sub,
        aggregate,
        jitter,
        total: aggregate * jitter,
    }
}

/// Draw a jitter multiplier in `[1.0, 1.0 + JITTER_SPAN)`.
pub fn draw_jitter<R: Rng>(rng: &mut R) -> f64 {
    1.0 + rng.gen_range(0.0..JITTER_SPAN)
}

/// Score every candidate and sort descending by total.
///
/// Equal totals keep input order.
pub fn rank<R: Rng>(
    valid: &[Candidate],
    weights: &ScoreWeights,
    now: u64,
    rng: &mut R,
) -> (ScoreMetadata, Vec<RankedCandidate>) {
    let pops = Populations::from_candidates(valid);
    let metadata = score_metadata(&pops, weights, now);

    let mut ranked: Vec<RankedCandidate> = valid
        .iter()
        .map(|c| {
            let score = score_candidate(c, &pops, weights, draw_jitter(rng), now);
            RankedCandidate::new(c, score)
        })
        .collect();
    sort_ranked(&mut ranked);

    (metadata, ranked)
}

/// Stable sort, descending by `score.total`.
pub fn sort_ranked(ranked: &mut [RankedCandidate]) {
    ranked.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
}
