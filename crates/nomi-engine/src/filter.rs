//! Running the checker over whole candidate sets.
//!
//! Two disciplines: the diagnostic batch filter fans every check out at
//! once, while the admission-gated path keeps at most `limit` checks in
//! flight and yields verdicts in input order.

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use nomi_core::types::{Candidate, InvalidCandidate, Validity};

use crate::checker::{Checker, PassContext};

/// Check every candidate concurrently and keep only the invalid ones.
pub async fn find_invalid(
    checker: &Checker<'_>,
    candidates: &[Candidate],
    ctx: &PassContext,
) -> Vec<InvalidCandidate> {
    let verdicts = join_all(candidates.iter().map(|c| checker.check(c, ctx))).await;

    candidates
        .iter()
        .zip(verdicts)
        .filter_map(|(c, verdict)| match verdict {
            Validity::Valid => None,
            Validity::Invalid(reason) => Some(InvalidCandidate {
                stash: c.stash.clone(),
                name: c.name.clone(),
                reason,
            }),
        })
        .collect()
}

/// Check candidates with at most `limit` evaluations in flight. The result
/// is index-aligned with `candidates`.
pub async fn check_bounded(
    checker: &Checker<'_>,
    candidates: &[Candidate],
    ctx: &PassContext,
    limit: usize,
) -> Vec<Validity> {
    stream::iter(candidates)
        .map(|c| checker.check(c, ctx))
        .buffered(limit.max(1))
        .collect()
        .await
}
