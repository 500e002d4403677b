//! # nomi-engine — Candidate admission, scoring, and round partitioning.
//!
//! This crate drives the [`ChainData`](nomi_core::traits::ChainData) and
//! [`ScoreStore`](nomi_core::traits::ScoreStore) collaborators through three
//! passes: the admission checker, the weighted scorer, and the partitioner
//! applied to an already-nominated cohort at each round boundary.

pub mod cache;
pub mod checker;
pub mod engine;
pub mod filter;
pub mod identity;
pub mod partition;
pub mod remote;
pub mod scoring;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use checker::{Checker, PassContext};
pub use engine::{CandidateEngine, system_clock};
pub use identity::IdentityHashTable;
pub use partition::{BadCandidate, Partition};
