//! # nomi-core
//! Foundation types, traits, and statistics for the Nomi candidate engine.

pub mod config;
pub mod constants;
pub mod error;
pub mod stats;
pub mod traits;
pub mod types;
pub mod version;

pub use config::{ConstraintConfig, ReadPolicy, ScoreWeights};
pub use stats::{Stats, get_stats, scaled};
pub use types::{Candidate, RankedCandidate, Score, Validity};
