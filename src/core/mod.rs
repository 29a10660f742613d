//! Core search logic: tokenization, similarity, filtering, and ranking.
//!
//! Everything here is synchronous, single-threaded, and pure. Each call
//! receives its own candidate snapshot and filter state by value, so
//! concurrent invocations share no mutable state and need no locking.

pub mod filters;
pub mod ranking;
pub mod similarity;
pub mod tokenizer;

pub use filters::{AvailabilityMode, FilterState, TreasureHuntMode};
pub use ranking::{rank, search, Query, RankingWeights, ScoredCandidate};
pub use similarity::{similarity, EditBuffer};
