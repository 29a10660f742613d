//! Stateful collaborator-facing services built on the core engine.

pub mod query_store;
pub mod suggest;

pub use query_store::FilterStore;
pub use suggest::{PredictiveSearch, SuggestState, SuggestTuning, SuggestionSource};
