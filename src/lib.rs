//! Vitrina - relevance ranking and predictive suggestions for die-cast
//! retail inventory.
//!
//! Vitrina is the search core shared by a point-of-sale item picker and a
//! global cross-entity search page: a deterministic, explainable,
//! multi-signal text-matching pipeline over an in-memory snapshot of
//! inventory records, plus a debounced, cancellable controller for
//! type-ahead suggestions.
//!
//! # Architecture
//!
//! - [`config`] - Weight-table and tuning configuration
//! - [`core`] - Tokenizer, similarity scorer, filter chain, ranking engine
//! - [`record`] - Inventory records and the suggestion projection
//! - [`services`] - Predictive suggestion controller and filter store
//!
//! # Example
//!
//! ```
//! use vitrina::{search, AvailabilityMode, FilterState, Item, RankingWeights};
//!
//! let items = vec![
//!     Item { name: "Ford Mustang".into(), quantity: 5, ..Default::default() },
//!     Item { name: "Nissan GT-R".into(), quantity: 0, ..Default::default() },
//! ];
//!
//! let results = search(
//!     &items,
//!     &FilterState::default(),
//!     "ford",
//!     AvailabilityMode::Required,
//!     &RankingWeights::default(),
//! );
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].name, "Ford Mustang");
//! ```

// Public modules
pub mod config;
pub mod core;
pub mod record;
pub mod services;

// Internal modules
mod error;

// Re-export commonly used types for convenience
pub use config::Config;
pub use core::filters::{AvailabilityMode, FilterState, TreasureHuntMode};
pub use core::ranking::{rank, search, Query, RankingWeights};
pub use core::similarity::{levenshtein, similarity, EditBuffer};
pub use core::tokenizer::{normalize, tokenize};
pub use error::{VitrinaError, VitrinaResult};
pub use record::{Item, ItemFlags, Suggestion};
pub use services::query_store::FilterStore;
pub use services::suggest::{PredictiveSearch, SuggestState, SuggestTuning, SuggestionSource};
