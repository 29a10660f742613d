//! Filter-state store with a narrow query-persistence port.
//!
//! The store owns one search interaction's [`FilterState`] plus the raw
//! query text. Navigating to a different page resets every categorical
//! filter but keeps the free-text term, which also survives restarts
//! through a small JSON file. Missing or corrupted files load as defaults;
//! writes are best-effort.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::filters::{FilterState, TreasureHuntMode};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PersistedQuery {
    search_term: String,
}

/// Per-interaction filter and query state.
#[derive(Debug, Default)]
pub struct FilterStore {
    filters: FilterState,
    query: String,
    data_path: Option<PathBuf>,
}

impl FilterStore {
    /// In-memory store with no persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the store, restoring the persisted query text from the default
    /// location.
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    /// Load with an explicit path (tests use a temp dir).
    pub fn load_from(data_path: Option<PathBuf>) -> Self {
        let query = data_path
            .as_deref()
            .filter(|p| p.exists())
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str::<PersistedQuery>(&s).ok())
            .map(|p| p.search_term)
            .unwrap_or_default();

        Self {
            filters: FilterState::default(),
            query,
            data_path,
        }
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vitrina").join("query.json"))
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the free-text term and persist it.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.save_persisted_query();
    }

    pub fn set_condition(&mut self, condition: &str) {
        self.filters.condition = condition.to_string();
    }

    /// Changing brand invalidates the brand-scoped filters, mirroring how
    /// the piece-type, treasure-hunt, and chase selections depend on it.
    pub fn set_brand(&mut self, brand: &str) {
        self.filters.brand = brand.to_string();
        self.filters.piece_type.clear();
        self.filters.treasure_hunt = TreasureHuntMode::All;
        self.filters.chase_only = false;
    }

    pub fn set_piece_type(&mut self, piece_type: &str) {
        self.filters.piece_type = piece_type.to_string();
        self.filters.treasure_hunt = TreasureHuntMode::All;
        self.filters.chase_only = false;
    }

    pub fn set_location(&mut self, location: &str) {
        self.filters.location = location.to_string();
    }

    pub fn set_treasure_hunt(&mut self, mode: TreasureHuntMode) {
        self.filters.treasure_hunt = mode;
    }

    pub fn set_low_stock_only(&mut self, on: bool) {
        self.filters.low_stock_only = on;
    }

    pub fn set_chase_only(&mut self, on: bool) {
        self.filters.chase_only = on;
    }

    pub fn set_fantasy_only(&mut self, on: bool) {
        self.filters.fantasy_only = on;
    }

    pub fn set_moto_only(&mut self, on: bool) {
        self.filters.moto_only = on;
    }

    pub fn set_camioneta_only(&mut self, on: bool) {
        self.filters.camioneta_only = on;
    }

    /// Clear everything, query included.
    pub fn reset(&mut self) {
        self.filters = FilterState::default();
        self.query.clear();
        self.save_persisted_query();
    }

    /// Page-change reset: categorical filters clear, the raw query text is
    /// retained for continuity of intent.
    pub fn reset_for_navigation(&mut self) {
        self.filters = FilterState::default();
    }

    /// Restore the persisted query text, if any.
    pub fn load_persisted_query(&self) -> Option<String> {
        let path = self.data_path.as_deref()?;
        let contents = fs::read_to_string(path).ok()?;
        let persisted: PersistedQuery = serde_json::from_str(&contents).ok()?;
        Some(persisted.search_term)
    }

    /// Best-effort write of the current query text.
    pub fn save_persisted_query(&self) {
        let Some(ref path) = self.data_path else {
            return;
        };

        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let persisted = PersistedQuery {
            search_term: self.query.clone(),
        };
        if let Ok(json) = serde_json::to_string_pretty(&persisted) {
            let _ = fs::write(path, json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_for_navigation_keeps_query() {
        let mut store = FilterStore::new();
        store.set_query("mustang");
        store.set_brand("Hot Wheels");
        store.set_low_stock_only(true);

        store.reset_for_navigation();
        assert_eq!(store.query(), "mustang");
        assert!(store.filters().is_unconstrained());
    }

    #[test]
    fn test_brand_change_resets_dependent_filters() {
        let mut store = FilterStore::new();
        store.set_brand("Hot Wheels");
        store.set_piece_type("basic");
        store.set_treasure_hunt(TreasureHuntMode::Th);
        store.set_chase_only(true);

        store.set_brand("Mini GT");
        assert_eq!(store.filters().brand, "Mini GT");
        assert!(store.filters().piece_type.is_empty());
        assert_eq!(store.filters().treasure_hunt, TreasureHuntMode::All);
        assert!(!store.filters().chase_only);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = FilterStore::new();
        store.set_query("mustang");
        store.set_condition("mint");

        store.reset();
        assert!(store.query().is_empty());
        assert!(store.filters().is_unconstrained());
    }

    #[test]
    fn test_query_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.json");

        let mut store = FilterStore::load_from(Some(path.clone()));
        assert!(store.query().is_empty());
        store.set_query("nissan gt-r");
        assert_eq!(store.load_persisted_query().as_deref(), Some("nissan gt-r"));

        let restored = FilterStore::load_from(Some(path));
        assert_eq!(restored.query(), "nissan gt-r");
        // Filters never persist.
        assert!(restored.filters().is_unconstrained());
    }

    #[test]
    fn test_corrupt_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FilterStore::load_from(Some(path));
        assert!(store.query().is_empty());
    }
}
