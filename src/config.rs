//! Configuration loading for vitrina.
//!
//! The ranking weight table and the controller tuning ship with defaults;
//! deployments may recalibrate absolute magnitudes through `config.toml`,
//! but the relative signal ordering and the fuzzy-threshold cutoffs are the
//! contract downstream ordering expectations depend on.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::ranking::RankingWeights;
use crate::services::suggest::SuggestTuning;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ranking: RankingWeights,
    pub suggest: SuggestTuning,
}

impl Config {
    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitrina")
            .join("config.toml")
    }

    /// Load config from file, or return defaults if not found.
    pub fn load() -> Self {
        Self::load_path(&Self::config_path())
    }

    fn load_path(path: &std::path::Path) -> Self {
        let mut config = if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!(error = %e, "failed to parse config, using defaults");
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!(error = %e, "failed to read config, using defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    /// Clamp values a hand-edited file could push out of range.
    fn validate(&mut self) {
        self.ranking.field_fuzzy_threshold = self.ranking.field_fuzzy_threshold.min(100);
        self.ranking.token_fuzzy_threshold = self.ranking.token_fuzzy_threshold.min(100);
        self.suggest.max_suggestions = self.suggest.max_suggestions.clamp(1, 50);
        self.suggest.min_query_len = self.suggest.min_query_len.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = Config::default();
        assert_eq!(config.ranking.exact[0], 1000);
        assert_eq!(config.ranking.field_fuzzy_threshold, 60);
        assert_eq!(config.suggest.debounce_ms, 300);
        assert_eq!(config.suggest.max_suggestions, 10);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[suggest]\ndebounceMs = 150\n\n[ranking]\nfieldFuzzyThreshold = 70\n",
        )
        .unwrap();

        let config = Config::load_path(&path);
        assert_eq!(config.suggest.debounce_ms, 150);
        assert_eq!(config.ranking.field_fuzzy_threshold, 70);
        // Untouched sections keep their defaults.
        assert_eq!(config.suggest.min_query_len, 3);
        assert_eq!(config.ranking.exact[0], 1000);
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is { not toml").unwrap();

        let config = Config::load_path(&path);
        assert_eq!(config.ranking.exact[0], 1000);
    }

    #[test]
    fn test_validate_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[suggest]\nmaxSuggestions = 500\nminQueryLen = 0\n",
        )
        .unwrap();

        let config = Config::load_path(&path);
        assert_eq!(config.suggest.max_suggestions, 50);
        assert_eq!(config.suggest.min_query_len, 1);
    }
}
