//! Filter predicate chain applied before scoring.
//!
//! Every active predicate must pass (logical AND); predicates are
//! independent, so evaluation order never changes the outcome. An empty
//! string on a categorical filter means "no constraint".

use serde::{Deserialize, Serialize};

use crate::record::Item;

/// Available quantity at or below this counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 3;

/// Treasure-hunt filter mode.
///
/// Only constrains items whose brand/piece-type combination can carry the
/// tag at all; everything else passes unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreasureHuntMode {
    #[default]
    All,
    Th,
    Sth,
}

impl TreasureHuntMode {
    /// Parse a filter value. Unrecognized strings mean no constraint.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "th" => Self::Th,
            "sth" => Self::Sth,
            _ => Self::All,
        }
    }
}

/// How the chain treats sellable stock.
///
/// The point-of-sale picker hard-requires availability; the global search
/// page surfaces stock as a label on the result instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityMode {
    Required,
    Surfaced,
}

/// The recognized filter selections for one search interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub condition: String,
    pub brand: String,
    pub piece_type: String,
    pub location: String,
    pub low_stock_only: bool,
    pub treasure_hunt: TreasureHuntMode,
    pub chase_only: bool,
    pub fantasy_only: bool,
    pub moto_only: bool,
    pub camioneta_only: bool,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no filter is active.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Evaluate the full predicate chain against one item.
    pub fn passes(&self, item: &Item, availability: AvailabilityMode) -> bool {
        if availability == AvailabilityMode::Required && !item.in_stock() {
            return false;
        }

        if !self.condition.is_empty() && !item.condition.eq_ignore_ascii_case(&self.condition) {
            return false;
        }
        if !self.brand.is_empty() && !item.brand.eq_ignore_ascii_case(&self.brand) {
            return false;
        }
        if !self.piece_type.is_empty() && !item.piece_type.eq_ignore_ascii_case(&self.piece_type) {
            return false;
        }

        if !self.location.is_empty() {
            let needle = self.location.to_lowercase();
            if !item.location.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if self.low_stock_only && item.available() > LOW_STOCK_THRESHOLD {
            return false;
        }

        // Treasure-hunt mode only applies inside the eligible line.
        if item.treasure_hunt_eligible() {
            match self.treasure_hunt {
                TreasureHuntMode::All => {}
                TreasureHuntMode::Th => {
                    if !item.flags.is_treasure_hunt {
                        return false;
                    }
                }
                TreasureHuntMode::Sth => {
                    if !item.flags.is_super_treasure_hunt {
                        return false;
                    }
                }
            }
        }

        if self.chase_only && !item.flags.is_chase {
            return false;
        }
        // Fantasy is scoped to one brand the same way treasure hunt is.
        if self.fantasy_only && item.fantasy_eligible() && !item.flags.is_fantasy {
            return false;
        }
        if self.moto_only && !item.flags.is_moto {
            return false;
        }
        if self.camioneta_only && !item.flags.is_camioneta {
            return false;
        }

        true
    }
}
