//! Inventory records and the lightweight suggestion projection.
//!
//! An [`Item`] is resolved once at the collaborator boundary (the inventory
//! store speaks camelCase JSON); optional upstream fields arrive as empty
//! strings so the scoring code never has to branch on presence. The core
//! never mutates an item.

use serde::{Deserialize, Serialize};

/// Brand whose basic line carries treasure-hunt variants.
pub const TREASURE_HUNT_BRAND: &str = "hot wheels";

/// Piece type eligible for treasure-hunt tags.
pub const TREASURE_HUNT_PIECE_TYPE: &str = "basic";

/// Collector tag flags on an inventory item.
///
/// Treasure-hunt tags only exist for the Hot Wheels basic line; fantasy is a
/// Hot Wheels tag as well. Chase, moto, and camioneta are plain booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemFlags {
    pub is_treasure_hunt: bool,
    pub is_super_treasure_hunt: bool,
    pub is_chase: bool,
    pub is_fantasy: bool,
    pub is_moto: bool,
    pub is_camioneta: bool,
}

/// A single inventory record, immutable for the duration of a ranking pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    /// Raw catalog identifier (toy number or internal id).
    pub car_id: String,

    /// Display name of the piece.
    pub name: String,

    pub brand: String,
    pub piece_type: String,
    pub condition: String,
    pub location: String,
    pub notes: String,

    pub quantity: u32,
    pub reserved_quantity: u32,

    /// Asking price, if set.
    pub price: Option<f64>,

    /// Thumbnail for the predictive dropdown.
    pub photo_url: Option<String>,

    #[serde(flatten)]
    pub flags: ItemFlags,
}

impl Item {
    /// Units available for sale right now.
    pub fn available(&self) -> u32 {
        self.quantity.saturating_sub(self.reserved_quantity)
    }

    /// Whether at least one unit can be sold.
    pub fn in_stock(&self) -> bool {
        self.available() > 0
    }

    /// Whether this item belongs to the brand/piece-type combination that
    /// can carry treasure-hunt tags at all.
    pub fn treasure_hunt_eligible(&self) -> bool {
        self.brand.eq_ignore_ascii_case(TREASURE_HUNT_BRAND)
            && self.piece_type.eq_ignore_ascii_case(TREASURE_HUNT_PIECE_TYPE)
    }

    /// Fantasy castings are scoped to the treasure-hunt brand.
    pub fn fantasy_eligible(&self) -> bool {
        self.brand.eq_ignore_ascii_case(TREASURE_HUNT_BRAND)
    }

    /// The searchable fields in scoring order: name first, then the
    /// secondary fields in decreasing weight.
    pub fn searchable_fields(&self) -> [&str; 7] {
        [
            &self.name,
            &self.brand,
            &self.piece_type,
            &self.location,
            &self.condition,
            &self.notes,
            &self.car_id,
        ]
    }
}

/// Projection of an [`Item`] returned by the predictive lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Primary display line.
    pub name: String,

    /// Secondary line (brand, series, or entity kind).
    #[serde(default)]
    pub secondary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Suggestion {
    /// Build a suggestion from an inventory item.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            secondary: item.brand.clone(),
            price: item.price,
            photo_url: item.photo_url.clone(),
        }
    }
}
