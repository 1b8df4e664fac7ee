//! Item catalog - the static lookup service for everything plantable or
//! producible.
//!
//! Catalog entries are immutable per deployment: base timings, costs, yield
//! ranges, growth cycles, and level gating. The lifecycle engine only ever
//! reads from here; nothing in the catalog references live game state. A
//! deployment loads its table from `catalog.toml` (see
//! [`crate::config::catalog`]) or falls back to the bundled
//! [`Catalog::builtin`] set.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed set of item categories the lifecycle engine matches over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Single-harvest plantable; removed from the field on collection
    Crop,
    /// Multi-cycle plantable; renews for several harvests
    Tree,
    /// Multi-cycle plantable; mechanically identical to trees
    Animal,
    /// Factory-made item; queued, never planted, never rots
    Product,
}

impl ItemKind {
    /// Whether this kind goes into a field (as opposed to the factory queue).
    #[must_use]
    pub const fn is_plantable(self) -> bool {
        matches!(self, Self::Crop | Self::Tree | Self::Animal)
    }
}

/// One raw material required to manufacture a product unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog id of the consumed item
    pub item_id: String,
    /// Units consumed per manufactured unit
    pub amount: i64,
}

/// Immutable description of one catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    /// Stable identifier referenced by field/queue/inventory rows
    pub id: String,
    /// Display name
    pub name: String,
    /// Category, drives which lifecycle the item follows
    pub kind: ItemKind,
    /// Player level at which the item unlocks
    pub required_level: i32,
    /// Base grow duration in seconds (craft duration for products)
    pub grow_time_secs: i64,
    /// Base collect window in seconds (unused for products)
    pub harvest_window_secs: i64,
    /// Lower bound of the per-tile yield roll
    pub base_amount: i64,
    /// Upper bound of the per-tile yield roll, before yield modifiers
    pub base_volume: i64,
    /// Number of growth cycles; 1 for single-harvest crops
    pub cycles: i32,
    /// Gold cost per tile when planting (0 for products)
    pub price: i64,
    /// Raw materials consumed per unit when manufacturing
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Experience awarded per unit harvested or collected
    pub xp: i64,
}

impl ItemDef {
    /// Whether the item renews for further cycles after a harvest.
    #[must_use]
    pub const fn is_multi_cycle(&self) -> bool {
        self.cycles > 1
    }
}

/// In-memory item table with lookup-by-id and gating-by-level queries.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: HashMap<String, ItemDef>,
}

impl Catalog {
    /// Builds a catalog from item definitions, validating each entry.
    ///
    /// Rejects duplicate ids, inverted yield ranges, and non-positive cycle
    /// counts so the engine can rely on well-formed data everywhere else.
    pub fn from_defs(defs: Vec<ItemDef>) -> Result<Self> {
        let mut items = HashMap::with_capacity(defs.len());
        for def in defs {
            if def.base_amount > def.base_volume {
                return Err(Error::Config {
                    message: format!(
                        "item {}: base_amount {} exceeds base_volume {}",
                        def.id, def.base_amount, def.base_volume
                    ),
                });
            }
            if def.cycles < 1 {
                return Err(Error::Config {
                    message: format!("item {}: cycles must be at least 1", def.id),
                });
            }
            if def.grow_time_secs < 0 || def.harvest_window_secs < 0 {
                return Err(Error::Config {
                    message: format!("item {}: durations must be non-negative", def.id),
                });
            }
            if items.insert(def.id.clone(), def).is_some() {
                return Err(Error::Config {
                    message: "duplicate item id in catalog".to_string(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Looks an item up by id, returning None if it does not exist.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Looks an item up by id, failing with [`Error::ItemNotFound`].
    pub fn get(&self, id: &str) -> Result<&ItemDef> {
        self.items.get(id).ok_or_else(|| Error::ItemNotFound {
            id: id.to_string(),
        })
    }

    /// All items unlocked at the given player level, sorted by unlock level
    /// then id for stable presentation.
    #[must_use]
    pub fn unlocked(&self, level: i32) -> Vec<&ItemDef> {
        let mut defs: Vec<&ItemDef> = self
            .items
            .values()
            .filter(|def| def.required_level <= level)
            .collect();
        defs.sort_by(|a, b| {
            a.required_level
                .cmp(&b.required_level)
                .then_with(|| a.id.cmp(&b.id))
        });
        defs
    }

    /// Number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The default item set bundled with the crate, used when a deployment
    /// ships no `catalog.toml` and by the test suite.
    // Data table, one block per item; the expect is exercised by tests.
    #[allow(clippy::too_many_lines, clippy::expect_used)]
    #[must_use]
    pub fn builtin() -> Self {
        let defs = vec![
            ItemDef {
                id: "wheat".to_string(),
                name: "Wheat".to_string(),
                kind: ItemKind::Crop,
                required_level: 1,
                grow_time_secs: 600,
                harvest_window_secs: 1_200,
                base_amount: 4,
                base_volume: 6,
                cycles: 1,
                price: 10,
                materials: Vec::new(),
                xp: 2,
            },
            ItemDef {
                id: "carrot".to_string(),
                name: "Carrot".to_string(),
                kind: ItemKind::Crop,
                required_level: 3,
                grow_time_secs: 1_800,
                harvest_window_secs: 2_400,
                base_amount: 5,
                base_volume: 9,
                cycles: 1,
                price: 25,
                materials: Vec::new(),
                xp: 5,
            },
            ItemDef {
                id: "apple_tree".to_string(),
                name: "Apple Tree".to_string(),
                kind: ItemKind::Tree,
                required_level: 6,
                grow_time_secs: 7_200,
                harvest_window_secs: 10_800,
                base_amount: 3,
                base_volume: 7,
                cycles: 4,
                price: 120,
                materials: Vec::new(),
                xp: 12,
            },
            ItemDef {
                id: "chicken".to_string(),
                name: "Chicken".to_string(),
                kind: ItemKind::Animal,
                required_level: 9,
                grow_time_secs: 3_600,
                harvest_window_secs: 5_400,
                base_amount: 2,
                base_volume: 4,
                cycles: 6,
                price: 200,
                materials: Vec::new(),
                xp: 10,
            },
            ItemDef {
                id: "flour".to_string(),
                name: "Flour".to_string(),
                kind: ItemKind::Product,
                required_level: 5,
                grow_time_secs: 900,
                harvest_window_secs: 0,
                base_amount: 1,
                base_volume: 1,
                cycles: 1,
                price: 0,
                materials: vec![Material {
                    item_id: "wheat".to_string(),
                    amount: 3,
                }],
                xp: 8,
            },
            ItemDef {
                id: "bread".to_string(),
                name: "Bread".to_string(),
                kind: ItemKind::Product,
                required_level: 8,
                grow_time_secs: 2_700,
                harvest_window_secs: 0,
                base_amount: 1,
                base_volume: 1,
                cycles: 1,
                price: 0,
                materials: vec![Material {
                    item_id: "flour".to_string(),
                    amount: 2,
                }],
                xp: 20,
            },
        ];

        Self::from_defs(defs).expect("builtin catalog is well-formed")
    }
}
