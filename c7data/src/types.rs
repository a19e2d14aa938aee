//! Rule-set entities shared by tiles and units.
//!
//! These types are persisted as-is. Everything that points *at* them (tiles,
//! units, barbarian settings) stores a key in the save and an `Arc` in the
//! resolved [`GameData`](crate::GameData).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the sentinel resource placed on tiles without one.
pub const NONE_RESOURCE_KEY: &str = "NONE";

/// Terrain kinds that count as water for adjacency checks.
const WATER_TERRAIN_KEYS: [&str; 3] = ["Coast", "Sea", "Ocean"];

/// A base or overlay terrain kind (grassland, hills, forest, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainType {
    pub key: String,
    pub display_name: String,
    /// Position of the terrain in the Civ3 rule set it was imported from.
    pub civ3_index: i32,
    #[serde(default)]
    pub base_food_production: i32,
    #[serde(default)]
    pub base_shield_production: i32,
    #[serde(default)]
    pub base_commerce_production: i32,
    #[serde(default)]
    pub movement_cost: i32,
    #[serde(default)]
    pub allow_cities: bool,
}

impl TerrainType {
    pub fn is_water(&self) -> bool {
        WATER_TERRAIN_KEYS.contains(&self.key.as_str())
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceCategory {
    Bonus,
    Luxury,
    Strategic,
    None,
}

impl ResourceCategory {
    /// Maps the Civ3 `GOOD` type code. Unknown codes yield `None`.
    pub fn from_civ3_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ResourceCategory::Bonus),
            1 => Some(ResourceCategory::Luxury),
            2 => Some(ResourceCategory::Strategic),
            _ => None,
        }
    }
}

/// A map resource (bonus, luxury or strategic good).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub key: String,
    /// Dense index in import order; `-1` for the NONE sentinel.
    pub index: i32,
    pub name: String,
    #[serde(default)]
    pub icon: i32,
    pub category: ResourceCategory,
    #[serde(default)]
    pub food_bonus: i32,
    #[serde(default)]
    pub shields_bonus: i32,
    #[serde(default)]
    pub commerce_bonus: i32,
    #[serde(default)]
    pub appearance_ratio: i32,
    #[serde(default)]
    pub disappearance_ratio: i32,
    #[serde(default)]
    pub civilopedia_entry: String,
}

impl Resource {
    /// The sentinel used for tiles that carry no resource.
    pub fn none() -> Self {
        Self {
            key: NONE_RESOURCE_KEY.to_string(),
            index: -1,
            name: "None".to_string(),
            icon: 0,
            category: ResourceCategory::None,
            food_bonus: 0,
            shields_bonus: 0,
            commerce_bonus: 0,
            appearance_ratio: 0,
            disappearance_ratio: 0,
            civilopedia_entry: String::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.key == NONE_RESOURCE_KEY
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name, self.category)
    }
}

/// Unit veterancy level (Conscript, Regular, Veteran, Elite).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceLevel {
    pub key: String,
    pub display_name: String,
    pub base_hit_points: i32,
    /// Chance (0.0 - 1.0) that a losing unit retreats instead of dying.
    #[serde(default)]
    pub retreat_chance: f64,
}

/// A buildable unit kind. Prototypes are keyed by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrototype {
    pub name: String,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub bombard: i32,
    #[serde(default)]
    pub movement: i32,
    #[serde(default)]
    pub shield_cost: i32,
    #[serde(default)]
    pub population_cost: i32,
    /// Free-form tags such as "Land" or "Sea".
    #[serde(default)]
    pub categories: Vec<String>,
}

impl UnitPrototype {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

impl fmt::Display for UnitPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Civ3-specific provenance kept only so tiles can be drawn from the
/// original texture atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Civ3ExtraInfo {
    pub base_terrain_file_id: i32,
    pub base_terrain_image_id: i32,
}
