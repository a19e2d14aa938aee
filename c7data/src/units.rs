use crate::types::{ExperienceLevel, UnitPrototype};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Grid position of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileLocation {
    pub x: i32,
    pub y: i32,
}

impl TileLocation {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A unit on the map.
#[derive(Debug, Clone)]
pub struct MapUnit {
    pub id: String,
    pub unit_type: Arc<UnitPrototype>,
    pub location: TileLocation,
    pub experience_level: Arc<ExperienceLevel>,
    pub hit_points_remaining: i32,
    pub moves_remaining: f64,
    pub is_fortified: bool,
}

impl MapUnit {
    /// A fresh unit at full health for its experience level.
    pub fn new(
        id: impl Into<String>,
        unit_type: Arc<UnitPrototype>,
        location: TileLocation,
        experience_level: Arc<ExperienceLevel>,
    ) -> Self {
        let hit_points_remaining = experience_level.base_hit_points;
        let moves_remaining = unit_type.movement as f64;
        Self {
            id: id.into(),
            unit_type,
            location,
            experience_level,
            hit_points_remaining,
            moves_remaining,
            is_fortified: false,
        }
    }
}

/// Which prototypes barbarian tribes field. Unset until a rule set with
/// units is loaded.
#[derive(Debug, Clone, Default)]
pub struct BarbarianInfo {
    pub basic_barbarian: Option<Arc<UnitPrototype>>,
    pub advanced_barbarian: Option<Arc<UnitPrototype>>,
    pub barbarian_sea_unit: Option<Arc<UnitPrototype>>,
}
