//! # C7 Game Data
//!
//! In-memory game state and its on-disk save format.
//!
//! ## Two forms of the same state
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`GameData`] | Resolved snapshot: tiles and units hold `Arc`s to their terrain, resource, level and prototype |
//! | [`save::SaveFormat`] | Persisted snapshot: the same data with every reference replaced by a key |
//!
//! A [`GameData`] is produced either by an importer or by
//! [`save::SaveFormat::resolve`]; there is no half-resolved state.
//!
//! ```ignore
//! c7data::save::save_game(&game, Path::new("turn42.zip"))?;
//! let reloaded = c7data::save::load_game(Path::new("turn42.zip"))?;
//! ```

pub mod map;
pub mod save;
pub mod testing;
pub mod types;
pub mod units;

pub use map::{GameMap, MapDimensions, MapError, Tile, TileDirection};
pub use save::{SaveConfig, SaveError};
pub use types::{
    Civ3ExtraInfo, ExperienceLevel, Resource, ResourceCategory, TerrainType, UnitPrototype,
};
pub use units::{BarbarianInfo, MapUnit, TileLocation};

use indexmap::IndexMap;
use std::sync::Arc;

/// Complete game state.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub terrain_types: Vec<Arc<TerrainType>>,
    pub resources: Vec<Arc<Resource>>,
    pub map: GameMap,
    pub experience_levels: Vec<Arc<ExperienceLevel>>,
    pub default_experience_level: Option<Arc<ExperienceLevel>>,
    /// In rule-set order. Keys are usually the prototype name; saves refer
    /// to prototypes by key.
    pub unit_prototypes: IndexMap<String, Arc<UnitPrototype>>,
    pub map_units: Vec<MapUnit>,
    pub barbarian_info: BarbarianInfo,
}

impl GameData {
    pub fn terrain_type(&self, key: &str) -> Option<&Arc<TerrainType>> {
        self.terrain_types.iter().find(|t| t.key == key)
    }

    pub fn resource(&self, key: &str) -> Option<&Arc<Resource>> {
        self.resources.iter().find(|r| r.key == key)
    }

    pub fn unit_prototype(&self, name: &str) -> Option<&Arc<UnitPrototype>> {
        self.unit_prototypes.get(name)
    }

    pub fn units_at(&self, location: TileLocation) -> impl Iterator<Item = &MapUnit> + '_ {
        self.map_units
            .iter()
            .filter(move |unit| unit.location == location)
    }
}
