//! Persisted form of [`GameData`].
//!
//! Field names are camelCase. References between entities are stored as
//! keys; tile adjacency is not stored at all.

use super::SAVE_VERSION;
use crate::types::{Civ3ExtraInfo, ExperienceLevel, Resource, TerrainType, UnitPrototype};
use crate::units::{BarbarianInfo, MapUnit, TileLocation};
use crate::{GameData, Tile};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Root of a save file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFormat {
    pub version: String,
    pub game_data: SaveGameData,
}

impl SaveFormat {
    /// Captures `game` under the current save version.
    pub fn new(game: &GameData) -> Self {
        Self {
            version: SAVE_VERSION.to_string(),
            game_data: SaveGameData::from(game),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGameData {
    #[serde(default)]
    pub terrain_types: Vec<TerrainType>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub map: SaveMap,
    #[serde(default)]
    pub experience_levels: Vec<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_experience_level_key: Option<String>,
    #[serde(default)]
    pub unit_prototypes: IndexMap<String, UnitPrototype>,
    #[serde(default)]
    pub map_units: Vec<SaveMapUnit>,
    #[serde(default)]
    pub barbarian_info: SaveBarbarianInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMap {
    pub num_tiles_wide: i32,
    pub num_tiles_tall: i32,
    #[serde(default)]
    pub wrap_horizontally: bool,
    #[serde(default)]
    pub wrap_vertically: bool,
    #[serde(default)]
    pub tiles: Vec<SaveTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTile {
    pub x_coordinate: i32,
    pub y_coordinate: i32,
    pub base_terrain_type_key: String,
    pub overlay_terrain_type_key: String,
    pub resource_key: String,
    #[serde(default)]
    pub is_snow_capped: bool,
    #[serde(default)]
    pub is_pine_forest: bool,
    #[serde(default)]
    pub river_northeast: bool,
    #[serde(default)]
    pub river_southeast: bool,
    #[serde(default)]
    pub river_southwest: bool,
    #[serde(default)]
    pub river_northwest: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<Civ3ExtraInfo>,
}

impl From<&Tile> for SaveTile {
    fn from(tile: &Tile) -> Self {
        Self {
            x_coordinate: tile.x,
            y_coordinate: tile.y,
            base_terrain_type_key: tile.base_terrain_type.key.clone(),
            overlay_terrain_type_key: tile.overlay_terrain_type.key.clone(),
            resource_key: tile.resource.key.clone(),
            is_snow_capped: tile.is_snow_capped,
            is_pine_forest: tile.is_pine_forest,
            river_northeast: tile.river_northeast,
            river_southeast: tile.river_southeast,
            river_southwest: tile.river_southwest,
            river_northwest: tile.river_northwest,
            extra_info: tile.extra_info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMapUnit {
    pub id: String,
    pub unit_type_key: String,
    pub location: TileLocation,
    pub experience_level_key: String,
    pub hit_points_remaining: i32,
    #[serde(default)]
    pub moves_remaining: f64,
    #[serde(default)]
    pub is_fortified: bool,
}

impl SaveMapUnit {
    fn new(unit: &MapUnit, unit_type_key: String) -> Self {
        Self {
            id: unit.id.clone(),
            unit_type_key,
            location: unit.location,
            experience_level_key: unit.experience_level.key.clone(),
            hit_points_remaining: unit.hit_points_remaining,
            moves_remaining: unit.moves_remaining,
            is_fortified: unit.is_fortified,
        }
    }
}

/// Barbarian prototypes by key.
///
/// Older saves referenced prototypes by position in `unitPrototypes`; those
/// `*Index` fields are still read when no key is present but never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBarbarianInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_barbarian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_barbarian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barbarian_sea_unit: Option<String>,
    #[serde(default, skip_serializing)]
    pub basic_barbarian_index: Option<usize>,
    #[serde(default, skip_serializing)]
    pub advanced_barbarian_index: Option<usize>,
    #[serde(default, skip_serializing)]
    pub barbarian_sea_unit_index: Option<usize>,
}

impl SaveBarbarianInfo {
    fn new(info: &BarbarianInfo, key_of: impl Fn(&Arc<UnitPrototype>) -> String) -> Self {
        Self {
            basic_barbarian: info.basic_barbarian.as_ref().map(&key_of),
            advanced_barbarian: info.advanced_barbarian.as_ref().map(&key_of),
            barbarian_sea_unit: info.barbarian_sea_unit.as_ref().map(&key_of),
            ..Default::default()
        }
    }
}

/// Key `prototype` is stored under in `unit_prototypes`. A prototype that is
/// not in the collection falls back to its name.
fn prototype_key(
    unit_prototypes: &IndexMap<String, Arc<UnitPrototype>>,
    prototype: &Arc<UnitPrototype>,
) -> String {
    unit_prototypes
        .iter()
        .find(|(_, candidate)| Arc::ptr_eq(candidate, prototype))
        .map_or_else(|| prototype.name.clone(), |(key, _)| key.clone())
}

impl From<&GameData> for SaveGameData {
    fn from(game: &GameData) -> Self {
        let key_of =
            |prototype: &Arc<UnitPrototype>| prototype_key(&game.unit_prototypes, prototype);
        Self {
            terrain_types: game.terrain_types.iter().map(|t| t.as_ref().clone()).collect(),
            resources: game.resources.iter().map(|r| r.as_ref().clone()).collect(),
            map: SaveMap {
                num_tiles_wide: game.map.num_tiles_wide,
                num_tiles_tall: game.map.num_tiles_tall,
                wrap_horizontally: game.map.wrap_horizontally,
                wrap_vertically: game.map.wrap_vertically,
                tiles: game.map.tiles().iter().map(SaveTile::from).collect(),
            },
            experience_levels: game
                .experience_levels
                .iter()
                .map(|l| l.as_ref().clone())
                .collect(),
            default_experience_level_key: game
                .default_experience_level
                .as_ref()
                .map(|l| l.key.clone()),
            unit_prototypes: game
                .unit_prototypes
                .iter()
                .map(|(key, proto)| (key.clone(), proto.as_ref().clone()))
                .collect(),
            map_units: game
                .map_units
                .iter()
                .map(|unit| SaveMapUnit::new(unit, key_of(&unit.unit_type)))
                .collect(),
            barbarian_info: SaveBarbarianInfo::new(&game.barbarian_info, key_of),
        }
    }
}
