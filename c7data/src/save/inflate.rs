//! Rebinds the key references of a [`SaveFormat`] into a [`GameData`].
//!
//! Runs once per load. Every key must resolve; the first one that does not
//! aborts the load with a [`CorruptSave`].

use super::CorruptSave;
use super::format::{SaveBarbarianInfo, SaveFormat, SaveGameData, SaveMapUnit, SaveTile};
use crate::types::{ExperienceLevel, NONE_RESOURCE_KEY, Resource, TerrainType, UnitPrototype};
use crate::units::{BarbarianInfo, MapUnit};
use crate::{GameData, GameMap, MapDimensions, Tile};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

impl SaveFormat {
    /// Resolves all references and recomputes tile adjacency.
    pub fn resolve(self) -> Result<GameData, CorruptSave> {
        self.game_data.resolve()
    }
}

/// Key lookup where the first entry with a given key wins.
fn index_by_key<T>(items: &[Arc<T>], key: impl Fn(&T) -> &str) -> HashMap<String, Arc<T>> {
    let mut lookup = HashMap::with_capacity(items.len());
    for item in items {
        lookup
            .entry(key(item).to_string())
            .or_insert_with(|| Arc::clone(item));
    }
    lookup
}

struct TileBindings {
    terrain: HashMap<String, Arc<TerrainType>>,
    resources: HashMap<String, Arc<Resource>>,
    none: Arc<Resource>,
}

impl TileBindings {
    fn bind(&self, saved: SaveTile) -> Result<Tile, CorruptSave> {
        let terrain = |key: &str| {
            self.terrain
                .get(key)
                .cloned()
                .ok_or_else(|| CorruptSave::UnknownTerrain {
                    x: saved.x_coordinate,
                    y: saved.y_coordinate,
                    key: key.to_string(),
                })
        };
        let base = terrain(&saved.base_terrain_type_key)?;
        let overlay = terrain(&saved.overlay_terrain_type_key)?;

        let resource = if saved.resource_key == NONE_RESOURCE_KEY {
            Arc::clone(&self.none)
        } else {
            self.resources
                .get(&saved.resource_key)
                .cloned()
                .ok_or_else(|| CorruptSave::UnknownResource {
                    x: saved.x_coordinate,
                    y: saved.y_coordinate,
                    key: saved.resource_key.clone(),
                })?
        };

        let mut tile = Tile::new(
            saved.x_coordinate,
            saved.y_coordinate,
            base,
            overlay,
            resource,
        );
        tile.is_snow_capped = saved.is_snow_capped;
        tile.is_pine_forest = saved.is_pine_forest;
        tile.river_northeast = saved.river_northeast;
        tile.river_southeast = saved.river_southeast;
        tile.river_southwest = saved.river_southwest;
        tile.river_northwest = saved.river_northwest;
        tile.extra_info = saved.extra_info;
        Ok(tile)
    }
}

fn resolve_level(
    levels: &HashMap<String, Arc<ExperienceLevel>>,
    key: &str,
    referrer: impl FnOnce() -> String,
) -> Result<Arc<ExperienceLevel>, CorruptSave> {
    levels
        .get(key)
        .cloned()
        .ok_or_else(|| CorruptSave::UnknownExperienceLevel {
            key: key.to_string(),
            referrer: referrer(),
        })
}

fn resolve_prototype(
    prototypes: &IndexMap<String, Arc<UnitPrototype>>,
    key: &str,
    referrer: impl FnOnce() -> String,
) -> Result<Arc<UnitPrototype>, CorruptSave> {
    prototypes
        .get(key)
        .cloned()
        .ok_or_else(|| CorruptSave::UnknownUnitPrototype {
            key: key.to_string(),
            referrer: referrer(),
        })
}

/// Key first; the positional index is only consulted for saves that predate
/// key references.
fn resolve_barbarian(
    prototypes: &IndexMap<String, Arc<UnitPrototype>>,
    role: &'static str,
    key: Option<String>,
    legacy_index: Option<usize>,
) -> Result<Option<Arc<UnitPrototype>>, CorruptSave> {
    if let Some(key) = key {
        return resolve_prototype(prototypes, &key, || format!("barbarian {}", role)).map(Some);
    }
    let Some(index) = legacy_index else {
        return Ok(None);
    };
    log::debug!("Resolving barbarian {} by legacy index {}", role, index);
    prototypes
        .get_index(index)
        .map(|(_, proto)| Some(Arc::clone(proto)))
        .ok_or(CorruptSave::PrototypeIndexOutOfRange {
            role,
            index,
            count: prototypes.len(),
        })
}

fn resolve_barbarians(
    prototypes: &IndexMap<String, Arc<UnitPrototype>>,
    saved: SaveBarbarianInfo,
) -> Result<BarbarianInfo, CorruptSave> {
    Ok(BarbarianInfo {
        basic_barbarian: resolve_barbarian(
            prototypes,
            "basic",
            saved.basic_barbarian,
            saved.basic_barbarian_index,
        )?,
        advanced_barbarian: resolve_barbarian(
            prototypes,
            "advanced",
            saved.advanced_barbarian,
            saved.advanced_barbarian_index,
        )?,
        barbarian_sea_unit: resolve_barbarian(
            prototypes,
            "sea",
            saved.barbarian_sea_unit,
            saved.barbarian_sea_unit_index,
        )?,
    })
}

fn resolve_unit(
    saved: SaveMapUnit,
    levels: &HashMap<String, Arc<ExperienceLevel>>,
    prototypes: &IndexMap<String, Arc<UnitPrototype>>,
) -> Result<MapUnit, CorruptSave> {
    let experience_level = resolve_level(levels, &saved.experience_level_key, || {
        format!("unit {}", saved.id)
    })?;
    let unit_type = resolve_prototype(prototypes, &saved.unit_type_key, || {
        format!("unit {}", saved.id)
    })?;
    Ok(MapUnit {
        id: saved.id,
        unit_type,
        location: saved.location,
        experience_level,
        hit_points_remaining: saved.hit_points_remaining,
        moves_remaining: saved.moves_remaining,
        is_fortified: saved.is_fortified,
    })
}

impl SaveGameData {
    pub fn resolve(self) -> Result<GameData, CorruptSave> {
        let terrain_types: Vec<Arc<TerrainType>> =
            self.terrain_types.into_iter().map(Arc::new).collect();
        let resources: Vec<Arc<Resource>> = self.resources.into_iter().map(Arc::new).collect();

        let bindings = TileBindings {
            terrain: index_by_key(&terrain_types, |t| t.key.as_str()),
            resources: index_by_key(&resources, |r| r.key.as_str()),
            none: Arc::new(Resource::none()),
        };
        let tiles = self
            .map
            .tiles
            .into_iter()
            .map(|saved| bindings.bind(saved))
            .collect::<Result<Vec<_>, _>>()?;
        let map = GameMap::from_tiles(
            MapDimensions::new(self.map.num_tiles_wide, self.map.num_tiles_tall),
            self.map.wrap_horizontally,
            self.map.wrap_vertically,
            tiles,
        )?;

        let experience_levels: Vec<Arc<ExperienceLevel>> =
            self.experience_levels.into_iter().map(Arc::new).collect();
        let levels_by_key = index_by_key(&experience_levels, |l| l.key.as_str());
        let default_experience_level = self
            .default_experience_level_key
            .map(|key| resolve_level(&levels_by_key, &key, || "default level".to_string()))
            .transpose()?;

        let unit_prototypes: IndexMap<String, Arc<UnitPrototype>> = self
            .unit_prototypes
            .into_iter()
            .map(|(key, proto)| (key, Arc::new(proto)))
            .collect();

        let map_units = self
            .map_units
            .into_iter()
            .map(|unit| resolve_unit(unit, &levels_by_key, &unit_prototypes))
            .collect::<Result<Vec<_>, _>>()?;

        let barbarian_info = resolve_barbarians(&unit_prototypes, self.barbarian_info)?;

        log::debug!(
            "Resolved save: {} tiles, {} units, {} prototypes",
            map.tiles().len(),
            map_units.len(),
            unit_prototypes.len()
        );

        Ok(GameData {
            terrain_types,
            resources,
            map,
            experience_levels,
            default_experience_level,
            unit_prototypes,
            map_units,
            barbarian_info,
        })
    }
}
