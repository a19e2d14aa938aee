//! Builders for constructing game states in tests.

use crate::types::{ExperienceLevel, Resource, ResourceCategory, TerrainType, UnitPrototype};
use crate::units::{BarbarianInfo, MapUnit, TileLocation};
use crate::{GameData, GameMap, MapDimensions, Tile, map::map_coordinates};
use indexmap::IndexMap;
use std::sync::Arc;

fn terrain(key: &str, civ3_index: i32, food: i32, shields: i32, commerce: i32) -> TerrainType {
    TerrainType {
        key: key.to_string(),
        display_name: key.to_string(),
        civ3_index,
        base_food_production: food,
        base_shield_production: shields,
        base_commerce_production: commerce,
        movement_cost: 1,
        allow_cities: !matches!(key, "Coast" | "Sea" | "Ocean"),
    }
}

/// Terrain set used by [`GameDataBuilder`], in Civ3 index order.
pub fn standard_terrain() -> Vec<Arc<TerrainType>> {
    vec![
        Arc::new(terrain("Desert", 0, 0, 1, 0)),
        Arc::new(terrain("Plains", 1, 1, 1, 0)),
        Arc::new(terrain("Grassland", 2, 2, 0, 0)),
        Arc::new(terrain("Coast", 3, 1, 0, 2)),
        Arc::new(terrain("Sea", 4, 1, 0, 2)),
        Arc::new(terrain("Ocean", 5, 1, 0, 2)),
    ]
}

pub fn grassland() -> Arc<TerrainType> {
    Arc::new(terrain("Grassland", 2, 2, 0, 0))
}

/// A full grassland grid of `(width / 2) * height` tiles without resources.
pub fn tile_grid(width: i32, height: i32) -> Vec<Tile> {
    let grass = grassland();
    let none = Arc::new(Resource::none());
    (0..MapDimensions::new(width, height).tile_capacity())
        .map(|i| {
            let (x, y) = map_coordinates(i, width);
            Tile::new(x, y, grass.clone(), grass.clone(), none.clone())
        })
        .collect()
}

fn experience_level(key: &str, display_name: &str, hit_points: i32) -> ExperienceLevel {
    ExperienceLevel {
        key: key.to_string(),
        display_name: display_name.to_string(),
        base_hit_points: hit_points,
        retreat_chance: 0.0,
    }
}

fn prototype(name: &str, attack: i32, defense: i32, movement: i32, cost: i32) -> UnitPrototype {
    UnitPrototype {
        name: name.to_string(),
        attack,
        defense,
        bombard: 0,
        movement,
        shield_cost: cost,
        population_cost: 0,
        categories: vec!["Land".to_string()],
    }
}

pub struct GameDataBuilder {
    game: GameData,
    dimensions: MapDimensions,
    tiles: Vec<Tile>,
}

impl GameDataBuilder {
    pub fn new() -> Self {
        Self {
            game: GameData {
                terrain_types: standard_terrain(),
                ..GameData::default()
            },
            dimensions: MapDimensions::new(0, 0),
            tiles: Vec::new(),
        }
    }

    /// Fill the map with grassland.
    pub fn with_grid(mut self, width: i32, height: i32) -> Self {
        let grass = self.terrain("Grassland");
        let none = Arc::new(Resource::none());
        self.dimensions = MapDimensions::new(width, height);
        self.tiles = (0..self.dimensions.tile_capacity())
            .map(|i| {
                let (x, y) = map_coordinates(i, width);
                Tile::new(x, y, grass.clone(), grass.clone(), none.clone())
            })
            .collect();
        self
    }

    pub fn with_terrain_on_tile(mut self, index: usize, key: &str) -> Self {
        let terrain = self.terrain(key);
        self.tiles[index].base_terrain_type = terrain;
        self
    }

    /// Place a bonus resource (added to the rule set on first use).
    pub fn with_resource_on_tile(mut self, index: usize, key: &str) -> Self {
        let resource = match self.game.resource(key) {
            Some(existing) => existing.clone(),
            None => {
                let resource = Arc::new(Resource {
                    key: key.to_string(),
                    index: self.game.resources.len() as i32,
                    name: key.to_string(),
                    icon: 0,
                    category: ResourceCategory::Bonus,
                    food_bonus: 1,
                    shields_bonus: 0,
                    commerce_bonus: 0,
                    appearance_ratio: 100,
                    disappearance_ratio: 0,
                    civilopedia_entry: format!("GOOD_{}", key.to_uppercase()),
                });
                self.game.resources.push(resource.clone());
                resource
            }
        };
        self.tiles[index].resource = resource;
        self
    }

    /// Civ3 experience levels (default REGULAR) and a handful of units,
    /// with Warrior/Horseman/Galley as the barbarian units.
    pub fn with_standard_units(mut self) -> Self {
        self.game.experience_levels = vec![
            Arc::new(experience_level("CONSCRIPT", "Conscript", 2)),
            Arc::new(experience_level("REGULAR", "Regular", 3)),
            Arc::new(experience_level("VETERAN", "Veteran", 4)),
            Arc::new(experience_level("ELITE", "Elite", 5)),
        ];
        self.game.default_experience_level = Some(self.game.experience_levels[1].clone());

        let mut galley = prototype("Galley", 1, 1, 3, 30);
        galley.categories = vec!["Sea".to_string()];
        let mut settler = prototype("Settler", 0, 0, 1, 30);
        settler.population_cost = 2;
        let prototypes = [
            prototype("Warrior", 1, 1, 1, 10),
            prototype("Horseman", 2, 1, 2, 20),
            galley,
            settler,
        ];
        self.game.unit_prototypes = prototypes
            .into_iter()
            .map(|p| (p.name.clone(), Arc::new(p)))
            .collect::<IndexMap<_, _>>();

        self.game.barbarian_info = BarbarianInfo {
            basic_barbarian: self.game.unit_prototype("Warrior").cloned(),
            advanced_barbarian: self.game.unit_prototype("Horseman").cloned(),
            barbarian_sea_unit: self.game.unit_prototype("Galley").cloned(),
        };
        self
    }

    pub fn with_unit(mut self, id: &str, prototype: &str, level: &str, x: i32, y: i32) -> Self {
        let unit_type = self
            .game
            .unit_prototype(prototype)
            .cloned()
            .unwrap_or_else(|| panic!("unknown prototype {}", prototype));
        let experience_level = self
            .game
            .experience_levels
            .iter()
            .find(|l| l.key == level)
            .cloned()
            .unwrap_or_else(|| panic!("unknown experience level {}", level));
        self.game.map_units.push(MapUnit::new(
            id,
            unit_type,
            TileLocation::new(x, y),
            experience_level,
        ));
        self
    }

    pub fn build(mut self) -> GameData {
        self.game.map = GameMap::from_tiles(self.dimensions, false, false, self.tiles)
            .expect("builder grid is well-formed");
        self.game
    }

    fn terrain(&self, key: &str) -> Arc<TerrainType> {
        self.game
            .terrain_type(key)
            .cloned()
            .unwrap_or_else(|| panic!("unknown terrain {}", key))
    }
}

impl Default for GameDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let game = GameDataBuilder::default()
            .with_grid(6, 4)
            .with_resource_on_tile(0, "Wheat")
            .with_resource_on_tile(3, "Wheat")
            .with_terrain_on_tile(1, "Coast")
            .with_standard_units()
            .with_unit("u1", "Settler", "ELITE", 0, 0)
            .build();

        assert_eq!(game.map.tiles().len(), 12);
        assert_eq!(game.resources.len(), 1);
        assert!(Arc::ptr_eq(
            &game.map.tiles()[0].resource,
            &game.map.tiles()[3].resource
        ));
        assert!(game.map.tiles()[1].is_water());
        assert_eq!(game.map_units[0].hit_points_remaining, 5);
        assert_eq!(game.unit_prototypes.len(), 4);
    }
}
