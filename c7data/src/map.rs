//! Staggered tile grid.
//!
//! Civ3 maps are stored as a flat list of tiles laid out in a brick pattern:
//! every row holds `width / 2` tiles and odd rows are shifted one column to
//! the right. A tile's `(x, y)` therefore always satisfies `x + y` even.
//!
//! ```text
//! y=0:  (0,0)   (2,0)   (4,0)
//! y=1:      (1,1)   (3,1)   (5,1)
//! y=2:  (0,2)   (2,2)   (4,2)
//! ```

use crate::types::{Civ3ExtraInfo, Resource, TerrainType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Converts a linear tile index into grid coordinates.
///
/// # Panics
/// If `width < 2`. Callers must pass an even, positive width.
pub fn map_coordinates(index: usize, width: i32) -> (i32, i32) {
    debug_assert!(width > 0 && width % 2 == 0, "map width must be even");
    let half = (width / 2) as usize;
    let y = index / half;
    let x = (index % half) * 2 + (y % 2);
    (x as i32, y as i32)
}

/// Inverse of [`map_coordinates`]. Returns `None` for positions that are off
/// the map or not on the staggered grid.
pub fn tile_index(x: i32, y: i32, width: i32, height: i32) -> Option<usize> {
    if x < 0 || y < 0 || x >= width || y >= height || (x + y) % 2 != 0 {
        return None;
    }
    Some((y * (width / 2) + x / 2) as usize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapDimensions {
    pub width: i32,
    pub height: i32,
}

impl MapDimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of tiles a staggered map of this size holds.
    pub fn tile_capacity(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        (self.width / 2) as usize * self.height as usize
    }

    fn is_valid(&self) -> bool {
        self.width > 0 && self.width % 2 == 0 && self.height > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl TileDirection {
    pub const ALL: [TileDirection; 8] = [
        TileDirection::North,
        TileDirection::Northeast,
        TileDirection::East,
        TileDirection::Southeast,
        TileDirection::South,
        TileDirection::Southwest,
        TileDirection::West,
        TileDirection::Northwest,
    ];

    /// Grid offset `(dx, dy)` to the neighbor in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            TileDirection::North => (0, -2),
            TileDirection::Northeast => (1, -1),
            TileDirection::East => (2, 0),
            TileDirection::Southeast => (1, 1),
            TileDirection::South => (0, 2),
            TileDirection::Southwest => (-1, 1),
            TileDirection::West => (-2, 0),
            TileDirection::Northwest => (-1, -1),
        }
    }

    pub fn opposite(self) -> TileDirection {
        match self {
            TileDirection::North => TileDirection::South,
            TileDirection::Northeast => TileDirection::Southwest,
            TileDirection::East => TileDirection::West,
            TileDirection::Southeast => TileDirection::Northwest,
            TileDirection::South => TileDirection::North,
            TileDirection::Southwest => TileDirection::Northeast,
            TileDirection::West => TileDirection::East,
            TileDirection::Northwest => TileDirection::Southeast,
        }
    }
}

/// A single map tile with its terrain and resource bound.
#[derive(Debug, Clone)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub base_terrain_type: Arc<TerrainType>,
    pub overlay_terrain_type: Arc<TerrainType>,
    pub resource: Arc<Resource>,
    pub is_snow_capped: bool,
    pub is_pine_forest: bool,
    pub river_northeast: bool,
    pub river_southeast: bool,
    pub river_southwest: bool,
    pub river_northwest: bool,
    pub extra_info: Option<Civ3ExtraInfo>,
    /// Indices into the owning map, filled in by [`GameMap::from_tiles`].
    neighbors: [Option<usize>; 8],
}

impl Tile {
    pub fn new(
        x: i32,
        y: i32,
        base_terrain_type: Arc<TerrainType>,
        overlay_terrain_type: Arc<TerrainType>,
        resource: Arc<Resource>,
    ) -> Self {
        Self {
            x,
            y,
            base_terrain_type,
            overlay_terrain_type,
            resource,
            is_snow_capped: false,
            is_pine_forest: false,
            river_northeast: false,
            river_southeast: false,
            river_southwest: false,
            river_northwest: false,
            extra_info: None,
            neighbors: [None; 8],
        }
    }

    /// Index of the neighboring tile in `direction`, if there is one.
    pub fn neighbor_index(&self, direction: TileDirection) -> Option<usize> {
        self.neighbors[direction as usize]
    }

    pub fn neighbor_indices(&self) -> impl Iterator<Item = (TileDirection, usize)> + '_ {
        TileDirection::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor_index(dir).map(|idx| (dir, idx)))
    }

    pub fn has_river(&self) -> bool {
        self.river_northeast || self.river_southeast || self.river_southwest || self.river_northwest
    }

    pub fn is_water(&self) -> bool {
        self.base_terrain_type.is_water()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Invalid map dimensions {width}x{height} (width must be even and positive)")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Map of {width}x{height} holds {capacity} tiles, got {count}")]
    TooManyTiles {
        width: i32,
        height: i32,
        capacity: usize,
        count: usize,
    },
    #[error("Tile {index} is at ({found_x}, {found_y}), expected ({expected_x}, {expected_y})")]
    MisplacedTile {
        index: usize,
        expected_x: i32,
        expected_y: i32,
        found_x: i32,
        found_y: i32,
    },
}

/// The tile grid. Tiles are stored in index order, so `tiles()[i]` sits at
/// `map_coordinates(i, num_tiles_wide)`.
#[derive(Debug, Clone, Default)]
pub struct GameMap {
    pub num_tiles_wide: i32,
    pub num_tiles_tall: i32,
    pub wrap_horizontally: bool,
    pub wrap_vertically: bool,
    tiles: Vec<Tile>,
}

impl GameMap {
    /// Builds a map from tiles in index order and computes adjacency.
    ///
    /// Every tile must sit at the position its index maps to. A map with no
    /// tiles may have unset (0x0) dimensions.
    pub fn from_tiles(
        dimensions: MapDimensions,
        wrap_horizontally: bool,
        wrap_vertically: bool,
        tiles: Vec<Tile>,
    ) -> Result<Self, MapError> {
        let unset = dimensions.width == 0 && dimensions.height == 0;
        if !(dimensions.is_valid() || (unset && tiles.is_empty())) {
            return Err(MapError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            });
        }

        let capacity = dimensions.tile_capacity();
        if tiles.len() > capacity {
            return Err(MapError::TooManyTiles {
                width: dimensions.width,
                height: dimensions.height,
                capacity,
                count: tiles.len(),
            });
        }

        for (index, tile) in tiles.iter().enumerate() {
            let (expected_x, expected_y) = map_coordinates(index, dimensions.width);
            if (tile.x, tile.y) != (expected_x, expected_y) {
                return Err(MapError::MisplacedTile {
                    index,
                    expected_x,
                    expected_y,
                    found_x: tile.x,
                    found_y: tile.y,
                });
            }
        }

        let mut map = Self {
            num_tiles_wide: dimensions.width,
            num_tiles_tall: dimensions.height,
            wrap_horizontally,
            wrap_vertically,
            tiles,
        };
        map.compute_neighbors();
        Ok(map)
    }

    pub fn dimensions(&self) -> MapDimensions {
        MapDimensions::new(self.num_tiles_wide, self.num_tiles_tall)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Index of the tile at `(x, y)`, applying wrapping if enabled.
    pub fn tile_index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = self.wrap(x, y);
        tile_index(x, y, self.num_tiles_wide, self.num_tiles_tall)
            .filter(|&idx| idx < self.tiles.len())
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.tile_index(x, y).and_then(|idx| self.tiles.get(idx))
    }

    pub fn neighbor(&self, index: usize, direction: TileDirection) -> Option<&Tile> {
        self.tiles
            .get(index)?
            .neighbor_index(direction)
            .and_then(|idx| self.tiles.get(idx))
    }

    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles
            .get(index)
            .into_iter()
            .flat_map(|tile| tile.neighbor_indices())
            .filter_map(|(_, idx)| self.tiles.get(idx))
    }

    /// Whether any tile adjacent to `index` is water.
    pub fn neighbors_water(&self, index: usize) -> bool {
        self.neighbors(index).any(Tile::is_water)
    }

    fn wrap(&self, x: i32, y: i32) -> (i32, i32) {
        let x = if self.wrap_horizontally && self.num_tiles_wide > 0 {
            x.rem_euclid(self.num_tiles_wide)
        } else {
            x
        };
        let y = if self.wrap_vertically && self.num_tiles_tall > 0 {
            y.rem_euclid(self.num_tiles_tall)
        } else {
            y
        };
        (x, y)
    }

    fn compute_neighbors(&mut self) {
        let links: Vec<[Option<usize>; 8]> = self
            .tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                let mut links = [None; 8];
                for dir in TileDirection::ALL {
                    let (dx, dy) = dir.offset();
                    // A wrap on a 2-wide or 2-tall map lands back on the tile
                    links[dir as usize] = self
                        .tile_index(tile.x + dx, tile.y + dy)
                        .filter(|&other| other != index);
                }
                links
            })
            .collect();

        for (tile, links) in self.tiles.iter_mut().zip(links) {
            tile.neighbors = links;
        }
        log::trace!("Computed neighbors for {} tiles", self.tiles.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{grassland, tile_grid};
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_map_coordinates_staggered() {
        // 8 wide => 4 tiles per row
        assert_eq!(map_coordinates(0, 8), (0, 0));
        assert_eq!(map_coordinates(3, 8), (6, 0));
        assert_eq!(map_coordinates(4, 8), (1, 1));
        assert_eq!(map_coordinates(7, 8), (7, 1));
        assert_eq!(map_coordinates(8, 8), (0, 2));
    }

    #[test]
    fn test_tile_index_rejects_off_grid() {
        assert_eq!(tile_index(1, 0, 8, 4), None);
        assert_eq!(tile_index(-2, 0, 8, 4), None);
        assert_eq!(tile_index(8, 0, 8, 4), None);
        assert_eq!(tile_index(0, 4, 8, 4), None);
        assert_eq!(tile_index(1, 1, 8, 4), Some(4));
    }

    #[test]
    fn test_from_tiles_rejects_misplaced_tile() {
        let terrain = grassland();
        let none = Arc::new(Resource::none());
        let tiles = vec![
            Tile::new(0, 0, terrain.clone(), terrain.clone(), none.clone()),
            Tile::new(4, 0, terrain.clone(), terrain, none),
        ];
        let err = GameMap::from_tiles(MapDimensions::new(4, 2), false, false, tiles).unwrap_err();
        assert!(matches!(err, MapError::MisplacedTile { index: 1, .. }));
    }

    #[test]
    fn test_from_tiles_rejects_odd_width() {
        let err =
            GameMap::from_tiles(MapDimensions::new(5, 2), false, false, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidDimensions {
                width: 5,
                height: 2
            }
        );
    }

    #[test]
    fn test_from_tiles_rejects_overflow() {
        let mut tiles = tile_grid(4, 2);
        let terrain = grassland();
        let (x, y) = map_coordinates(tiles.len(), 4);
        tiles.push(Tile::new(x, y, terrain.clone(), terrain, Arc::new(Resource::none())));
        let err = GameMap::from_tiles(MapDimensions::new(4, 2), false, false, tiles).unwrap_err();
        assert!(matches!(err, MapError::TooManyTiles { capacity: 4, count: 5, .. }));
    }

    #[test]
    fn test_empty_map_without_dimensions() {
        let map = GameMap::from_tiles(MapDimensions::new(0, 0), false, false, Vec::new()).unwrap();
        assert!(map.tiles().is_empty());
    }

    #[test]
    fn test_neighbors_interior_and_edge() {
        let map = GameMap::from_tiles(MapDimensions::new(8, 6), false, false, tile_grid(8, 6))
            .unwrap();

        // (3,3) is interior: all eight neighbors exist
        let center = map.tile_index(3, 3).unwrap();
        assert_eq!(map.neighbors(center).count(), 8);
        let north = map.neighbor(center, TileDirection::North).unwrap();
        assert_eq!((north.x, north.y), (3, 1));
        let east = map.neighbor(center, TileDirection::East).unwrap();
        assert_eq!((east.x, east.y), (5, 3));

        // (0,0) corner: only E, SE, S
        let corner = map.tile_index(0, 0).unwrap();
        let dirs: HashSet<TileDirection> = map.tiles()[corner]
            .neighbor_indices()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(
            dirs,
            HashSet::from([
                TileDirection::East,
                TileDirection::Southeast,
                TileDirection::South
            ])
        );
    }

    #[test]
    fn test_horizontal_wrap() {
        let map =
            GameMap::from_tiles(MapDimensions::new(8, 6), true, false, tile_grid(8, 6)).unwrap();
        let corner = map.tile_index(0, 0).unwrap();
        let west = map.neighbor(corner, TileDirection::West).unwrap();
        assert_eq!((west.x, west.y), (6, 0));
        let southwest = map.neighbor(corner, TileDirection::Southwest).unwrap();
        assert_eq!((southwest.x, southwest.y), (7, 1));
        assert!(map.neighbor(corner, TileDirection::North).is_none());
    }

    #[test]
    fn test_neighbors_water() {
        let mut tiles = tile_grid(4, 4);
        let coast = Arc::new(TerrainType {
            key: "Coast".to_string(),
            display_name: "Coast".to_string(),
            civ3_index: 11,
            base_food_production: 1,
            base_shield_production: 0,
            base_commerce_production: 2,
            movement_cost: 1,
            allow_cities: false,
        });
        // (3,1) is index 3
        tiles[3].base_terrain_type = coast;
        let map = GameMap::from_tiles(MapDimensions::new(4, 4), false, false, tiles).unwrap();
        assert!(map.neighbors_water(map.tile_index(2, 2).unwrap()));
        assert!(!map.neighbors_water(map.tile_index(0, 2).unwrap()));
    }

    #[test]
    fn test_narrow_wrap_has_no_self_links() {
        let mut tiles = tile_grid(2, 4);
        let coast = Arc::new(TerrainType {
            key: "Coast".to_string(),
            display_name: "Coast".to_string(),
            civ3_index: 11,
            base_food_production: 1,
            base_shield_production: 0,
            base_commerce_production: 2,
            movement_cost: 1,
            allow_cities: false,
        });
        tiles[0].base_terrain_type = coast;
        let map = GameMap::from_tiles(MapDimensions::new(2, 4), true, true, tiles).unwrap();

        for (index, tile) in map.tiles().iter().enumerate() {
            assert!(tile.neighbor_indices().all(|(_, other)| other != index));
        }
        assert!(map.neighbor(0, TileDirection::East).is_none());
        assert!(map.neighbor(0, TileDirection::West).is_none());
        // (0,0) is the only water tile, so it has no water around it
        assert!(!map.neighbors_water(0));
        assert!(map.neighbors_water(1));
    }

    proptest! {
        #[test]
        fn prop_coordinates_fill_grid(half_width in 1..40i32, height in 1..40i32) {
            let width = half_width * 2;
            let count = (half_width * height) as usize;
            let mut seen = HashSet::new();
            for i in 0..count {
                let (x, y) = map_coordinates(i, width);
                prop_assert!(x >= 0 && x < width);
                prop_assert!(y >= 0 && y < height);
                prop_assert_eq!((x + y) % 2, 0);
                prop_assert!(seen.insert((x, y)), "duplicate position ({}, {})", x, y);
                prop_assert_eq!(tile_index(x, y, width, height), Some(i));
            }
            // Every on-grid position is covered exactly once
            prop_assert_eq!(seen.len(), count);
        }

        #[test]
        fn prop_coordinates_injective(half_width in 1..30i32, height in 1..30i32) {
            let width = half_width * 2;
            let count = (width * height) as usize;
            let positions: HashSet<(i32, i32)> =
                (0..count).map(|i| map_coordinates(i, width)).collect();
            prop_assert_eq!(positions.len(), count);
        }

        #[test]
        fn prop_neighbors_symmetric(
            half_width in 1..12i32,
            half_height in 1..12i32,
            wrap_h in any::<bool>(),
            wrap_v in any::<bool>(),
        ) {
            let width = half_width * 2;
            let height = half_height * 2;
            let map = GameMap::from_tiles(
                MapDimensions::new(width, height),
                wrap_h,
                wrap_v,
                tile_grid(width, height),
            ).unwrap();
            for (index, tile) in map.tiles().iter().enumerate() {
                for (dir, other) in tile.neighbor_indices() {
                    let back = map.tiles()[other].neighbor_index(dir.opposite());
                    prop_assert_eq!(back, Some(index));
                }
            }
        }
    }
}
