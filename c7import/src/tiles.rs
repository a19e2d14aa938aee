use crate::ImportError;
use crate::resources::ResourceImport;
use crate::{biq, sav};
use c7data::map::map_coordinates;
use c7data::{Civ3ExtraInfo, GameMap, MapDimensions, TerrainType, Tile};
use std::sync::Arc;

/// Common view over scenario and save tile records.
pub trait TileRecord {
    fn base_terrain(&self) -> i32;
    fn overlay_terrain(&self) -> i32;
    fn resource_id(&self) -> i32;
    fn snow_capped(&self) -> bool;
    fn pine_forest(&self) -> bool;
    /// River edges as `[northeast, southeast, southwest, northwest]`.
    fn rivers(&self) -> [bool; 4];
    fn extra_info(&self) -> Civ3ExtraInfo;
}

impl TileRecord for biq::Tile {
    fn base_terrain(&self) -> i32 {
        self.base_terrain
    }
    fn overlay_terrain(&self) -> i32 {
        self.overlay_terrain
    }
    fn resource_id(&self) -> i32 {
        self.resource
    }
    fn snow_capped(&self) -> bool {
        self.snow_capped_mountain
    }
    fn pine_forest(&self) -> bool {
        self.pine_forest
    }
    fn rivers(&self) -> [bool; 4] {
        [
            self.river_connection_northeast,
            self.river_connection_southeast,
            self.river_connection_southwest,
            self.river_connection_northwest,
        ]
    }
    fn extra_info(&self) -> Civ3ExtraInfo {
        Civ3ExtraInfo {
            base_terrain_file_id: self.texture_file,
            base_terrain_image_id: self.texture_location,
        }
    }
}

impl TileRecord for sav::Tile {
    fn base_terrain(&self) -> i32 {
        self.base_terrain
    }
    fn overlay_terrain(&self) -> i32 {
        self.overlay_terrain
    }
    fn resource_id(&self) -> i32 {
        self.resource_id
    }
    fn snow_capped(&self) -> bool {
        self.snow_capped
    }
    fn pine_forest(&self) -> bool {
        self.pine_forest
    }
    fn rivers(&self) -> [bool; 4] {
        [
            self.river_northeast,
            self.river_southeast,
            self.river_southwest,
            self.river_northwest,
        ]
    }
    fn extra_info(&self) -> Civ3ExtraInfo {
        Civ3ExtraInfo {
            base_terrain_file_id: self.texture_file,
            base_terrain_image_id: self.texture_location,
        }
    }
}

fn terrain_at(
    terrain_types: &[Arc<TerrainType>],
    tile: usize,
    id: i32,
) -> Result<Arc<TerrainType>, ImportError> {
    usize::try_from(id)
        .ok()
        .and_then(|idx| terrain_types.get(idx))
        .cloned()
        .ok_or(ImportError::TerrainOutOfRange {
            tile,
            id,
            count: terrain_types.len(),
        })
}

/// Builds the map from tile records in index order.
///
/// Record `i` lands at `map_coordinates(i, width)`. Terrain ids index
/// straight into `terrain_types`; resource ids go through `resources`. The
/// first record that does not resolve aborts the import.
pub fn import_tiles<T: TileRecord>(
    records: &[T],
    terrain_types: &[Arc<TerrainType>],
    resources: &ResourceImport,
    dimensions: Option<MapDimensions>,
) -> Result<GameMap, ImportError> {
    let Some(dimensions) = dimensions else {
        if records.is_empty() {
            return Ok(GameMap::default());
        }
        return Err(ImportError::DimensionsUnresolved {
            tiles: records.len(),
        });
    };
    let MapDimensions { width, height } = dimensions;
    if width <= 0 || width % 2 != 0 || height <= 0 {
        return Err(ImportError::InvalidDimensions { width, height });
    }

    let mut tiles = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let (x, y) = map_coordinates(index, width);
        if y >= height {
            return Err(ImportError::TileOutOfBounds {
                tile: index,
                x,
                y,
                width,
                height,
            });
        }

        let base = terrain_at(terrain_types, index, record.base_terrain())?;
        let overlay = terrain_at(terrain_types, index, record.overlay_terrain())?;
        let resource = resources.get(record.resource_id()).cloned().ok_or(
            ImportError::UnknownResource {
                tile: index,
                id: record.resource_id(),
            },
        )?;

        let mut tile = Tile::new(x, y, base, overlay, resource);
        if record.snow_capped() {
            tile.is_snow_capped = true;
        }
        if record.pine_forest() {
            tile.is_pine_forest = true;
        }
        let [northeast, southeast, southwest, northwest] = record.rivers();
        tile.river_northeast = northeast;
        tile.river_southeast = southeast;
        tile.river_southwest = southwest;
        tile.river_northwest = northwest;
        tile.extra_info = Some(record.extra_info());
        tiles.push(tile);
    }

    log::debug!("Imported {} tiles onto {}x{} map", tiles.len(), width, height);
    Ok(GameMap::from_tiles(dimensions, false, false, tiles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biq::{Good, Terr};
    use crate::resources::import_resources;
    use crate::terrain::import_terrain_types;

    fn rules() -> (Vec<Arc<TerrainType>>, ResourceImport) {
        let terrain = import_terrain_types(&[
            Terr {
                name: "Grassland".into(),
                ..Default::default()
            },
            Terr {
                name: "Forest".into(),
                ..Default::default()
            },
        ]);
        let resources = import_resources(&[Good {
            name: "Wheat".into(),
            ..Default::default()
        }]);
        (terrain, resources)
    }

    fn record(base: i32, overlay: i32, resource: i32) -> sav::Tile {
        sav::Tile {
            base_terrain: base,
            overlay_terrain: overlay,
            resource_id: resource,
            ..Default::default()
        }
    }

    #[test]
    fn test_tiles_resolve_in_order() {
        let (terrain, resources) = rules();
        let mut records = vec![record(0, 0, -1); 8];
        records[1] = sav::Tile {
            texture_file: 4,
            texture_location: 17,
            pine_forest: true,
            river_southwest: true,
            ..record(0, 1, 0)
        };

        let map = import_tiles(
            &records,
            &terrain,
            &resources,
            Some(MapDimensions::new(4, 4)),
        )
        .unwrap();

        assert_eq!(map.tiles().len(), 8);
        let tile = &map.tiles()[1];
        assert_eq!((tile.x, tile.y), (2, 0));
        assert!(Arc::ptr_eq(&tile.overlay_terrain_type, &terrain[1]));
        assert!(Arc::ptr_eq(&tile.resource, &resources.resources[0]));
        assert!(tile.is_pine_forest);
        assert!(!tile.is_snow_capped);
        assert!(tile.river_southwest);
        assert!(!tile.river_northeast);
        assert_eq!(
            tile.extra_info,
            Some(Civ3ExtraInfo {
                base_terrain_file_id: 4,
                base_terrain_image_id: 17,
            })
        );
        assert!(map.tiles()[0].resource.is_none());
        assert_eq!((map.tiles()[2].x, map.tiles()[2].y), (1, 1));
    }

    #[test]
    fn test_biq_tiles_share_importer() {
        let (terrain, resources) = rules();
        let records = vec![
            biq::Tile {
                snow_capped_mountain: true,
                river_connection_northwest: true,
                ..Default::default()
            };
            2
        ];
        let map = import_tiles(
            &records,
            &terrain,
            &resources,
            Some(MapDimensions::new(4, 1)),
        )
        .unwrap();
        assert!(map.tiles()[0].is_snow_capped);
        assert!(map.tiles()[1].river_northwest);
        // biq::Tile::default() has resource 0
        assert_eq!(map.tiles()[1].resource.key, "Wheat");
    }

    #[test]
    fn test_terrain_out_of_range() {
        let (terrain, resources) = rules();
        let records = vec![record(0, 0, -1), record(2, 0, -1)];
        let err = import_tiles(
            &records,
            &terrain,
            &resources,
            Some(MapDimensions::new(4, 1)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ImportError::TerrainOutOfRange {
                tile: 1,
                id: 2,
                count: 2
            }
        ));

        let negative = vec![record(0, -3, -1)];
        assert!(matches!(
            import_tiles(
                &negative,
                &terrain,
                &resources,
                Some(MapDimensions::new(4, 1))
            ),
            Err(ImportError::TerrainOutOfRange { id: -3, .. })
        ));
    }

    #[test]
    fn test_unknown_resource() {
        let (terrain, resources) = rules();
        let records = vec![record(0, 0, 5)];
        assert!(matches!(
            import_tiles(
                &records,
                &terrain,
                &resources,
                Some(MapDimensions::new(4, 1))
            ),
            Err(ImportError::UnknownResource { tile: 0, id: 5 })
        ));
    }

    #[test]
    fn test_dimension_failures() {
        let (terrain, resources) = rules();
        let records = vec![record(0, 0, -1); 3];

        assert!(matches!(
            import_tiles(&records, &terrain, &resources, None),
            Err(ImportError::DimensionsUnresolved { tiles: 3 })
        ));
        assert!(matches!(
            import_tiles(
                &records,
                &terrain,
                &resources,
                Some(MapDimensions::new(5, 2))
            ),
            Err(ImportError::InvalidDimensions { .. })
        ));
        // 4x1 holds two tiles; the third would be on row 1
        assert!(matches!(
            import_tiles(
                &records,
                &terrain,
                &resources,
                Some(MapDimensions::new(4, 1))
            ),
            Err(ImportError::TileOutOfBounds {
                tile: 2,
                x: 1,
                y: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_no_tiles_no_dimensions() {
        let (terrain, resources) = rules();
        let records: Vec<sav::Tile> = Vec::new();
        let map = import_tiles(&records, &terrain, &resources, None).unwrap();
        assert!(map.tiles().is_empty());
    }
}
