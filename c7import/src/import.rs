//! Import entry points.

use crate::biq::BiqData;
use crate::dimensions::resolve_map_dimensions;
use crate::resources::import_resources;
use crate::sav::SavData;
use crate::terrain::import_terrain_types;
use crate::tiles::import_tiles;
use crate::{Civ3Reader, ImportError};
use c7data::GameData;
use std::fs;
use std::path::Path;

fn read_file(path: &Path) -> Result<Vec<u8>, ImportError> {
    let bytes = fs::read(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Import a Civ3 save game.
///
/// `default_bic_path` is the stock scenario the save was started from; the
/// reader takes rule-set and map-header sections from it when the save omits
/// them. Tiles always come from the save.
pub fn import_sav<R: Civ3Reader + ?Sized>(
    reader: &R,
    save_path: &Path,
    default_bic_path: &Path,
) -> Result<GameData, ImportError> {
    log::info!("Importing Civ3 save: {}", save_path.display());
    let default_bic = read_file(default_bic_path)?;
    let save_bytes = read_file(save_path)?;
    let save = reader
        .read_sav(&save_bytes, &default_bic)
        .map_err(|source| ImportError::Reader {
            path: save_path.to_path_buf(),
            source,
        })?;
    import_save_data(&save)
}

/// Import a Civ3 scenario as its initial game state.
pub fn import_biq<R: Civ3Reader + ?Sized>(
    reader: &R,
    biq_path: &Path,
) -> Result<GameData, ImportError> {
    log::info!("Importing Civ3 scenario: {}", biq_path.display());
    let bytes = read_file(biq_path)?;
    let biq = reader
        .read_biq(&bytes)
        .map_err(|source| ImportError::Reader {
            path: biq_path.to_path_buf(),
            source,
        })?;
    import_scenario_data(&biq)
}

/// Build a game from already-parsed save records.
pub fn import_save_data(save: &SavData) -> Result<GameData, ImportError> {
    let terrain_types = import_terrain_types(&save.bic.terr);
    let resources = import_resources(&save.bic.good);
    let dimensions = resolve_map_dimensions(Some(&save.wrld), &save.bic);
    // Tile contents may have changed in-game, so the save's tiles are used
    // rather than the scenario's.
    let map = import_tiles(&save.tile, &terrain_types, &resources, dimensions)?;

    log::info!(
        "Imported save: {}x{} map, {} tiles, {} terrain types, {} resources",
        map.num_tiles_wide,
        map.num_tiles_tall,
        map.tiles().len(),
        terrain_types.len(),
        resources.resources.len()
    );
    Ok(GameData {
        terrain_types,
        resources: resources.resources,
        map,
        ..GameData::default()
    })
}

/// Build a game from already-parsed scenario records.
pub fn import_scenario_data(biq: &BiqData) -> Result<GameData, ImportError> {
    let terrain_types = import_terrain_types(&biq.terr);
    let resources = import_resources(&biq.good);
    let dimensions = resolve_map_dimensions(None, biq);
    let map = import_tiles(&biq.tile, &terrain_types, &resources, dimensions)?;

    log::info!(
        "Imported scenario: {}x{} map, {} tiles, {} terrain types, {} resources",
        map.num_tiles_wide,
        map.num_tiles_tall,
        map.tiles().len(),
        terrain_types.len(),
        resources.resources.len()
    );
    Ok(GameData {
        terrain_types,
        resources: resources.resources,
        map,
        ..GameData::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biq::{self, Good, Terr, Wmap};
    use crate::sav::{self, Wrld};
    use crate::{Civ3Reader, ReaderError};
    use c7data::TileDirection;
    use std::cell::RefCell;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn rules(width: i32, height: i32) -> BiqData {
        let tiles = (0..(width / 2 * height))
            .map(|i| biq::Tile {
                base_terrain: i % 2,
                overlay_terrain: i % 2,
                resource: if i == 3 { 1 } else { -1 },
                ..Default::default()
            })
            .collect();
        BiqData {
            terr: vec![
                Terr {
                    name: "Grassland".into(),
                    food: 2,
                    ..Default::default()
                },
                Terr {
                    name: "Coast".into(),
                    food: 1,
                    commerce: 2,
                    ..Default::default()
                },
            ],
            good: vec![
                Good {
                    name: "Wheat".into(),
                    good_type: 0,
                    ..Default::default()
                },
                Good {
                    name: "Spices".into(),
                    good_type: 1,
                    ..Default::default()
                },
            ],
            wmap: vec![Wmap { width, height }],
            tile: tiles,
        }
    }

    fn save(width: i32, height: i32) -> SavData {
        SavData {
            bic: rules(4, 2),
            wrld: Wrld { width, height },
            tile: (0..(width / 2 * height))
                .map(|i| sav::Tile {
                    base_terrain: 0,
                    overlay_terrain: 0,
                    resource_id: if i == 0 { 0 } else { -1 },
                    river_northeast: i == 1,
                    ..Default::default()
                })
                .collect(),
        }
    }

    /// Hands out canned records and remembers what it was given.
    struct FakeReader {
        biq: BiqData,
        sav: SavData,
        seen: RefCell<Vec<Vec<u8>>>,
    }

    impl Civ3Reader for FakeReader {
        fn read_biq(&self, bytes: &[u8]) -> Result<BiqData, ReaderError> {
            self.seen.borrow_mut().push(bytes.to_vec());
            Ok(self.biq.clone())
        }

        fn read_sav(&self, save: &[u8], default_bic: &[u8]) -> Result<SavData, ReaderError> {
            if save.is_empty() {
                return Err("empty save".into());
            }
            self.seen.borrow_mut().push(save.to_vec());
            self.seen.borrow_mut().push(default_bic.to_vec());
            Ok(self.sav.clone())
        }
    }

    fn reader() -> FakeReader {
        FakeReader {
            biq: rules(4, 4),
            sav: save(8, 4),
            seen: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_import_scenario_data() {
        let game = import_scenario_data(&rules(4, 4)).unwrap();

        assert_eq!(game.terrain_types.len(), 2);
        assert_eq!(game.resources.len(), 2);
        assert_eq!(game.map.dimensions(), c7data::MapDimensions::new(4, 4));
        assert_eq!(game.map.tiles().len(), 8);
        let tile = &game.map.tiles()[3];
        assert_eq!((tile.x, tile.y), (3, 1));
        assert_eq!(tile.resource.key, "Spices");
        assert!(Arc::ptr_eq(&tile.base_terrain_type, &game.terrain_types[1]));
        // Adjacency is ready as soon as the import returns
        assert!(tile.neighbor_index(TileDirection::Northwest).is_some());
        assert!(game.map_units.is_empty());
        assert!(game.default_experience_level.is_none());
    }

    #[test]
    fn test_save_overrides_scenario_size_and_tiles() {
        let game = import_save_data(&save(8, 4)).unwrap();

        assert_eq!(game.map.num_tiles_wide, 8);
        assert_eq!(game.map.num_tiles_tall, 4);
        assert_eq!(game.map.tiles().len(), 16);
        assert_eq!(game.map.tiles()[0].resource.key, "Wheat");
        assert!(game.map.tiles()[1].river_northeast);
        assert_eq!((game.map.tiles()[4].x, game.map.tiles()[4].y), (1, 1));
    }

    #[test]
    fn test_save_without_live_header_uses_scenario() {
        let mut data = save(4, 2);
        data.wrld = Wrld::default();
        let game = import_save_data(&data).unwrap();
        assert_eq!(game.map.dimensions(), c7data::MapDimensions::new(4, 2));
    }

    #[test]
    fn test_bad_tile_aborts_import() {
        let mut data = save(8, 4);
        data.tile[7].resource_id = 99;
        assert!(matches!(
            import_save_data(&data),
            Err(ImportError::UnknownResource { tile: 7, id: 99 })
        ));
    }

    #[test]
    fn test_import_from_files() {
        let dir = tempdir().unwrap();
        let biq_path = dir.path().join("conquests.biq");
        let sav_path = dir.path().join("game.SAV");
        fs::write(&biq_path, b"BICX").unwrap();
        fs::write(&sav_path, b"CIV3").unwrap();
        let reader = reader();

        let scenario = import_biq(&reader, &biq_path).unwrap();
        assert_eq!(scenario.map.tiles().len(), 8);

        let game = import_sav(&reader, &sav_path, &biq_path).unwrap();
        assert_eq!(game.map.tiles().len(), 16);
        assert_eq!(
            *reader.seen.borrow(),
            vec![b"BICX".to_vec(), b"CIV3".to_vec(), b"BICX".to_vec()]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = import_biq(&reader(), &dir.path().join("missing.biq")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn test_reader_failure() {
        let dir = tempdir().unwrap();
        let biq_path = dir.path().join("conquests.biq");
        let sav_path = dir.path().join("empty.sav");
        fs::write(&biq_path, b"BICX").unwrap();
        fs::write(&sav_path, b"").unwrap();

        let err = import_sav(&reader(), &sav_path, &biq_path).unwrap_err();
        assert!(matches!(err, ImportError::Reader { .. }));
        assert!(err.to_string().contains("empty save"));
    }
}
