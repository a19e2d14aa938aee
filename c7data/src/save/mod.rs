//! Whole-state save and load.
//!
//! A save is the camelCase JSON form of [`SaveFormat`], written either as a
//! plain `.json` file or as the single entry `"save"` of a `.zip` archive.
//! The container is chosen from the file extension alone; any other
//! extension fails before the file system is touched.
//!
//! Loading always finishes with [`SaveFormat::resolve`], so callers only
//! ever see a fully resolved [`GameData`].

mod container;
mod format;
mod inflate;

pub use container::{ARCHIVE_ENTRY_NAME, ArchiveCompression, SaveCompression};
pub use format::{SaveBarbarianInfo, SaveFormat, SaveGameData, SaveMap, SaveMapUnit, SaveTile};

use crate::GameData;
use crate::map::MapError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Version tag written into new saves.
pub const SAVE_VERSION: &str = "v0.0early-prototype";

/// Version tags this build knows how to read. Anything else is loaded on a
/// best-effort basis with a warning.
pub const COMPATIBLE_VERSIONS: &[&str] = &[SAVE_VERSION];

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Unsupported save file extension: {0} (expected .json or .zip)")]
    InvalidFormat(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("Save archive has no '{0}' entry")]
    MissingEntry(&'static str),
    #[error("Corrupt save: {0}")]
    Corrupt(#[from] CorruptSave),
}

/// A reference in the save that does not resolve.
#[derive(Error, Debug)]
pub enum CorruptSave {
    #[error("Tile ({x}, {y}) references unknown resource '{key}'")]
    UnknownResource { x: i32, y: i32, key: String },
    #[error("Tile ({x}, {y}) references unknown terrain '{key}'")]
    UnknownTerrain { x: i32, y: i32, key: String },
    #[error("Unknown experience level '{key}' referenced by {referrer}")]
    UnknownExperienceLevel { key: String, referrer: String },
    #[error("Unknown unit prototype '{key}' referenced by {referrer}")]
    UnknownUnitPrototype { key: String, referrer: String },
    #[error("Barbarian {role} unit index {index} is out of range ({count} prototypes)")]
    PrototypeIndexOutOfRange {
        role: &'static str,
        index: usize,
        count: usize,
    },
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Options for writing saves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Indent the JSON payload, one field per line.
    pub pretty: bool,
    /// Compression of the archive entry (ignored for `.json`).
    pub compression: ArchiveCompression,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            compression: ArchiveCompression::Deflated,
        }
    }
}

/// Save `game` to `path` with the default [`SaveConfig`].
pub fn save_game(game: &GameData, path: &Path) -> Result<(), SaveError> {
    save_game_with_config(game, path, &SaveConfig::default())
}

pub fn save_game_with_config(
    game: &GameData,
    path: &Path,
    config: &SaveConfig,
) -> Result<(), SaveError> {
    let compression = SaveCompression::from_path(path)?;
    let bytes = to_bytes(game, compression, config)?;
    fs::write(path, &bytes)?;
    log::info!(
        "Saved {} tiles to {} ({} bytes)",
        game.map.tiles().len(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Serialize `game` into container bytes.
pub fn to_bytes(
    game: &GameData,
    compression: SaveCompression,
    config: &SaveConfig,
) -> Result<Vec<u8>, SaveError> {
    let save = SaveFormat::new(game);
    let payload = if config.pretty {
        serde_json::to_vec_pretty(&save)?
    } else {
        serde_json::to_vec(&save)?
    };
    container::wrap(payload, compression, config)
}

/// Load and resolve the save at `path`.
pub fn load_game(path: &Path) -> Result<GameData, SaveError> {
    log::info!("Loading save file: {}", path.display());
    let save = read_save_format(path)?;
    let game = save.resolve()?;
    log::info!(
        "Loaded {}x{} map with {} tiles, {} units",
        game.map.num_tiles_wide,
        game.map.num_tiles_tall,
        game.map.tiles().len(),
        game.map_units.len()
    );
    Ok(game)
}

/// Deserialize and resolve container bytes.
pub fn from_bytes(bytes: Vec<u8>, compression: SaveCompression) -> Result<GameData, SaveError> {
    Ok(parse_save_format(bytes, compression)?.resolve()?)
}

/// Read the save at `path` without resolving references.
pub fn read_save_format(path: &Path) -> Result<SaveFormat, SaveError> {
    let compression = SaveCompression::from_path(path)?;
    let bytes = fs::read(path)?;
    log::debug!("Read {} bytes from {}", bytes.len(), path.display());
    parse_save_format(bytes, compression)
}

fn parse_save_format(
    bytes: Vec<u8>,
    compression: SaveCompression,
) -> Result<SaveFormat, SaveError> {
    let payload = container::unwrap(bytes, compression)?;
    let save: SaveFormat = serde_json::from_slice(&payload)?;
    check_version(&save.version);
    Ok(save)
}

fn check_version(version: &str) -> bool {
    let known = COMPATIBLE_VERSIONS.contains(&version);
    if !known {
        log::warn!(
            "Save version '{}' is not a known version (expected one of {:?}), loading anyway",
            version,
            COMPATIBLE_VERSIONS
        );
    }
    known
}
