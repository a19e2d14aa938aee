//! # Civ3 import
//!
//! Converts Civilization III scenarios and saves into [`c7data::GameData`].
//!
//! Byte-level parsing of `.biq`/`.sav` files is delegated to a
//! [`Civ3Reader`]; this crate works on the typed records it returns.
//!
//! ```text
//! TERR ──▶ terrain types ─┐
//! GOOD ──▶ resources ─────┼──▶ tiles ──▶ GameData
//! WRLD/WMAP ──▶ size ─────┘
//! ```
//!
//! Both entry points run the stages in that order; the first failure aborts
//! the import and nothing is returned.

pub mod biq;
pub mod dimensions;
pub mod import;
pub mod resources;
pub mod sav;
pub mod terrain;
pub mod tiles;

pub use dimensions::resolve_map_dimensions;
pub use import::{import_biq, import_sav, import_save_data, import_scenario_data};
pub use resources::{ResourceImport, import_resources};
pub use terrain::import_terrain_types;
pub use tiles::{TileRecord, import_tiles};

use c7data::MapError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type returned by [`Civ3Reader`] implementations.
pub type ReaderError = Box<dyn std::error::Error + Send + Sync>;

/// Parses raw Civ3 files into typed records.
pub trait Civ3Reader {
    /// Parse a scenario (`.biq`, `.bic`, `.bix`).
    fn read_biq(&self, bytes: &[u8]) -> Result<biq::BiqData, ReaderError>;

    /// Parse a save game. `default_bic` supplies any scenario sections the
    /// save does not carry itself.
    fn read_sav(&self, save: &[u8], default_bic: &[u8]) -> Result<sav::SavData, ReaderError>;
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Reader {
        path: PathBuf,
        #[source]
        source: ReaderError,
    },
    #[error("Tile {tile} references terrain {id}, but there are only {count} terrain types")]
    TerrainOutOfRange { tile: usize, id: i32, count: usize },
    #[error("Tile {tile} references unknown resource {id}")]
    UnknownResource { tile: usize, id: i32 },
    #[error("Map size is unknown, cannot place {tiles} tiles")]
    DimensionsUnresolved { tiles: usize },
    #[error("Invalid map size {width}x{height} (width must be even and positive)")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Tile {tile} at ({x}, {y}) lies outside the {width}x{height} map")]
    TileOutOfBounds {
        tile: usize,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error(transparent)]
    Map(#[from] MapError),
}
