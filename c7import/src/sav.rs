//! Typed records of a Civ3 save game (`.sav`).

use crate::biq::BiqData;

/// `WRLD`: live world header of a game in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wrld {
    pub width: i32,
    pub height: i32,
}

/// `TILE` as stored in a save; may differ from the scenario tile it started as.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tile {
    pub base_terrain: i32,
    pub overlay_terrain: i32,
    /// Index into the `GOOD` list, -1 for none.
    pub resource_id: i32,
    pub texture_file: i32,
    pub texture_location: i32,
    pub snow_capped: bool,
    pub pine_forest: bool,
    pub river_northeast: bool,
    pub river_southeast: bool,
    pub river_southwest: bool,
    pub river_northwest: bool,
}

/// A parsed save game.
#[derive(Debug, Clone, Default)]
pub struct SavData {
    /// Rule set and scenario sections, taken from the save or, where the save
    /// omits them, from the default scenario.
    pub bic: BiqData,
    pub wrld: Wrld,
    pub tile: Vec<Tile>,
}
