//! Typed records of a Civ3 scenario (`.biq`/`.bic`) as handed over by a
//! [`Civ3Reader`](crate::Civ3Reader).

/// `TERR`: a terrain kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Terr {
    pub name: String,
    pub civilopedia_entry: String,
    pub food: i32,
    pub shields: i32,
    pub commerce: i32,
    pub movement_cost: i32,
    pub allow_cities: bool,
}

/// `GOOD`: a resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Good {
    pub name: String,
    pub civilopedia_entry: String,
    /// 0 = bonus, 1 = luxury, 2 = strategic.
    pub good_type: i32,
    pub appearance_ratio: i32,
    pub disappearance_probability: i32,
    pub icon: i32,
    pub food_bonus: i32,
    pub shields_bonus: i32,
    pub commerce_bonus: i32,
}

/// `WMAP`: world map header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wmap {
    pub width: i32,
    pub height: i32,
}

/// `TILE` as stored in a scenario.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tile {
    pub base_terrain: i32,
    pub overlay_terrain: i32,
    /// Index into the `GOOD` list, -1 for none.
    pub resource: i32,
    pub texture_file: i32,
    pub texture_location: i32,
    pub snow_capped_mountain: bool,
    pub pine_forest: bool,
    pub river_connection_northeast: bool,
    pub river_connection_southeast: bool,
    pub river_connection_southwest: bool,
    pub river_connection_northwest: bool,
}

/// A parsed scenario.
#[derive(Debug, Clone, Default)]
pub struct BiqData {
    pub terr: Vec<Terr>,
    pub good: Vec<Good>,
    /// Usually exactly one; absent in rules-only files.
    pub wmap: Vec<Wmap>,
    pub tile: Vec<Tile>,
}
