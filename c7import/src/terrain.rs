use crate::biq::Terr;
use c7data::TerrainType;
use std::sync::Arc;

/// One terrain type per `TERR` record, in record order. The record's position
/// becomes its Civ3 index, which tiles refer to.
pub fn import_terrain_types(records: &[Terr]) -> Vec<Arc<TerrainType>> {
    let terrain_types: Vec<Arc<TerrainType>> = records
        .iter()
        .enumerate()
        .map(|(index, terr)| Arc::new(terrain_from_civ3(index as i32, terr)))
        .collect();
    log::debug!("Imported {} terrain types", terrain_types.len());
    terrain_types
}

fn terrain_from_civ3(civ3_index: i32, terr: &Terr) -> TerrainType {
    TerrainType {
        key: terr.name.clone(),
        display_name: terr.name.clone(),
        civ3_index,
        base_food_production: terr.food,
        base_shield_production: terr.shields,
        base_commerce_production: terr.commerce,
        movement_cost: terr.movement_cost,
        allow_cities: terr.allow_cities,
    }
}
