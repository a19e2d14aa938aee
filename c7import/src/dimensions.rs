use crate::biq::BiqData;
use crate::sav::Wrld;
use c7data::MapDimensions;

/// Picks the map size for an import.
///
/// The live `WRLD` header of a save in progress wins when it carries a
/// positive size; otherwise the scenario's first `WMAP` record is used.
pub fn resolve_map_dimensions(live: Option<&Wrld>, scenario: &BiqData) -> Option<MapDimensions> {
    if let Some(wrld) = live {
        if wrld.width > 0 && wrld.height > 0 {
            log::debug!("Map size {}x{} from save", wrld.width, wrld.height);
            return Some(MapDimensions::new(wrld.width, wrld.height));
        }
    }
    let wmap = scenario.wmap.first()?;
    if wmap.width > 0 && wmap.height > 0 {
        log::debug!("Map size {}x{} from scenario", wmap.width, wmap.height);
        Some(MapDimensions::new(wmap.width, wmap.height))
    } else {
        None
    }
}
