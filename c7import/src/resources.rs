use crate::biq::Good;
use c7data::{Resource, ResourceCategory};
use std::collections::HashMap;
use std::sync::Arc;

/// Imported resources plus the Civ3 index lookup tiles resolve against.
#[derive(Debug, Clone)]
pub struct ResourceImport {
    pub resources: Vec<Arc<Resource>>,
    /// Civ3 resource index → resource. `-1` maps to the NONE sentinel.
    pub by_index: HashMap<i32, Arc<Resource>>,
}

impl ResourceImport {
    pub fn get(&self, civ3_index: i32) -> Option<&Arc<Resource>> {
        self.by_index.get(&civ3_index)
    }
}

/// One resource per `GOOD` record, indexed densely in record order.
///
/// An unknown category code is not fatal: the resource is imported with
/// [`ResourceCategory::None`] and a warning is logged.
pub fn import_resources(goods: &[Good]) -> ResourceImport {
    let mut by_index = HashMap::with_capacity(goods.len() + 1);
    by_index.insert(-1, Arc::new(Resource::none()));

    let mut resources = Vec::with_capacity(goods.len());
    for (index, good) in goods.iter().enumerate() {
        let index = index as i32;
        let category = ResourceCategory::from_civ3_code(good.good_type).unwrap_or_else(|| {
            log::warn!(
                "Unknown resource category {} for {:?}, using NONE",
                good.good_type,
                good.name
            );
            ResourceCategory::None
        });
        let resource = Arc::new(Resource {
            key: good.name.clone(),
            index,
            name: good.name.clone(),
            icon: good.icon,
            category,
            food_bonus: good.food_bonus,
            shields_bonus: good.shields_bonus,
            commerce_bonus: good.commerce_bonus,
            appearance_ratio: good.appearance_ratio,
            disappearance_ratio: good.disappearance_probability,
            civilopedia_entry: good.civilopedia_entry.clone(),
        });
        by_index.insert(index, Arc::clone(&resource));
        resources.push(resource);
    }

    log::debug!("Imported {} resources", resources.len());
    ResourceImport {
        resources,
        by_index,
    }
}
