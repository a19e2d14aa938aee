use c7data::UnitPrototype;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingPrototype {
    pub name: String,
    pub shield_cost: i32,
}

/// Anything a city can put in its production queue.
#[derive(Debug, Clone)]
pub enum Producible {
    Unit(Arc<UnitPrototype>),
    Building(BuildingPrototype),
}

impl Producible {
    pub fn name(&self) -> &str {
        match self {
            Producible::Unit(unit) => &unit.name,
            Producible::Building(building) => &building.name,
        }
    }

    pub fn shield_cost(&self) -> i32 {
        match self {
            Producible::Unit(unit) => unit.shield_cost,
            Producible::Building(building) => building.shield_cost,
        }
    }

    pub fn population_cost(&self) -> i32 {
        match self {
            Producible::Unit(unit) => unit.population_cost,
            Producible::Building(_) => 0,
        }
    }

    pub fn has_category(&self, category: &str) -> bool {
        match self {
            Producible::Unit(unit) => unit.has_category(category),
            Producible::Building(_) => false,
        }
    }
}

impl fmt::Display for Producible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Arc<UnitPrototype>> for Producible {
    fn from(unit: Arc<UnitPrototype>) -> Self {
        Producible::Unit(unit)
    }
}

impl From<BuildingPrototype> for Producible {
    fn from(building: BuildingPrototype) -> Self {
        Producible::Building(building)
    }
}
