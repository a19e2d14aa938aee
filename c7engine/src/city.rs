use crate::producible::Producible;
use c7data::GameData;

/// The slice of city state the production AI looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub size: i32,
    /// Index of the city's tile in the map.
    pub location: usize,
    pub food_stored: i32,
    pub food_needed_to_grow: i32,
    pub food_surplus: i32,
    pub shields_stored: i32,
    pub shields_per_turn: i32,
}

impl City {
    pub fn new(name: impl Into<String>, location: usize) -> Self {
        Self {
            name: name.into(),
            size: 1,
            location,
            food_stored: 0,
            food_needed_to_grow: 20,
            food_surplus: 2,
            shields_stored: 0,
            shields_per_turn: 2,
        }
    }

    /// Turns until the next size increase, `i32::MAX` if the city is not
    /// growing.
    pub fn turns_until_growth(&self) -> i32 {
        turns_to_fill(self.food_needed_to_grow - self.food_stored, self.food_surplus)
    }

    /// Turns to finish `item` from the current shield box, `i32::MAX` if the
    /// city makes no shields.
    pub fn turns_to_produce(&self, item: &Producible) -> i32 {
        turns_to_fill(item.shield_cost() - self.shields_stored, self.shields_per_turn)
    }

    /// Every unit type in the rule set, in rule-set order.
    pub fn production_options(&self, game: &GameData) -> Vec<Producible> {
        game.unit_prototypes
            .values()
            .cloned()
            .map(Producible::Unit)
            .collect()
    }
}

fn turns_to_fill(remaining: i32, per_turn: i32) -> i32 {
    if remaining <= 0 {
        return 0;
    }
    if per_turn <= 0 {
        return i32::MAX;
    }
    (remaining + per_turn - 1) / per_turn
}
