//! Strategic priorities nudge production scores.
//!
//! A player holds an ordered list of priorities. The first one counts in
//! full, the second at half strength, the third at a quarter and so on.

use crate::producible::Producible;
use std::fmt;

pub trait StrategicPriority: fmt::Debug {
    /// Added to an item's base score.
    fn flat_adjuster(&self, item: &Producible) -> f32;

    /// Multiplier applied as `score += weight * score`.
    fn preference_weight(&self, item: &Producible) -> f32;
}

/// Favors units that carry a given category, e.g. "Sea" for an island
/// empire or "Land" for a war footing.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPriority {
    pub category: String,
    pub flat_bonus: f32,
    pub preference: f32,
}

impl CategoryPriority {
    pub fn new(category: impl Into<String>, flat_bonus: f32, preference: f32) -> Self {
        Self {
            category: category.into(),
            flat_bonus,
            preference,
        }
    }
}

impl StrategicPriority for CategoryPriority {
    fn flat_adjuster(&self, item: &Producible) -> f32 {
        if item.has_category(&self.category) {
            self.flat_bonus
        } else {
            0.0
        }
    }

    fn preference_weight(&self, item: &Producible) -> f32 {
        if item.has_category(&self.category) {
            self.preference
        } else {
            0.0
        }
    }
}

/// Sum of the priorities' flat adjusters, halving the multiplier at each step.
pub fn priority_flat_adjusters(
    priorities: &[Box<dyn StrategicPriority>],
    item: &Producible,
) -> f32 {
    let mut total = 0.0;
    let mut multiplier = 1.0;
    for priority in priorities {
        let adjuster = priority.flat_adjuster(item);
        log::trace!(
            "  {:?} adjusts {} by {}",
            priority,
            item,
            adjuster * multiplier
        );
        total += adjuster * multiplier;
        multiplier /= 2.0;
    }
    total
}

/// Applies each priority's preference weight in turn, halving the
/// multiplier at each step.
pub fn adjust_score_by_priorities(
    priorities: &[Box<dyn StrategicPriority>],
    item: &Producible,
    score: f32,
) -> f32 {
    let mut score = score;
    let mut multiplier = 1.0;
    for priority in priorities {
        let weight = priority.preference_weight(item);
        score += weight * multiplier * score;
        multiplier /= 2.0;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use c7data::UnitPrototype;
    use std::sync::Arc;

    fn galley() -> Producible {
        Producible::Unit(Arc::new(UnitPrototype {
            name: "Galley".into(),
            attack: 1,
            defense: 1,
            bombard: 0,
            movement: 3,
            shield_cost: 30,
            population_cost: 0,
            categories: vec!["Sea".into()],
        }))
    }

    fn priorities() -> Vec<Box<dyn StrategicPriority>> {
        vec![
            Box::new(CategoryPriority::new("Sea", 8.0, 1.0)),
            Box::new(CategoryPriority::new("Sea", 8.0, 1.0)),
            Box::new(CategoryPriority::new("Land", 100.0, 5.0)),
            Box::new(CategoryPriority::new("Sea", 8.0, 1.0)),
        ]
    }

    #[test]
    fn test_flat_adjusters_halve() {
        // 8 + 4 + 0 + 1
        assert_eq!(priority_flat_adjusters(&priorities(), &galley()), 13.0);
        assert_eq!(priority_flat_adjusters(&[], &galley()), 0.0);
    }

    #[test]
    fn test_preference_weights_compound() {
        // 10 -> 20 -> 30 -> 30 -> 33.75
        assert_eq!(adjust_score_by_priorities(&priorities(), &galley(), 10.0), 33.75);
        assert_eq!(adjust_score_by_priorities(&[], &galley(), 10.0), 10.0);
    }
}
