//! Picks the next item for a city to build.

use crate::city::City;
use crate::priority::{StrategicPriority, adjust_score_by_priorities, priority_flat_adjusters};
use crate::producible::Producible;
use c7data::GameMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How adjusted scores become selection weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Every positive score is equally likely.
    Flat,
    Linear,
    #[default]
    Quadratic,
    Cubic,
}

impl Weighting {
    pub fn apply(self, weight: f64) -> f64 {
        match self {
            Weighting::Flat => 1.0,
            Weighting::Linear => weight,
            Weighting::Quadratic => weight * weight,
            Weighting::Cubic => weight * weight * weight,
        }
    }
}

/// Production AI tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductionConfig {
    pub weighting: Weighting,
    /// Units with this category are never built in a city with no adjacent
    /// water.
    pub sea_category: String,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            weighting: Weighting::Quadratic,
            sea_category: "Sea".to_string(),
        }
    }
}

/// Base desirability of an item before any city or strategy adjustments.
///
/// Units score ten per point of attack and defense, plus half that again
/// for each movement point past the first, minus their shield cost, minus
/// ten per population point, plus five per point of bombard. Buildings
/// score zero for now.
pub fn item_score(item: &Producible) -> f32 {
    match item {
        Producible::Unit(unit) => {
            let mut score = 10.0 * unit.attack as f32 + 10.0 * unit.defense as f32;
            if unit.movement > 1 {
                score += score / 2.0 * (unit.movement - 1) as f32;
            }
            score -= unit.shield_cost as f32;
            score -= 10.0 * unit.population_cost as f32;
            score += 5.0 * unit.bombard as f32;
            score
        }
        Producible::Building(_) => 0.0,
    }
}

/// Zeroes items the city cannot afford in population.
///
/// An item costing more than the city's size scores zero. One costing the
/// whole city scores zero if the city will not grow before it is finished,
/// and half otherwise. Smaller population costs are already part of the
/// base score.
pub fn adjust_score_by_pop_cost(city: &City, item: &Producible, score: f32) -> f32 {
    let pop_cost = item.population_cost();
    if pop_cost <= 0 {
        return score;
    }
    if pop_cost > city.size {
        return 0.0;
    }
    if pop_cost == city.size {
        if city.turns_until_growth() > city.turns_to_produce(item) {
            return 0.0;
        }
        return score / 2.0;
    }
    score
}

/// Draws one item with probability proportional to its curved weight.
///
/// Weights at or below zero never win. When no weight is positive the first
/// item is returned. `None` only for an empty slice.
pub fn choose_weighted<'a, T: fmt::Display, R: Rng>(
    items: &'a [T],
    weights: &[f32],
    weighting: Weighting,
    rng: &mut R,
) -> Option<&'a T> {
    debug_assert_eq!(items.len(), weights.len());

    let mut total = 0.0;
    let mut cutoffs = Vec::with_capacity(weights.len());
    for (item, &weight) in items.iter().zip(weights) {
        let adjusted = if weight > 0.0 {
            weighting.apply(f64::from(weight))
        } else {
            0.0
        };
        let previous = total;
        total += adjusted;
        log::trace!("{} has range {} to {}", item, previous, total);
        cutoffs.push(total);
    }

    let roll = total * rng.gen::<f64>();
    log::trace!("Rolled {} out of {}", roll, total);
    for (item, cutoff) in items.iter().zip(cutoffs) {
        if roll < cutoff {
            log::debug!("Chose {}", item);
            return Some(item);
        }
    }
    items.first()
}

/// Scores every option for `city` and draws one.
///
/// Returns `None` only when there are no options.
pub fn next_item_to_produce<R: Rng>(
    city: &City,
    options: &[Producible],
    map: &GameMap,
    priorities: &[Box<dyn StrategicPriority>],
    config: &ProductionConfig,
    rng: &mut R,
) -> Option<Producible> {
    log::info!("Choosing what to produce next in {}", city.name);
    let coastal = map.neighbors_water(city.location);

    let weights: Vec<f32> = options
        .iter()
        .map(|item| {
            let base = item_score(item);
            let mut score = base + priority_flat_adjusters(priorities, item);
            log::debug!(" {} scores {} ({} before priorities)", item, score, base);

            if !coastal && item.has_category(&config.sea_category) {
                score = 0.0;
            }

            let score = adjust_score_by_pop_cost(city, item, score);
            let score = adjust_score_by_priorities(priorities, item, score);
            log::debug!(" {} adjusted to {}", item, score);
            score
        })
        .collect();

    choose_weighted(options, &weights, config.weighting, rng).cloned()
}
