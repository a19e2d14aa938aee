//! C7 engine rules.
//!
//! Currently this holds the AI's city production choice: every producible
//! option is scored, the scores are adjusted by population cost and the
//! owner's strategic priorities, and one option is drawn at random in
//! proportion to its (curved) weight.
//!
//! # Determinism
//!
//! Nothing here owns an RNG. Callers pass one in, so a seeded
//! [`rand::rngs::StdRng`] reproduces the same choices for replays and tests.

pub mod city;
pub mod priority;
pub mod producible;
pub mod production;

pub use city::City;
pub use priority::{CategoryPriority, StrategicPriority};
pub use producible::{BuildingPrototype, Producible};
pub use production::{
    ProductionConfig, Weighting, choose_weighted, item_score, next_item_to_produce,
};
