//! Energy bookkeeping of a creature.

use serde::{Deserialize, Serialize};

/// Energy with an age-dependent ceiling.
///
/// The ceiling starts at the maximum energy and shrinks by a fixed decay each
/// tick, so every creature eventually dies of old age. Once the energy hits
/// zero it stays there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Energy {
    value: f64,
    max_for_age: f64,
    decay: f64,
}

impl Energy {
    /// Creates an energy reserve.
    ///
    /// # Arguments
    ///
    /// * `initial` - Starting energy, capped by `max`
    /// * `max` - Ceiling at birth
    /// * `lifespan` - Ticks it takes the ceiling to reach zero
    pub fn new(initial: f64, max: f64, lifespan: f64) -> Self {
        Self {
            value: initial.clamp(0.0, max),
            max_for_age: max,
            decay: max / lifespan,
        }
    }

    /// Current energy.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current ceiling.
    pub fn max_for_age(&self) -> f64 {
        self.max_for_age
    }

    /// Energy lost every tick just by living.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Returns `true` once the energy is exhausted.
    pub fn is_zero(&self) -> bool {
        self.value <= 0.0
    }

    /// Ages the reserve by one tick and pays `consumption`.
    pub fn tick(&mut self, consumption: f64) {
        if self.is_zero() {
            return;
        }
        self.max_for_age = (self.max_for_age - self.decay).max(0.0);
        self.value = (self.value - self.decay - consumption).clamp(0.0, self.max_for_age);
    }

    /// Adds energy up to the current ceiling. A depleted reserve stays depleted.
    pub fn increase_by(&mut self, amount: f64) {
        if self.is_zero() {
            return;
        }
        self.value = (self.value + amount).clamp(0.0, self.max_for_age);
    }

    /// Removes energy, never below zero.
    pub fn decrease_by(&mut self, amount: f64) {
        self.value = (self.value - amount).max(0.0);
    }

    /// Drops the energy to zero for good.
    pub fn deplete(&mut self) {
        self.value = 0.0;
    }
}
