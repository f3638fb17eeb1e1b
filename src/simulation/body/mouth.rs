//! Steering towards the current target.

use serde::{Deserialize, Serialize};

use crate::simulation::geometric_utils::Vector;

/// The direction a creature wants to swim in.
///
/// The mouth turns towards the target by a bounded angle per tick, so a
/// creature cannot change course instantly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mouth {
    direction: Vector,
}

impl Mouth {
    /// Creates a mouth pointing at `angle` radians.
    pub fn new(angle: f64) -> Self {
        Self {
            direction: Vector::polar(angle, 1.0),
        }
    }

    /// Unit vector of the wanted swimming direction.
    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Turns towards `target` by at most `max_turn` radians.
    ///
    /// Nothing changes when the creature already sits on its target.
    pub fn tick(&mut self, position: Vector, target: Vector, max_turn: f64) {
        let desired = target - position;
        if desired.length() < f64::EPSILON {
            return;
        }
        let turn = self.direction.angle_to(desired).clamp(-max_turn, max_turn);
        self.direction = self.direction.rotate_by(turn).normalize(1.0);
    }
}
