//! Food pieces that creatures consume.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::Vector;
use super::locatable::{Locatable, ThingKind};

/// A motionless piece of food.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodPiece {
    position: Vector,
}

impl FoodPiece {
    /// Creates a food piece at `position`.
    pub fn new(position: Vector) -> Self {
        Self { position }
    }

    /// Creates a food piece at a random position inside a square world.
    ///
    /// # Arguments
    ///
    /// * `world_size` - Side of the world
    /// * `rng` - Random source
    pub fn new_random(world_size: f64, rng: &mut impl Rng) -> Self {
        Self::new(Vector::cartesian(
            rng.random::<f64>() * world_size,
            rng.random::<f64>() * world_size,
        ))
    }
}

impl Locatable for FoodPiece {
    fn position(&self) -> Vector {
        self.position
    }

    fn kind(&self) -> ThingKind {
        ThingKind::FoodPiece
    }
}
