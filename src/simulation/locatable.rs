//! Common interface of everything that lives somewhere in the world.

use serde::{Deserialize, Serialize};

use super::geometric_utils::Vector;

/// Identifier of a creature, egg or food piece, unique within an ecosystem.
pub type EntityId = u64;

/// The kinds of things an ecosystem contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThingKind {
    /// A living creature.
    Narjillo,
    /// An egg, incubating or fading after hatching.
    Egg,
    /// A piece of food.
    FoodPiece,
}

/// Trait for entities with a position in the world.
pub trait Locatable {
    /// Current position.
    fn position(&self) -> Vector;

    /// What kind of thing this is.
    fn kind(&self) -> ThingKind;
}
