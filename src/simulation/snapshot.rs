//! Immutable views of the ecosystem for observers on other threads.
//!
//! The simulation thread builds a snapshot between ticks and publishes it
//! through a [`SnapshotSlot`]. Readers get an `Arc` to a finished snapshot and
//! never see a half-updated world.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::dna::DnaId;
use super::events::Thing;
use super::geometric_utils::Vector;
use super::locatable::EntityId;

/// An organ as drawn on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganView {
    /// Point attached to the parent.
    pub start: Vector,
    /// Free end.
    pub end: Vector,
    /// Current thickness.
    pub thickness: f64,
    /// Color hue.
    pub hue: u8,
}

/// A creature at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarjilloView {
    /// Entity id.
    pub id: EntityId,
    /// Genome id.
    pub dna_id: DnaId,
    /// Head position.
    pub position: Vector,
    /// Current energy.
    pub energy: f64,
    /// Ticks lived.
    pub age: u64,
    /// Whether the creature is in agony.
    pub in_pain: bool,
    /// Organs, head first.
    pub organs: Vec<OrganView>,
}

/// An egg at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggView {
    /// Entity id.
    pub id: EntityId,
    /// Position.
    pub position: Vector,
    /// Fading after hatching, from 0 to 1.
    pub fading: f64,
    /// Whether the egg has hatched.
    pub hatched: bool,
}

/// The whole world at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcosystemSnapshot {
    /// Ticks elapsed when the snapshot was taken.
    pub tick: u64,
    /// Side of the world.
    pub size: f64,
    /// Creatures.
    pub narjillos: Vec<NarjilloView>,
    /// Eggs.
    pub eggs: Vec<EggView>,
    /// Food pieces.
    pub food: Vec<Thing>,
}

/// Latest published snapshot, shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSlot {
    latest: Arc<RwLock<Option<Arc<EcosystemSnapshot>>>>,
}

impl SnapshotSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published snapshot.
    pub fn publish(&self, snapshot: EcosystemSnapshot) {
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(snapshot));
    }

    /// The most recent snapshot, if any was published.
    pub fn latest(&self) -> Option<Arc<EcosystemSnapshot>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
