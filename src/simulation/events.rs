//! Notifications about things entering and leaving the ecosystem.
//!
//! Listeners are called synchronously, on the simulation thread, during the
//! tick that causes the change. A listener that needs to hand events to
//! another thread can use the [`Sender`] implementation.

use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::geometric_utils::Vector;
use super::locatable::{EntityId, Locatable, ThingKind};

/// A thing as seen by listeners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    /// Id of the thing in its ecosystem.
    pub id: EntityId,
    /// What kind of thing it is.
    pub kind: ThingKind,
    /// Where it was when the event fired.
    pub position: Vector,
}

impl Thing {
    /// Describes a locatable entity.
    pub fn new(id: EntityId, entity: &impl Locatable) -> Self {
        Self {
            id,
            kind: entity.kind(),
            position: entity.position(),
        }
    }
}

/// A change in the set of things.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EcosystemEvent {
    /// A thing entered the ecosystem.
    Added(Thing),
    /// A thing left the ecosystem.
    Removed(Thing),
}

/// Receives ecosystem changes.
pub trait EcosystemListener: Send {
    /// Called after a thing is added.
    fn thing_added(&mut self, thing: &Thing);

    /// Called after a thing is removed.
    fn thing_removed(&mut self, thing: &Thing);
}

impl EcosystemListener for Sender<EcosystemEvent> {
    fn thing_added(&mut self, thing: &Thing) {
        // a dropped receiver just stops listening
        let _ = self.send(EcosystemEvent::Added(*thing));
    }

    fn thing_removed(&mut self, thing: &Thing) {
        let _ = self.send(EcosystemEvent::Removed(*thing));
    }
}

/// Live count of things by kind.
///
/// Clones share the same counts, so one clone can be registered as a
/// listener while another is read.
#[derive(Debug, Clone, Default)]
pub struct ThingsCounter {
    counts: Arc<Mutex<BTreeMap<ThingKind, u64>>>,
}

impl ThingsCounter {
    /// Creates a counter with all counts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live things of `kind`.
    pub fn count(&self, kind: ThingKind) -> u64 {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
            .copied()
            .unwrap_or(0)
    }

    fn update(&self, kind: ThingKind, change: impl FnOnce(u64) -> u64) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        let count = counts.entry(kind).or_insert(0);
        *count = change(*count);
    }
}

impl EcosystemListener for ThingsCounter {
    fn thing_added(&mut self, thing: &Thing) {
        self.update(thing.kind, |count| count + 1);
    }

    fn thing_removed(&mut self, thing: &Thing) {
        self.update(thing.kind, |count| count.saturating_sub(1));
    }
}
