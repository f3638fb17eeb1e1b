//! Creatures ("narjillos"): a body, an energy reserve and a target.
//!
//! A creature swims towards its target, pays for every movement with energy,
//! eats whatever food its path crosses, and lays mutated eggs once mature.
//! When its energy runs out it dies and never comes back.

use std::f64::consts::TAU;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::body::mouth::Mouth;
use super::dna::Dna;
use super::egg::Egg;
use super::embryogenesis::Embryo;
use super::energy::Energy;
use super::gene_pool::GenePool;
use super::geometric_utils::{Segment, Vector};
use super::locatable::{EntityId, Locatable, ThingKind};
use super::params::Params;

/// Where a creature is heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A specific food piece.
    Food {
        /// Id of the food piece.
        id: EntityId,
        /// Position of the food piece.
        position: Vector,
    },
    /// A bare location, used when there is no food.
    Location(Vector),
}

impl Target {
    /// Position to swim towards.
    pub fn position(&self) -> Vector {
        match self {
            Self::Food { position, .. } | Self::Location(position) => *position,
        }
    }

    /// The targeted food piece, if any.
    pub fn food_id(&self) -> Option<EntityId> {
        match self {
            Self::Food { id, .. } => Some(*id),
            Self::Location(_) => None,
        }
    }
}

/// A living (or dead) creature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    dna: Arc<Dna>,
    body: Body,
    energy: Energy,
    mouth: Mouth,
    target: Target,
    age: u64,
    next_egg_age: u64,
    in_pain: bool,
}

impl Creature {
    /// Develops `dna` into a newborn creature.
    ///
    /// # Arguments
    ///
    /// * `dna` - Genome of the creature
    /// * `position` - Where the head starts
    /// * `heading` - Initial direction in radians
    /// * `energy` - Initial energy reserve
    /// * `params` - Physical constants
    pub fn new(
        dna: Arc<Dna>,
        position: Vector,
        heading: f64,
        energy: Energy,
        params: &Params,
    ) -> Self {
        let mut body = Embryo::new(&dna).develop(params);
        body.force_position(position, heading);
        let next_egg_age = body.egg_interval();
        Self {
            dna,
            body,
            energy,
            mouth: Mouth::new(heading),
            target: Target::Location(position),
            age: 0,
            next_egg_age,
            in_pain: false,
        }
    }

    /// Genome of the creature.
    pub fn dna(&self) -> &Arc<Dna> {
        &self.dna
    }

    /// The body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Mutable access to the body.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Energy reserve.
    pub fn energy(&self) -> &Energy {
        &self.energy
    }

    /// Direction the creature wants to swim in.
    pub fn mouth(&self) -> &Mouth {
        &self.mouth
    }

    /// Current target.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Sets the target to swim towards.
    pub fn set_target(&mut self, target: Target) {
        self.target = target;
    }

    /// Ticks lived so far.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Age at which the next egg may be laid.
    pub fn next_egg_age(&self) -> u64 {
        self.next_egg_age
    }

    /// Returns `true` while the energy is at or below the agony level.
    pub fn is_in_pain(&self) -> bool {
        self.in_pain
    }

    /// Returns `true` once the energy is exhausted.
    pub fn is_dead(&self) -> bool {
        self.energy.is_zero()
    }

    /// Kills the creature.
    pub fn kill(&mut self) {
        self.energy.deplete();
    }

    /// Adds energy from food. Dead creatures cannot be fed.
    pub fn feed(&mut self, amount: f64) {
        self.energy.increase_by(amount);
    }

    /// Advances the creature by one tick.
    ///
    /// # Returns
    ///
    /// The movement of the head during this tick. Dead creatures do not move.
    pub fn tick(&mut self, params: &Params) -> Segment {
        self.in_pain = false;
        self.age += 1;
        let start = self.body.position();
        if self.is_dead() {
            return Segment::new(start, Vector::ZERO);
        }

        let agony_level = self.energy.decay() * params.agony_factor;
        let pain_bend = if self.energy.value() <= agony_level {
            self.in_pain = true;
            (agony_level - self.energy.value()) / agony_level
                * params.max_pain_bend_degrees.to_radians()
        } else {
            0.0
        };

        self.mouth.tick(
            start,
            self.target.position(),
            params.mouth_turn_rate_degrees.to_radians(),
        );
        let effort = self.body.tick(self.mouth.direction(), pain_bend, params);
        self.energy.tick(effort);

        Segment::between(start, self.body.position())
    }

    /// Lays an egg if the creature is old enough and can afford it.
    ///
    /// The egg carries a mutated copy of the genome, registered in
    /// `gene_pool`, and the child energy, which is deducted from the parent.
    /// A creature that is not yet mature postpones its next opportunity.
    ///
    /// # Returns
    ///
    /// The new egg, thrown from the neck in a random direction, or `None`.
    pub fn lay_egg(
        &mut self,
        gene_pool: &mut GenePool,
        params: &Params,
        rng: &mut impl Rng,
    ) -> Option<Egg> {
        if self.is_dead() || self.age < self.next_egg_age {
            return None;
        }
        if self.age < params.creature_mature_age {
            self.next_egg_age = self.age + self.body.egg_interval();
            return None;
        }

        let energy_to_child = self.body.energy_to_children();
        let energy_to_egg = (self.body.egg_velocity() * params.egg_mass).powi(2);
        if self.energy.value() < energy_to_child + energy_to_egg {
            return None;
        }

        self.energy.decrease_by(energy_to_child);
        self.next_egg_age = self.age + self.body.egg_interval();
        let child = gene_pool.mutate_dna(&self.dna, params, rng);
        let velocity = Vector::polar(rng.random::<f64>() * TAU, self.body.egg_velocity());
        Some(Egg::new(
            child,
            self.body.neck_location(),
            velocity,
            energy_to_child,
            params,
            rng,
        ))
    }
}

impl Locatable for Creature {
    fn position(&self) -> Vector {
        self.body.position()
    }

    fn kind(&self) -> ThingKind {
        ThingKind::Narjillo
    }
}
