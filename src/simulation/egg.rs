//! Eggs: a genome waiting to hatch.

use std::f64::consts::TAU;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::creature::Creature;
use super::dna::Dna;
use super::energy::Energy;
use super::geometric_utils::Vector;
use super::locatable::{EntityId, Locatable, ThingKind};
use super::params::Params;

/// An egg drifting until it hatches, then fading away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    dna: Arc<Dna>,
    position: Vector,
    velocity: Vector,
    velocity_decay: f64,
    energy: f64,
    incubation_time: u64,
    age: u64,
    hatchling: Option<EntityId>,
    decay: u32,
    fading_ticks: u32,
}

impl Egg {
    /// Creates an egg with a random incubation time.
    ///
    /// # Arguments
    ///
    /// * `dna` - Genome of the future creature
    /// * `position` - Where the egg is laid
    /// * `velocity` - Initial drift
    /// * `energy` - Energy handed to the hatchling
    /// * `params` - Incubation and fading constants
    /// * `rng` - Random source for the incubation time
    pub fn new(
        dna: Arc<Dna>,
        position: Vector,
        velocity: Vector,
        energy: f64,
        params: &Params,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            dna,
            position,
            velocity,
            velocity_decay: params.egg_velocity_decay,
            energy,
            incubation_time: rng.random_range(params.egg_min_incubation..=params.egg_max_incubation),
            age: 0,
            hatchling: None,
            decay: 0,
            fading_ticks: params.egg_fading_ticks,
        }
    }

    /// Genome of the future creature.
    pub fn dna(&self) -> &Arc<Dna> {
        &self.dna
    }

    /// Energy still stored in the egg.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Ticks the egg needs before it can hatch.
    pub fn incubation_time(&self) -> u64 {
        self.incubation_time
    }

    /// Ticks since the egg was laid, up to hatching.
    pub fn age(&self) -> u64 {
        self.age
    }

    /// Current drift.
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// The creature that hatched from this egg.
    pub fn hatchling(&self) -> Option<EntityId> {
        self.hatchling
    }

    /// Returns `true` once the egg has hatched.
    pub fn is_hatched(&self) -> bool {
        self.hatchling.is_some()
    }

    /// Returns `true` if the egg is unhatched and done incubating.
    pub fn is_ripe(&self) -> bool {
        !self.is_hatched() && self.age >= self.incubation_time
    }

    /// Fading of a hatched egg, from `0.0` to `1.0`.
    pub fn fading(&self) -> f64 {
        f64::from(self.decay) / f64::from(self.fading_ticks)
    }

    /// Returns `true` once a hatched egg has completely faded.
    pub fn is_dead(&self) -> bool {
        self.decay >= self.fading_ticks
    }

    /// Advances the egg by one tick.
    ///
    /// An unhatched egg ages and drifts, slowing down. A hatched egg fades.
    pub fn tick(&mut self) {
        if self.is_hatched() {
            if self.decay < self.fading_ticks {
                self.decay += 1;
            }
            return;
        }
        self.age += 1;
        self.position += self.velocity;
        self.velocity = self.velocity * self.velocity_decay;
    }

    /// Hatches the egg if it is ripe.
    ///
    /// The hatchling gets all the egg's energy, a random heading, and the
    /// egg's genome. An egg hatches at most once.
    ///
    /// # Arguments
    ///
    /// * `creature_id` - Id the ecosystem gives the hatchling
    /// * `params` - Physical constants
    /// * `rng` - Random source for the heading
    ///
    /// # Returns
    ///
    /// The newborn creature, or `None` if the egg is not ripe or already hatched.
    pub fn hatch(
        &mut self,
        creature_id: EntityId,
        params: &Params,
        rng: &mut impl Rng,
    ) -> Option<Creature> {
        if !self.is_ripe() {
            return None;
        }
        let energy = Energy::new(
            self.energy,
            params.creature_max_energy,
            params.creature_lifespan,
        );
        self.energy = 0.0;
        self.hatchling = Some(creature_id);
        Some(Creature::new(
            Arc::clone(&self.dna),
            self.position,
            rng.random::<f64>() * TAU,
            energy,
            params,
        ))
    }
}

impl Locatable for Egg {
    fn position(&self) -> Vector {
        self.position
    }

    fn kind(&self) -> ThingKind {
        ThingKind::Egg
    }
}
