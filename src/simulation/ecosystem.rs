//! The world: creatures, eggs and food in a square space.
//!
//! The ecosystem owns every entity, the gene pool and the random generator.
//! A tick runs in phases:
//! - Spontaneous food spawning
//! - Parallel creature physics using rayon
//! - Sequential food collisions, where the first creature to reach a piece eats it
//! - Egg laying, egg incubation and hatching
//! - Removal of dead creatures and faded eggs
//!
//! Everything but the creature physics runs on the calling thread in id
//! order, so a run is fully determined by its seed.

use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::sync::Arc;

use log::{debug, info, trace, warn};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::creature::{Creature, Target};
use super::dna::{Dna, DnaError, DnaId};
use super::egg::Egg;
use super::energy::Energy;
use super::events::{EcosystemListener, Thing};
use super::food::FoodPiece;
use super::gene_pool::{GenePool, GenePoolError};
use super::geometric_utils::{Segment, Vector};
use super::locatable::{EntityId, Locatable};
use super::params::{Params, ParamsError};
use super::pause::PauseHandle;
use super::rng::{SimRng, create_rng};
use super::snapshot::{EcosystemSnapshot, EggView, NarjilloView, OrganView};
use super::spatial::{FoodIndex, KdTreeError};

/// Errors raised while changing the ecosystem.
#[derive(Debug, Error)]
pub enum EcosystemError {
    /// A position could not be added to the spatial index.
    #[error("position ({}, {}) cannot be indexed", .0.x, .0.y)]
    InvalidPosition(Vector),
    /// The food index could not be rebuilt.
    #[error("food index cannot be built: {0:?}")]
    Index(KdTreeError),
    /// A genome could not be parsed.
    #[error(transparent)]
    Dna(#[from] DnaError),
}

/// The main ecosystem containing all simulation state.
#[derive(Serialize, Deserialize)]
pub struct Ecosystem {
    params: Params,
    tick_count: u64,
    last_entity_id: EntityId,
    creatures: BTreeMap<EntityId, Creature>,
    food: BTreeMap<EntityId, FoodPiece>,
    eggs: BTreeMap<EntityId, Egg>,
    gene_pool: GenePool,
    rng: SimRng,
    #[serde(skip)]
    food_index: FoodIndex,
    #[serde(skip)]
    listeners: Vec<Box<dyn EcosystemListener>>,
    #[serde(skip)]
    pause: PauseHandle,
}

impl Ecosystem {
    /// Creates an empty world.
    ///
    /// # Arguments
    ///
    /// * `params` - Simulation parameters
    /// * `seed` - Seed of the ecosystem's random generator
    ///
    /// # Errors
    ///
    /// Rejects parameters that fail [`Params::validate`].
    pub fn new(params: Params, seed: u64) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            tick_count: 0,
            last_entity_id: 0,
            creatures: BTreeMap::new(),
            food: BTreeMap::new(),
            eggs: BTreeMap::new(),
            gene_pool: GenePool::new(),
            rng: create_rng(seed),
            food_index: FoodIndex::new(),
            listeners: Vec::new(),
            pause: PauseHandle::new(),
        })
    }

    /// Scatters the initial food and random founder creatures.
    pub fn populate(&mut self) -> Result<(), EcosystemError> {
        for _ in 0..self.params.initial_food {
            self.spawn_random_food()?;
        }
        for _ in 0..self.params.initial_narjillos {
            let dna = self.gene_pool.create_random_dna(&self.params, &mut self.rng);
            self.spawn_random_narjillo(dna);
        }
        info!(
            "populated ecosystem with {} food pieces and {} narjillos",
            self.food.len(),
            self.creatures.len()
        );
        Ok(())
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Side of the square world.
    pub fn size(&self) -> f64 {
        self.params.world_size
    }

    /// Middle of the world.
    pub fn center(&self) -> Vector {
        Vector::cartesian(self.size() / 2.0, self.size() / 2.0)
    }

    /// Ticks elapsed since creation.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Genealogy of every genome in this world.
    pub fn gene_pool(&self) -> &GenePool {
        &self.gene_pool
    }

    /// Handle used by other threads to pause this ecosystem.
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    /// Number of living creatures.
    pub fn number_of_narjillos(&self) -> usize {
        self.creatures.len()
    }

    /// Number of food pieces.
    pub fn number_of_food_pieces(&self) -> usize {
        self.food.len()
    }

    /// Number of eggs, hatched ones included until they fade.
    pub fn number_of_eggs(&self) -> usize {
        self.eggs.len()
    }

    /// Looks up a creature.
    pub fn creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    /// Mutable access to a creature between ticks.
    pub fn creature_mut(&mut self, id: EntityId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    /// All creatures, ordered by id.
    pub fn creatures(&self) -> impl Iterator<Item = (EntityId, &Creature)> + '_ {
        self.creatures.iter().map(|(id, creature)| (*id, creature))
    }

    /// Looks up a food piece.
    pub fn food_piece(&self, id: EntityId) -> Option<&FoodPiece> {
        self.food.get(&id)
    }

    /// All food pieces, ordered by id.
    pub fn food_pieces(&self) -> impl Iterator<Item = (EntityId, &FoodPiece)> + '_ {
        self.food.iter().map(|(id, food)| (*id, food))
    }

    /// Looks up an egg.
    pub fn egg(&self, id: EntityId) -> Option<&Egg> {
        self.eggs.get(&id)
    }

    /// All eggs, ordered by id.
    pub fn eggs(&self) -> impl Iterator<Item = (EntityId, &Egg)> + '_ {
        self.eggs.iter().map(|(id, egg)| (*id, egg))
    }

    /// Every thing in the world: food, then eggs, then creatures.
    pub fn things(&self) -> Vec<Thing> {
        let food = self.food.iter().map(|(id, food)| Thing::new(*id, food));
        let eggs = self.eggs.iter().map(|(id, egg)| Thing::new(*id, egg));
        let creatures = self
            .creatures
            .iter()
            .map(|(id, creature)| Thing::new(*id, creature));
        food.chain(eggs).chain(creatures).collect()
    }

    /// Registers a listener after replaying every existing thing to it.
    pub fn add_listener(&mut self, mut listener: Box<dyn EcosystemListener>) {
        for thing in self.things() {
            listener.thing_added(&thing);
        }
        self.listeners.push(listener);
    }

    /// Creates and registers a random genome.
    pub fn create_random_dna(&mut self) -> Arc<Dna> {
        self.gene_pool.create_random_dna(&self.params, &mut self.rng)
    }

    /// Parses and registers a genome.
    pub fn create_dna(&mut self, text: &str) -> Result<Arc<Dna>, EcosystemError> {
        Ok(self.gene_pool.create_dna(text)?)
    }

    /// Lineage of a genome, oldest first.
    pub fn ancestry_of(&self, dna_id: DnaId) -> Result<Vec<Arc<Dna>>, GenePoolError> {
        self.gene_pool.ancestry(dna_id)
    }

    /// The most typical genome among the living.
    pub fn most_typical_dna(&self) -> Option<Arc<Dna>> {
        self.gene_pool.most_typical_dna()
    }

    /// A living creature carrying the most typical genome, if it has hatched.
    pub fn most_typical_specimen(&self) -> Option<EntityId> {
        let dna = self.most_typical_dna()?;
        self.creatures
            .iter()
            .find(|(_, creature)| creature.dna().id() == dna.id())
            .map(|(id, _)| *id)
    }

    /// Adds a food piece at `position`.
    ///
    /// Creatures without a food target start chasing their closest piece.
    pub fn spawn_food(&mut self, position: Vector) -> Result<EntityId, EcosystemError> {
        self.add_food(FoodPiece::new(position))
    }

    /// Adds a food piece at a random position.
    pub fn spawn_random_food(&mut self) -> Result<EntityId, EcosystemError> {
        let food = FoodPiece::new_random(self.params.world_size, &mut self.rng);
        self.add_food(food)
    }

    /// Adds a newborn creature with the founder energy.
    ///
    /// # Arguments
    ///
    /// * `dna` - Genome, normally created through this ecosystem
    /// * `position` - Where the head starts
    /// * `heading` - Initial direction in radians
    ///
    /// # Returns
    ///
    /// The id of the new creature.
    pub fn spawn_narjillo(&mut self, dna: Arc<Dna>, position: Vector, heading: f64) -> EntityId {
        let energy = Energy::new(
            self.params.creature_initial_energy,
            self.params.creature_max_energy,
            self.params.creature_lifespan,
        );
        let creature = Creature::new(dna, position, heading, energy, &self.params);
        self.add_creature(creature)
    }

    /// Adds a newborn creature at a random position and heading.
    pub fn spawn_random_narjillo(&mut self, dna: Arc<Dna>) -> EntityId {
        let size = self.params.world_size;
        let position = Vector::cartesian(
            self.rng.random::<f64>() * size,
            self.rng.random::<f64>() * size,
        );
        let heading = self.rng.random::<f64>() * TAU;
        self.spawn_narjillo(dna, position, heading)
    }

    /// Adds an egg.
    pub fn add_egg(&mut self, egg: Egg) -> EntityId {
        let id = self.next_entity_id();
        self.notify_added(Thing::new(id, &egg));
        self.eggs.insert(id, egg);
        id
    }

    /// The closest food piece, or the center of the world if there is no food.
    pub fn find_closest_target(&self, position: Vector) -> Target {
        self.food_index
            .nearest(position)
            .and_then(|id| {
                self.food.get(&id).map(|food| Target::Food {
                    id,
                    position: food.position(),
                })
            })
            .unwrap_or_else(|| Target::Location(self.center()))
    }

    /// The creature closest to `position`.
    pub fn find_narjillo(&self, position: Vector) -> Option<EntityId> {
        self.creatures
            .iter()
            .map(|(id, creature)| (*id, creature.position().distance_to(position)))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(id, _)| id)
    }

    /// Feeds a food piece to a creature.
    ///
    /// Removes the piece, notifies listeners, feeds the creature and
    /// retargets every creature that was chasing the piece.
    ///
    /// # Returns
    ///
    /// `false` if the piece was already gone, in which case nothing changes.
    pub fn consume_food(&mut self, creature_id: EntityId, food_id: EntityId) -> bool {
        if !self.take_food(creature_id, food_id) {
            return false;
        }
        self.food_eaten(&[food_id]);
        true
    }

    /// Advances the world by one tick.
    ///
    /// A paused ecosystem changes nothing.
    ///
    /// # Returns
    ///
    /// `true` while at least one creature is alive.
    pub fn tick(&mut self) -> bool {
        if self.pause.sync() {
            return !self.creatures.is_empty();
        }

        self.maybe_spawn_food();

        let params = &self.params;
        let mut movements: Vec<(EntityId, Segment)> = self
            .creatures
            .par_iter_mut()
            .map(|(id, creature)| (*id, creature.tick(params)))
            .collect();
        movements.sort_unstable_by_key(|(id, _)| *id);

        for (id, movement) in &movements {
            self.consume_food_along(*id, movement);
        }

        self.lay_eggs();
        self.tick_eggs();
        self.remove_dead_creatures();

        self.tick_count += 1;
        !self.creatures.is_empty()
    }

    /// Immutable view of the current state.
    pub fn snapshot(&self) -> EcosystemSnapshot {
        let narjillos = self
            .creatures
            .iter()
            .map(|(id, creature)| NarjilloView {
                id: *id,
                dna_id: creature.dna().id(),
                position: creature.position(),
                energy: creature.energy().value(),
                age: creature.age(),
                in_pain: creature.is_in_pain(),
                organs: creature
                    .body()
                    .organs()
                    .iter()
                    .map(|organ| OrganView {
                        start: organ.start_point(),
                        end: organ.end_point(),
                        thickness: organ.thickness(),
                        hue: organ.hue(),
                    })
                    .collect(),
            })
            .collect();
        let eggs = self
            .eggs
            .iter()
            .map(|(id, egg)| EggView {
                id: *id,
                position: egg.position(),
                fading: egg.fading(),
                hatched: egg.is_hatched(),
            })
            .collect();
        EcosystemSnapshot {
            tick: self.tick_count,
            size: self.size(),
            narjillos,
            eggs,
            food: self
                .food
                .iter()
                .map(|(id, food)| Thing::new(*id, food))
                .collect(),
        }
    }

    /// Rebuilds the food index from the food map.
    pub(crate) fn rebuild_food_index(&mut self) -> Result<(), EcosystemError> {
        self.food_index = FoodIndex::build(
            self.food
                .iter()
                .map(|(id, food)| (*id, food.position())),
        )
        .map_err(EcosystemError::Index)?;
        Ok(())
    }

    fn add_food(&mut self, food: FoodPiece) -> Result<EntityId, EcosystemError> {
        let id = self.next_entity_id();
        self.food_index
            .insert(id, food.position())
            .map_err(|_| EcosystemError::InvalidPosition(food.position()))?;
        self.notify_added(Thing::new(id, &food));
        self.food.insert(id, food);
        self.retarget(|target| target.food_id().is_none());
        Ok(id)
    }

    fn add_creature(&mut self, mut creature: Creature) -> EntityId {
        creature.set_target(self.find_closest_target(creature.position()));
        let id = self.next_entity_id();
        self.notify_added(Thing::new(id, &creature));
        self.creatures.insert(id, creature);
        id
    }

    fn maybe_spawn_food(&mut self) {
        let interval = self.params.food_respawn_average_interval;
        if interval == 0 || self.rng.random::<f64>() >= 1.0 / f64::from(interval) {
            return;
        }
        if let Err(error) = self.spawn_random_food() {
            warn!("failed to spawn food: {}", error);
        }
    }

    /// Eats every food piece within reach of a movement.
    fn consume_food_along(&mut self, creature_id: EntityId, movement: &Segment) {
        if self
            .creatures
            .get(&creature_id)
            .is_none_or(Creature::is_dead)
        {
            return;
        }
        let collision_distance = self.params.collision_distance;
        let mut eaten = Vec::new();
        for food_id in self.food_index.candidates_near(movement, collision_distance) {
            let Some(food) = self.food.get(&food_id) else {
                continue;
            };
            if movement.distance_to_point(food.position()) <= collision_distance
                && self.take_food(creature_id, food_id)
            {
                eaten.push(food_id);
            }
        }
        if !eaten.is_empty() {
            self.food_eaten(&eaten);
        }
    }

    /// Removes a food piece and feeds it to a creature. The index is left stale.
    fn take_food(&mut self, creature_id: EntityId, food_id: EntityId) -> bool {
        let Some(food) = self.food.remove(&food_id) else {
            return false;
        };
        self.notify_removed(Thing::new(food_id, &food));
        if let Some(creature) = self.creatures.get_mut(&creature_id) {
            creature.feed(self.params.energy_per_food);
        }
        trace!("narjillo {} ate food {}", creature_id, food_id);
        true
    }

    /// Rebuilds the index after a batch of meals and retargets the chasers.
    fn food_eaten(&mut self, eaten: &[EntityId]) {
        if let Err(error) = self.rebuild_food_index() {
            warn!("failed to rebuild the food index: {}", error);
        }
        self.retarget(|target| target.food_id().is_some_and(|id| eaten.contains(&id)));
    }

    /// Points every creature whose target matches `predicate` at its closest target.
    fn retarget(&mut self, predicate: impl Fn(&Target) -> bool) {
        let chasers: Vec<(EntityId, Vector)> = self
            .creatures
            .iter()
            .filter(|(_, creature)| predicate(&creature.target()))
            .map(|(id, creature)| (*id, creature.position()))
            .collect();
        for (id, position) in chasers {
            let target = self.find_closest_target(position);
            if let Some(creature) = self.creatures.get_mut(&id) {
                creature.set_target(target);
            }
        }
    }

    fn lay_eggs(&mut self) {
        let mut laid = Vec::new();
        for creature in self.creatures.values_mut() {
            if let Some(egg) = creature.lay_egg(&mut self.gene_pool, &self.params, &mut self.rng) {
                laid.push(egg);
            }
        }
        for egg in laid {
            let id = self.add_egg(egg);
            debug!("egg {} laid", id);
        }
    }

    fn tick_eggs(&mut self) {
        let mut hatchlings = Vec::new();
        let mut faded = Vec::new();
        for (egg_id, egg) in &mut self.eggs {
            egg.tick();
            if egg.is_ripe() {
                self.last_entity_id += 1;
                let creature_id = self.last_entity_id;
                if let Some(creature) = egg.hatch(creature_id, &self.params, &mut self.rng) {
                    hatchlings.push((creature_id, creature));
                }
            }
            if egg.is_dead() {
                faded.push(*egg_id);
            }
        }

        for (id, mut creature) in hatchlings {
            creature.set_target(self.find_closest_target(creature.position()));
            self.notify_added(Thing::new(id, &creature));
            self.creatures.insert(id, creature);
            debug!("narjillo {} hatched", id);
        }
        for id in faded {
            if let Some(egg) = self.eggs.remove(&id) {
                self.notify_removed(Thing::new(id, &egg));
            }
        }
    }

    fn remove_dead_creatures(&mut self) {
        let dead: Vec<EntityId> = self
            .creatures
            .iter()
            .filter(|(_, creature)| creature.is_dead())
            .map(|(id, _)| *id)
            .collect();
        for id in dead {
            if let Some(creature) = self.creatures.remove(&id) {
                self.gene_pool.remove(creature.dna().id());
                self.notify_removed(Thing::new(id, &creature));
                debug!("narjillo {} died at age {}", id, creature.age());
            }
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        self.last_entity_id += 1;
        self.last_entity_id
    }

    fn notify_added(&mut self, thing: Thing) {
        for listener in &mut self.listeners {
            listener.thing_added(&thing);
        }
    }

    fn notify_removed(&mut self, thing: Thing) {
        for listener in &mut self.listeners {
            listener.thing_removed(&thing);
        }
    }
}
