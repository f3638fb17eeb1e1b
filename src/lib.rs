//! # Narjillos - Artificial Life Simulation
//!
//! A deterministic simulation of creatures ("narjillos") whose bodies grow
//! from a genome, swim by bending their organs, eat food, and lay mutated
//! eggs. Populations evolve by natural selection.
//!
//! ## Features
//!
//! - Byte-string genomes with mutation and gene-level edit distance
//! - Embryogenesis from chromosomes into a tree of organs
//! - Swimming physics driven by nerve oscillators and reflexes
//! - Energy, agony, aging and death
//! - Eggs that drift, hatch and fade
//! - A gene pool tracking ancestry and the most typical genome
//! - Seeded, reproducible runs with save/load
//!
//! ## Core Modules
//!
//! - [`simulation::dna`] - Genomes and their text encoding
//! - [`simulation::embryogenesis`] - Genome to body development
//! - [`simulation::body`] - Organs and swimming physics
//! - [`simulation::creature`] - Creature lifecycle
//! - [`simulation::ecosystem`] - Main simulation logic
//! - [`simulation::gene_pool`] - Genealogy and typicality

/// Core simulation logic and data structures.
pub mod simulation {
    /// Articulated bodies, organs, nerves and swimming physics.
    pub mod body;
    /// Creatures and their lifecycle.
    pub mod creature;
    /// Genomes, chromosomes and mutation.
    pub mod dna;
    /// Main ecosystem simulation with parallel updates.
    pub mod ecosystem;
    /// Eggs waiting to hatch.
    pub mod egg;
    /// Development of a genome into a body.
    pub mod embryogenesis;
    /// Energy reserves with an aging ceiling.
    pub mod energy;
    /// Listener notifications for things added and removed.
    pub mod events;
    /// Persistent, logged simulation runs.
    pub mod experiment;
    /// Food pieces that creatures consume.
    pub mod food;
    /// Genealogy of every genome in an ecosystem.
    pub mod gene_pool;
    /// Vectors, segments and bounding boxes.
    pub mod geometric_utils;
    /// Trait for entities with a position.
    ///
    /// The [`locatable::Locatable`] trait is implemented by every thing in the
    /// world (Creature, Egg, FoodPiece).
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// Cooperative pausing between ticks.
    pub mod pause;
    /// Seeded random number generation.
    pub mod rng;
    /// Immutable views for observers.
    pub mod snapshot;
    /// KD-tree index of food positions.
    pub mod spatial;
}
