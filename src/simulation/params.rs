//! Simulation parameters.
//!
//! Every physical, genetic and ecological constant of the simulation lives in
//! [`Params`]. Missing fields fall back to their defaults when a parameter file
//! is loaded, so a JSON file only needs to list what it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating parameters.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// A parameter is outside its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        name: &'static str,
        /// Human readable constraint that was violated.
        reason: &'static str,
    },
    /// The parameter file could not be read.
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
    /// The parameter file is not valid JSON for [`Params`].
    #[error("failed to parse parameter file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Simulation parameters that control ecosystem behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Side of the square world.
    pub world_size: f64,
    /// Food pieces scattered by [`populate`](super::ecosystem::Ecosystem::populate).
    pub initial_food: usize,
    /// Creatures hatched by [`populate`](super::ecosystem::Ecosystem::populate).
    pub initial_narjillos: usize,
    /// Average ticks between two spontaneous food spawns. Zero disables spawning.
    pub food_respawn_average_interval: u32,
    /// Maximum distance between a creature's path and a food piece for the piece to be eaten.
    pub collision_distance: f64,
    /// Energy gained by eating one food piece.
    pub energy_per_food: f64,

    /// Energy of founder creatures.
    pub creature_initial_energy: f64,
    /// Maximum energy of a newborn creature.
    pub creature_max_energy: f64,
    /// Ticks it takes for the energy ceiling to decay to zero.
    pub creature_lifespan: f64,
    /// Agony threshold, as a multiple of the per-tick energy decay.
    pub agony_factor: f64,
    /// Bend applied to every organ at zero energy, in degrees.
    pub max_pain_bend_degrees: f64,
    /// Age before which a creature cannot lay eggs.
    pub creature_mature_age: u64,

    /// Mass used to compute the energy spent to throw an egg.
    pub egg_mass: f64,
    /// Egg velocity per unit of the head's egg gene.
    pub egg_velocity_per_gene: f64,
    /// Minimum ticks between two eggs.
    pub egg_interval_base: u64,
    /// Extra ticks between eggs per unit of the head's egg gene.
    pub egg_interval_step: u64,
    /// Shortest incubation time.
    pub egg_min_incubation: u64,
    /// Longest incubation time.
    pub egg_max_incubation: u64,
    /// Per-tick multiplier applied to a drifting egg's velocity.
    pub egg_velocity_decay: f64,
    /// Ticks a hatched egg takes to fade away.
    pub egg_fading_ticks: u32,

    /// Length of a newborn organ (capped by its adult length).
    pub organ_birth_length: f64,
    /// Thickness of a newborn organ (capped by its adult thickness).
    pub organ_birth_thickness: f64,
    /// Length and thickness gained by a growing organ each tick.
    pub organ_growth_rate: f64,
    /// Maximum number of organs in a body, head included.
    pub max_organs: usize,
    /// Maximum distance from the head in the organ tree.
    pub max_body_depth: usize,
    /// Largest angle at rest a segment gene can express, in degrees.
    pub max_angle_at_rest_degrees: f64,
    /// Amplitude of the head's swimming wave, in degrees.
    pub head_wave_amplitude_degrees: f64,
    /// Oscillator frequency per unit of metabolic rate, in cycles per tick.
    pub wave_frequency: f64,
    /// Maximum rotation of the mouth per tick, in degrees.
    pub mouth_turn_rate_degrees: f64,
    /// Maximum rotation of the body heading per tick, in degrees.
    pub body_turn_rate_degrees: f64,
    /// Fraction of the organs' swept momentum turned into forward motion.
    pub propulsion: f64,
    /// Energy spent per unit of kinetic effort, before the metabolic rate.
    pub effort_energy_factor: f64,

    /// Chromosomes in a random founder genome.
    pub founder_chromosomes: usize,
    /// Probability that a single gene mutates when copied.
    pub gene_mutation_rate: f64,
    /// Largest change applied to a mutating gene.
    pub gene_mutation_range: i32,
    /// Probability that a copy duplicates or drops a whole chromosome.
    pub structural_mutation_rate: f64,

    /// Ticks between two status log lines. Zero disables status logging.
    pub report_interval: u64,
    /// Ticks between two published snapshots. Zero disables publishing.
    pub snapshot_interval: u64,
    /// Ticks between two automatic saves by the binary. Zero disables saving.
    pub save_interval: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_size: 20_000.0,
            initial_food: 400,
            initial_narjillos: 150,
            food_respawn_average_interval: 50,
            collision_distance: 30.0,
            energy_per_food: 100_000.0,

            creature_initial_energy: 100_000.0,
            creature_max_energy: 200_000.0,
            creature_lifespan: 30_000.0,
            agony_factor: 300.0,
            max_pain_bend_degrees: 9.0,
            creature_mature_age: 5_000,

            egg_mass: 7.0,
            egg_velocity_per_gene: 0.1,
            egg_interval_base: 1_000,
            egg_interval_step: 40,
            egg_min_incubation: 300,
            egg_max_incubation: 600,
            egg_velocity_decay: 0.98,
            egg_fading_ticks: 100,

            organ_birth_length: 5.0,
            organ_birth_thickness: 2.0,
            organ_growth_rate: 0.01,
            max_organs: 63,
            max_body_depth: 6,
            max_angle_at_rest_degrees: 70.0,
            head_wave_amplitude_degrees: 15.0,
            wave_frequency: 0.01,
            mouth_turn_rate_degrees: 5.0,
            body_turn_rate_degrees: 3.0,
            propulsion: 2.0,
            effort_energy_factor: 0.001,

            founder_chromosomes: 8,
            gene_mutation_rate: 1.0 / 15.0,
            gene_mutation_range: 15,
            structural_mutation_rate: 0.01,

            report_interval: 10_000,
            snapshot_interval: 100,
            save_interval: 100_000,
        }
    }
}

impl Params {
    /// Loads parameters from a JSON file and validates them.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON object with any subset of the fields
    ///
    /// # Returns
    ///
    /// The parsed parameters, or an error if the file is unreadable or invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let json = fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Checks the cross-field and range constraints of the parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        fn check(ok: bool, name: &'static str, reason: &'static str) -> Result<(), ParamsError> {
            if ok {
                Ok(())
            } else {
                Err(ParamsError::Invalid { name, reason })
            }
        }

        check(
            self.world_size.is_finite() && self.world_size > 0.0,
            "world_size",
            "must be positive",
        )?;
        check(
            self.collision_distance >= 0.0,
            "collision_distance",
            "must not be negative",
        )?;
        check(
            self.creature_max_energy > 0.0,
            "creature_max_energy",
            "must be positive",
        )?;
        check(
            self.creature_lifespan > 0.0,
            "creature_lifespan",
            "must be positive",
        )?;
        check(
            self.egg_min_incubation <= self.egg_max_incubation,
            "egg_min_incubation",
            "must not exceed egg_max_incubation",
        )?;
        check(
            self.egg_fading_ticks > 0,
            "egg_fading_ticks",
            "must be positive",
        )?;
        check(self.max_organs > 0, "max_organs", "must allow at least the head")?;
        check(
            self.organ_growth_rate >= 0.0,
            "organ_growth_rate",
            "must not be negative",
        )?;
        check(
            self.founder_chromosomes > 0,
            "founder_chromosomes",
            "must be positive",
        )?;
        check(
            (0.0..=1.0).contains(&self.gene_mutation_rate),
            "gene_mutation_rate",
            "must be a probability",
        )?;
        check(
            (0.0..=1.0).contains(&self.structural_mutation_rate),
            "structural_mutation_rate",
            "must be a probability",
        )?;
        check(
            (0..=255).contains(&self.gene_mutation_range),
            "gene_mutation_range",
            "must be within [0, 255]",
        )?;
        Ok(())
    }
}
