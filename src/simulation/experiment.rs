//! A named, persistent simulation run.
//!
//! An experiment wraps an ecosystem with the metadata needed to identify and
//! resume it, logs its progress, publishes snapshots for observers, and saves
//! itself to JSON.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ecosystem::{Ecosystem, EcosystemError};
use super::params::{Params, ParamsError};
use super::snapshot::SnapshotSlot;

/// Errors raised while creating, saving or loading an experiment.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// The parameters are invalid.
    #[error(transparent)]
    Params(#[from] ParamsError),
    /// The ecosystem could not be set up.
    #[error(transparent)]
    Ecosystem(#[from] EcosystemError),
    /// The save file could not be read or written.
    #[error("experiment file error: {0}")]
    Io(#[from] std::io::Error),
    /// The save file is not a valid experiment.
    #[error("experiment serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A simulation run with its identity and bookkeeping.
#[derive(Serialize, Deserialize)]
pub struct Experiment {
    id: String,
    seed: u64,
    started_at: DateTime<Utc>,
    ecosystem: Ecosystem,
    #[serde(skip)]
    snapshots: SnapshotSlot,
}

impl Experiment {
    /// Starts an experiment with random founders.
    pub fn new(seed: u64, params: Params) -> Result<Self, ExperimentError> {
        let mut ecosystem = Ecosystem::new(params, seed)?;
        ecosystem.populate()?;
        Ok(Self::wrap(seed, ecosystem))
    }

    /// Starts an experiment whose founders all share the genome `dna`.
    pub fn with_dna(seed: u64, params: Params, dna: &str) -> Result<Self, ExperimentError> {
        let mut ecosystem = Ecosystem::new(params, seed)?;
        for _ in 0..ecosystem.params().initial_food {
            ecosystem.spawn_random_food()?;
        }
        for _ in 0..ecosystem.params().initial_narjillos {
            let founder = ecosystem.create_dna(dna)?;
            ecosystem.spawn_random_narjillo(founder);
        }
        Ok(Self::wrap(seed, ecosystem))
    }

    fn wrap(seed: u64, ecosystem: Ecosystem) -> Self {
        let started_at = Utc::now();
        let id = format!("{}-{}", seed, started_at.format("%Y%m%d%H%M%S"));
        info!("starting experiment {}", id);
        Self {
            id,
            seed,
            started_at,
            ecosystem,
            snapshots: SnapshotSlot::new(),
        }
    }

    /// Identifier, derived from the seed and the start time.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Seed of the ecosystem's random generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// When the experiment was first started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The simulated world.
    pub fn ecosystem(&self) -> &Ecosystem {
        &self.ecosystem
    }

    /// Mutable access to the simulated world.
    pub fn ecosystem_mut(&mut self) -> &mut Ecosystem {
        &mut self.ecosystem
    }

    /// Where observers read published snapshots.
    pub fn snapshots(&self) -> SnapshotSlot {
        self.snapshots.clone()
    }

    /// Advances the world by one tick, logging and publishing on schedule.
    ///
    /// # Returns
    ///
    /// `false` once every creature is dead.
    pub fn tick(&mut self) -> bool {
        let alive = self.ecosystem.tick();
        let tick = self.ecosystem.tick_count();
        let params = self.ecosystem.params();
        if params.report_interval > 0 && tick % params.report_interval == 0 {
            info!("{}", self.status_line());
        }
        if params.snapshot_interval > 0 && tick % params.snapshot_interval == 0 {
            self.snapshots.publish(self.ecosystem.snapshot());
        }
        if !alive {
            info!("extinction at tick {} of experiment {}", tick, self.id);
        }
        alive
    }

    /// One-line summary of the population.
    pub fn status_line(&self) -> String {
        let ecosystem = &self.ecosystem;
        let typical = ecosystem
            .most_typical_dna()
            .map_or_else(|| "-".to_string(), |dna| dna.to_string());
        format!(
            "tick {} | narjillos {} | food {} | eggs {} | average generation {:.2} | most typical {}",
            ecosystem.tick_count(),
            ecosystem.number_of_narjillos(),
            ecosystem.number_of_food_pieces(),
            ecosystem.number_of_eggs(),
            ecosystem.gene_pool().average_generation(),
            typical
        )
    }

    /// Saves the experiment as JSON.
    ///
    /// Writes to a temporary file first, so an interrupted save never
    /// corrupts an existing file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ExperimentError> {
        let path = path.as_ref();
        let json = serde_json::to_string(self)?;
        let temporary = path.with_extension("json.tmp");
        fs::write(&temporary, json)?;
        fs::rename(&temporary, path)?;
        info!("saved experiment {} at tick {}", self.id, self.ecosystem.tick_count());
        Ok(())
    }

    /// Loads an experiment saved by [`save_to_file`](Self::save_to_file).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ExperimentError> {
        let json = fs::read_to_string(path)?;
        let mut experiment: Self = serde_json::from_str(&json)?;
        experiment.ecosystem.params().validate()?;
        experiment.ecosystem.rebuild_food_index()?;
        info!(
            "loaded experiment {} at tick {}",
            experiment.id,
            experiment.ecosystem.tick_count()
        );
        Ok(experiment)
    }
}
