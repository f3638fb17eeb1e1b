//! Genealogy of every genome that ever existed in an ecosystem.
//!
//! The pool keeps two views: the full history (every genome ever created and
//! its parent) and the current pool (genomes whose creature is still alive).
//! Ancestry queries walk the history, typicality queries scan the current
//! pool.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use ndarray::{Array2, Axis};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dna::{Dna, DnaError, DnaId};
use super::params::Params;

/// Errors raised by gene pool queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenePoolError {
    /// No genome with this id was ever created in the pool.
    #[error("no DNA with id {0} in the gene pool")]
    NotFound(DnaId),
}

/// Registry of genomes and their parent links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenePool {
    last_id: DnaId,
    history: BTreeMap<DnaId, Arc<Dna>>,
    current: BTreeSet<DnaId>,
    child_to_parent: BTreeMap<DnaId, Option<DnaId>>,
    parent_to_children: BTreeMap<DnaId, Vec<DnaId>>,
}

impl GenePool {
    /// Creates an empty gene pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a random founder genome.
    pub fn create_random_dna(&mut self, params: &Params, rng: &mut impl Rng) -> Arc<Dna> {
        let id = self.next_id();
        self.register(Dna::random(id, params, rng))
    }

    /// Parses and registers a founder genome.
    pub fn create_dna(&mut self, text: &str) -> Result<Arc<Dna>, DnaError> {
        let dna = Dna::parse(self.last_id + 1, None, text)?;
        self.last_id += 1;
        Ok(self.register(dna))
    }

    /// Copies `parent` with mutations and registers the copy.
    pub fn mutate_dna(&mut self, parent: &Dna, params: &Params, rng: &mut impl Rng) -> Arc<Dna> {
        let id = self.next_id();
        self.register(parent.mutate(id, params, rng))
    }

    /// Removes a genome from the current pool. Its history is kept.
    pub fn remove(&mut self, id: DnaId) {
        self.current.remove(&id);
    }

    /// Looks up any genome ever created in this pool.
    pub fn dna(&self, id: DnaId) -> Option<&Arc<Dna>> {
        self.history.get(&id)
    }

    /// Returns `true` if the genome is in the current pool.
    pub fn is_current(&self, id: DnaId) -> bool {
        self.current.contains(&id)
    }

    /// Genomes in the current pool, ordered by id.
    pub fn current_pool(&self) -> impl Iterator<Item = &Arc<Dna>> + '_ {
        self.current.iter().filter_map(|id| self.history.get(id))
    }

    /// Number of genomes in the current pool.
    pub fn current_size(&self) -> usize {
        self.current.len()
    }

    /// Number of genomes ever created.
    pub fn history_size(&self) -> usize {
        self.history.len()
    }

    /// Ids of the direct children of a genome.
    pub fn children_of(&self, id: DnaId) -> &[DnaId] {
        self.parent_to_children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Lineage of a genome, oldest ancestor first and the genome itself last.
    pub fn ancestry(&self, id: DnaId) -> Result<Vec<Arc<Dna>>, GenePoolError> {
        let mut lineage = Vec::new();
        let mut next = Some(id);
        while let Some(current) = next {
            let dna = self
                .history
                .get(&current)
                .ok_or(GenePoolError::NotFound(current))?;
            lineage.push(Arc::clone(dna));
            next = self.child_to_parent.get(&current).copied().flatten();
        }
        lineage.reverse();
        Ok(lineage)
    }

    /// Number of ancestor links between a genome and its founder.
    pub fn generation_of(&self, id: DnaId) -> Result<usize, GenePoolError> {
        Ok(self.ancestry(id)?.len() - 1)
    }

    /// Mean generation of the current pool, or zero if it is empty.
    pub fn average_generation(&self) -> f64 {
        if self.current.is_empty() {
            return 0.0;
        }
        let total: usize = self
            .current
            .iter()
            .filter_map(|id| self.generation_of(*id).ok())
            .sum();
        total as f64 / self.current.len() as f64
    }

    /// The current genome with the smallest total edit distance to all the others.
    ///
    /// Ties go to the lowest id. Returns `None` on an empty pool.
    pub fn most_typical_dna(&self) -> Option<Arc<Dna>> {
        let genomes: Vec<&Arc<Dna>> = self.current_pool().collect();
        let count = genomes.len();
        if count == 0 {
            return None;
        }

        let cells: Vec<u64> = (0..count * count)
            .into_par_iter()
            .map(|cell| {
                let (row, column) = (cell / count, cell % count);
                if row < column {
                    genomes[row].levenshtein_distance(genomes[column]) as u64
                } else {
                    0
                }
            })
            .collect();
        let upper = Array2::from_shape_vec((count, count), cells).ok()?;
        let distances = &upper + &upper.t();
        let totals = distances.sum_axis(Axis(1));

        // `genomes` is ordered by id, so the first minimum is the lowest id
        let mut best = 0;
        for (index, total) in totals.iter().enumerate() {
            if *total < totals[best] {
                best = index;
            }
        }
        Some(Arc::clone(genomes[best]))
    }

    /// Alias of [`most_typical_dna`](Self::most_typical_dna).
    pub fn most_successful_dna(&self) -> Option<Arc<Dna>> {
        self.most_typical_dna()
    }

    fn next_id(&mut self) -> DnaId {
        self.last_id += 1;
        self.last_id
    }

    fn register(&mut self, dna: Dna) -> Arc<Dna> {
        let id = dna.id();
        let parent = dna.parent_id();
        let dna = Arc::new(dna);
        self.history.insert(id, Arc::clone(&dna));
        self.current.insert(id);
        self.child_to_parent.insert(id, parent);
        if let Some(parent) = parent {
            self.parent_to_children.entry(parent).or_default().push(id);
        }
        dna
    }
}
