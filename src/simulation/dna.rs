//! Genomes and their textual encoding.
//!
//! A genome is a flat sequence of genes in `[0, 255]`, read in chromosomes of
//! [`CHROMOSOME_SIZE`] genes. The first chromosome describes the head, every
//! following one describes a body segment. Genomes are immutable: mutation
//! always produces a new [`Dna`] that remembers its parent.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::params::Params;

/// Identifier of a genome, unique within a gene pool.
pub type DnaId = u64;

/// Number of genes in a chromosome.
pub const CHROMOSOME_SIZE: usize = 6;

/// Control-gene bit that makes a segment chromosome drive both twin organs.
pub const MIRROR_ORGAN: u8 = 0b0000_0001;

/// Errors raised while building or parsing a genome.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DnaError {
    /// The text is not enclosed in curly braces.
    #[error("DNA must be enclosed in braces, got {0:?}")]
    MissingBraces(String),
    /// A gene is not an integer.
    #[error("invalid gene {0:?}")]
    InvalidGene(String),
    /// A gene is outside `[0, 255]`.
    #[error("gene {0} is outside [0, 255]")]
    GeneOutOfRange(i64),
    /// The genome has no genes at all.
    #[error("DNA must contain at least one gene")]
    Empty,
}

/// A group of [`CHROMOSOME_SIZE`] genes describing one organ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chromosome {
    genes: [u8; CHROMOSOME_SIZE],
}

impl Chromosome {
    /// Builds a chromosome from up to [`CHROMOSOME_SIZE`] genes, padding with zeros.
    pub fn new(genes: &[u8]) -> Self {
        let mut padded = [0; CHROMOSOME_SIZE];
        for (slot, gene) in padded.iter_mut().zip(genes) {
            *slot = *gene;
        }
        Self { genes: padded }
    }

    /// Returns the gene at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= CHROMOSOME_SIZE`.
    pub fn gene(&self, index: usize) -> u8 {
        self.genes[index]
    }

    /// All genes of the chromosome.
    pub fn genes(&self) -> &[u8; CHROMOSOME_SIZE] {
        &self.genes
    }

    /// Returns `true` if the control gene carries the mirror bit.
    pub fn is_mirror(&self) -> bool {
        self.genes[0] & MIRROR_ORGAN != 0
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_genes(f, &self.genes)
    }
}

/// An immutable genome.
///
/// Two genomes are equal when their gene sequences are equal, regardless of
/// their ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dna {
    id: DnaId,
    parent_id: Option<DnaId>,
    genes: Vec<u8>,
}

impl PartialEq for Dna {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl Eq for Dna {}

impl Dna {
    /// Builds a genome from raw gene values.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier of the new genome
    /// * `parent_id` - Identifier of the genome it was copied from, if any
    /// * `genes` - Gene values, each in `[0, 255]`
    ///
    /// # Returns
    ///
    /// A genome zero-padded to a whole number of chromosomes, or an error if a
    /// gene is out of range or there are no genes.
    pub fn new(
        id: DnaId,
        parent_id: Option<DnaId>,
        genes: impl IntoIterator<Item = i64>,
    ) -> Result<Self, DnaError> {
        let genes = genes
            .into_iter()
            .map(|gene| u8::try_from(gene).map_err(|_| DnaError::GeneOutOfRange(gene)))
            .collect::<Result<Vec<_>, _>>()?;
        if genes.is_empty() {
            return Err(DnaError::Empty);
        }
        Ok(Self::from_bytes(id, parent_id, genes))
    }

    /// Builds a genome from bytes, zero-padding the last chromosome.
    pub fn from_bytes(id: DnaId, parent_id: Option<DnaId>, mut genes: Vec<u8>) -> Self {
        let chromosomes = genes.len().div_ceil(CHROMOSOME_SIZE).max(1);
        genes.resize(chromosomes * CHROMOSOME_SIZE, 0);
        Self {
            id,
            parent_id,
            genes,
        }
    }

    /// Parses the `{001_002_...}` encoding produced by [`Display`](fmt::Display).
    ///
    /// Genes are separated by single underscores. Whitespace may also separate
    /// them, so one chromosome per line is accepted too. An empty gene between
    /// two underscores is rejected.
    pub fn parse(id: DnaId, parent_id: Option<DnaId>, text: &str) -> Result<Self, DnaError> {
        let inner = text
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| DnaError::MissingBraces(text.to_string()))?;
        let genes = inner
            .split_whitespace()
            .flat_map(|chunk| chunk.split('_'))
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| DnaError::InvalidGene(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(id, parent_id, genes)
    }

    /// Creates a random founder genome.
    pub fn random(id: DnaId, params: &Params, rng: &mut impl Rng) -> Self {
        let genes = (0..params.founder_chromosomes * CHROMOSOME_SIZE)
            .map(|_| rng.random::<u8>())
            .collect();
        Self::from_bytes(id, None, genes)
    }

    /// Identifier of this genome.
    pub fn id(&self) -> DnaId {
        self.id
    }

    /// Identifier of the genome this one was copied from.
    pub fn parent_id(&self) -> Option<DnaId> {
        self.parent_id
    }

    /// All genes, a whole number of chromosomes long.
    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    /// Iterates over the chromosomes, head first.
    pub fn chromosomes(&self) -> impl Iterator<Item = Chromosome> + '_ {
        self.genes.chunks(CHROMOSOME_SIZE).map(Chromosome::new)
    }

    /// Number of chromosomes.
    pub fn chromosome_count(&self) -> usize {
        self.genes.len() / CHROMOSOME_SIZE
    }

    /// Copies this genome with random copying errors.
    ///
    /// Each gene independently drifts by up to `gene_mutation_range` with
    /// probability `gene_mutation_rate`. With probability
    /// `structural_mutation_rate` a whole chromosome is duplicated or dropped.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier of the copy
    /// * `params` - Mutation rates
    /// * `rng` - Random source
    ///
    /// # Returns
    ///
    /// A new genome whose parent is this one.
    pub fn mutate(&self, id: DnaId, params: &Params, rng: &mut impl Rng) -> Self {
        let mut genes = self.genes.clone();
        let range = params.gene_mutation_range;
        for gene in &mut genes {
            if rng.random::<f64>() < params.gene_mutation_rate {
                let drift = rng.random_range(-range..=range);
                *gene = (i32::from(*gene) + drift).clamp(0, 255) as u8;
            }
        }

        if rng.random::<f64>() < params.structural_mutation_rate {
            let chromosomes = genes.len() / CHROMOSOME_SIZE;
            let chosen = rng.random_range(0..chromosomes) * CHROMOSOME_SIZE;
            let chromosome = chosen..chosen + CHROMOSOME_SIZE;
            if chromosomes == 1 || rng.random_bool(0.5) {
                let copy: Vec<u8> = genes[chromosome.clone()].to_vec();
                genes.splice(chromosome.end..chromosome.end, copy);
            } else {
                genes.drain(chromosome);
            }
        }

        Self::from_bytes(id, Some(self.id), genes)
    }

    /// Gene-level edit distance to another genome.
    ///
    /// Counts the single-gene insertions, deletions and substitutions needed
    /// to turn one gene sequence into the other.
    pub fn levenshtein_distance(&self, other: &Self) -> usize {
        levenshtein(&self.genes, &other.genes)
    }
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_genes(f, &self.genes)
    }
}

fn write_genes(f: &mut fmt::Formatter<'_>, genes: &[u8]) -> fmt::Result {
    f.write_str("{")?;
    for (i, gene) in genes.iter().enumerate() {
        if i > 0 {
            f.write_str("_")?;
        }
        write!(f, "{gene:03}")?;
    }
    f.write_str("}")
}

fn levenshtein(a: &[u8], b: &[u8]) -> usize {
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, x) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(x != y);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
