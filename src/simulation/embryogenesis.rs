//! Turns a genome into a body.
//!
//! The head comes from the first chromosome. The remaining chromosomes are
//! consumed breadth-first, two per parent organ: each pair builds the twin
//! organs attached to that parent. A mirrored chromosome drives both twins,
//! with the second twin bending the opposite way.
//!
//! Development is deterministic: the same genome always yields the same body.

use std::collections::VecDeque;

use super::body::nerve::Nerve;
use super::body::organ::{OrganId, OrganSpec};
use super::body::{Body, BodyTraits};
use super::dna::{Chromosome, Dna};
use super::params::Params;

/// Development of one genome.
pub struct Embryo<'a> {
    dna: &'a Dna,
}

impl<'a> Embryo<'a> {
    /// Prepares the development of `dna`.
    pub fn new(dna: &'a Dna) -> Self {
        Self { dna }
    }

    /// Builds the newborn body.
    ///
    /// Atrophic organs are skipped together with the branch they would carry.
    /// Development stops when the genome runs out, when the body reaches
    /// `max_organs`, or past `max_body_depth`.
    pub fn develop(&self, params: &Params) -> Body {
        let mut chromosomes = self.dna.chromosomes();
        let head = chromosomes.next().unwrap_or_default();
        let mut body = Body::new(head_spec(head, params), head_traits(head, params), params);

        let mut parents: VecDeque<OrganId> = VecDeque::from([0]);
        'development: while let Some(parent) = parents.pop_front() {
            if body.organs()[parent].depth() >= params.max_body_depth {
                continue;
            }
            let Some(first) = chromosomes.next() else {
                break;
            };
            let second = chromosomes.next();
            for spec in twin_specs(first, second, params) {
                if body.organs().len() >= params.max_organs {
                    break 'development;
                }
                if spec.is_atrophic() {
                    continue;
                }
                if let Some(child) = body.add_organ(parent, spec, params) {
                    parents.push_back(child);
                }
            }
        }
        body
    }
}

/// Head chromosome: length, thickness, hue, metabolism, energy to children, egg gene.
fn head_spec(chromosome: Chromosome, params: &Params) -> OrganSpec {
    OrganSpec {
        adult_length: f64::from(chromosome.gene(0)),
        adult_thickness: f64::from(chromosome.gene(1)),
        hue: chromosome.gene(2),
        orientation: 1.0,
        angle_at_rest: 0.0,
        amplitude: params.head_wave_amplitude_degrees.to_radians(),
        skewing: 0.0,
        nerve: Nerve::oscillator(params.wave_frequency * metabolic_rate(chromosome)),
    }
}

fn head_traits(chromosome: Chromosome, params: &Params) -> BodyTraits {
    let egg_gene = chromosome.gene(5);
    BodyTraits {
        metabolic_rate: metabolic_rate(chromosome),
        energy_to_children: (f64::from(chromosome.gene(4)) + 1.0) / 256.0
            * params.creature_initial_energy,
        egg_velocity: f64::from(egg_gene) * params.egg_velocity_per_gene,
        egg_interval: params.egg_interval_base + u64::from(egg_gene) * params.egg_interval_step,
    }
}

fn metabolic_rate(head: Chromosome) -> f64 {
    f64::from(head.gene(3)) * 3.0 / 255.0
}

/// Builds the organs for one parent from a chromosome pair.
///
/// If the first chromosome is mirrored both twins follow the second one;
/// otherwise, if the second is mirrored both follow the first.
fn twin_specs(first: Chromosome, second: Option<Chromosome>, params: &Params) -> Vec<OrganSpec> {
    let Some(second) = second else {
        return vec![segment_spec(first, 1.0, params)];
    };
    let (left, right) = if first.is_mirror() {
        (second, second)
    } else if second.is_mirror() {
        (first, first)
    } else {
        (first, second)
    };
    vec![
        segment_spec(left, 1.0, params),
        segment_spec(right, -1.0, params),
    ]
}

/// Segment chromosome: control, length, thickness, hue, angle at rest, motion.
///
/// The control gene holds the mirror bit, the nerve kind bit, and a six-bit
/// nerve parameter. The motion gene packs the amplitude in its high nibble and
/// the skewing in its low nibble.
fn segment_spec(chromosome: Chromosome, orientation: f64, params: &Params) -> OrganSpec {
    let control = chromosome.gene(0);
    let nerve_parameter = control >> 2;
    let nerve = if control & 0b10 == 0 {
        Nerve::reflex(usize::from(nerve_parameter), 1.0)
    } else {
        Nerve::oscillator(params.wave_frequency * (1.0 + f64::from(nerve_parameter) / 16.0))
    };

    let angle_gene = f64::from(chromosome.gene(4)) / 255.0;
    let motion = chromosome.gene(5);
    OrganSpec {
        adult_length: f64::from(chromosome.gene(1)),
        adult_thickness: f64::from(chromosome.gene(2)),
        hue: chromosome.gene(3),
        orientation,
        angle_at_rest: (angle_gene * 2.0 - 1.0) * params.max_angle_at_rest_degrees.to_radians(),
        amplitude: f64::from(motion >> 4) * 4f64.to_radians(),
        skewing: (f64::from(motion & 0x0F) - 7.5) * 2f64.to_radians(),
        nerve,
    }
}
