//! Articulated bodies and their swimming physics.
//!
//! A body is a tree of rigid [`Organ`]s rooted at the head. Organs are stored
//! in an arena ordered so that every parent precedes its children, which lets
//! a single forward pass update the whole tree.
//!
//! Each tick the organs bend according to their nerves, the body is recentered
//! so that bending alone cannot move it, and the momentum swept by the organs
//! is turned into forward motion along the mouth direction. The kinetic effort
//! of the bending is what the creature pays in energy.

pub mod mouth;
pub mod nerve;
pub mod organ;

use serde::{Deserialize, Serialize};

use self::organ::{Organ, OrganId, OrganSpec};
use super::geometric_utils::{BoundingBox, Vector, normalize_angle};
use super::params::Params;

/// Whole-body traits decoded from the head chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyTraits {
    /// Scales nerve frequencies and the energy cost of motion.
    pub metabolic_rate: f64,
    /// Energy handed to each egg.
    pub energy_to_children: f64,
    /// Speed at which eggs are thrown.
    pub egg_velocity: f64,
    /// Ticks between two eggs.
    pub egg_interval: u64,
}

/// An articulated body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    organs: Vec<Organ>,
    traits: BodyTraits,
    heading: f64,
    mass: f64,
    center_of_mass: Vector,
    radius: f64,
    bounding_box: BoundingBox,
}

impl Body {
    /// Creates a body made of a newborn head at the origin, heading along the x axis.
    pub fn new(head: OrganSpec, traits: BodyTraits, params: &Params) -> Self {
        let head = Organ::new(
            head,
            None,
            0,
            params.organ_birth_length,
            params.organ_birth_thickness,
        );
        let mut body = Self {
            organs: vec![head],
            traits,
            heading: 0.0,
            mass: 0.0,
            center_of_mass: Vector::ZERO,
            radius: 1.0,
            bounding_box: BoundingBox::default(),
        };
        body.update_geometry();
        body
    }

    /// Attaches a newborn organ to the end of `parent`.
    ///
    /// # Arguments
    ///
    /// * `parent` - Organ to attach to
    /// * `spec` - Decoded genes of the new organ
    /// * `params` - Birth sizes
    ///
    /// # Returns
    ///
    /// The id of the new organ, or `None` if `parent` does not exist.
    pub fn add_organ(&mut self, parent: OrganId, spec: OrganSpec, params: &Params) -> Option<OrganId> {
        let depth = self.organs.get(parent)?.depth() + 1;
        let id = self.organs.len();
        self.organs.push(Organ::new(
            spec,
            Some(parent),
            depth,
            params.organ_birth_length,
            params.organ_birth_thickness,
        ));
        self.organs[parent].add_child(id);
        self.update_geometry();
        Some(id)
    }

    /// All organs, head first and parents before children.
    pub fn organs(&self) -> &[Organ] {
        &self.organs
    }

    /// The head organ.
    pub fn head(&self) -> &Organ {
        &self.organs[0]
    }

    /// Start point of the head, the reference position of the body.
    pub fn position(&self) -> Vector {
        self.organs[0].start_point()
    }

    /// Base direction of the head in radians.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// End point of the head, where eggs are laid.
    pub fn neck_location(&self) -> Vector {
        self.organs[0].end_point()
    }

    /// Sum of the organ masses.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Sum of the fully grown organ masses.
    pub fn adult_mass(&self) -> f64 {
        self.organs.iter().map(Organ::adult_mass).sum()
    }

    /// Mass-weighted center of the organs.
    pub fn center_of_mass(&self) -> Vector {
        self.center_of_mass
    }

    /// Distance from the center of mass to the farthest organ tip, at least one.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Box around every organ.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Whole-body traits.
    pub fn traits(&self) -> &BodyTraits {
        &self.traits
    }

    /// Scales nerve frequencies and the energy cost of motion.
    pub fn metabolic_rate(&self) -> f64 {
        self.traits.metabolic_rate
    }

    /// Energy handed to each egg.
    pub fn energy_to_children(&self) -> f64 {
        self.traits.energy_to_children
    }

    /// Speed at which eggs are thrown.
    pub fn egg_velocity(&self) -> f64 {
        self.traits.egg_velocity
    }

    /// Ticks between two eggs.
    pub fn egg_interval(&self) -> u64 {
        self.traits.egg_interval
    }

    /// Places the head at `position` and points the body at `heading`.
    pub fn force_position(&mut self, position: Vector, heading: f64) {
        self.heading = normalize_angle(heading);
        let offset = position - self.position();
        self.organs[0].translate(offset);
        self.update_geometry();
    }

    /// Grows every organ to its adult size at once.
    pub fn grow_to_adult_form(&mut self) {
        for organ in &mut self.organs {
            organ.grow_to_adult_form();
        }
        self.update_geometry();
    }

    /// Advances the body by one tick.
    ///
    /// # Arguments
    ///
    /// * `direction` - Wanted swimming direction (the mouth direction)
    /// * `pain_bend` - Extra bend applied to every organ but the head, in radians
    /// * `params` - Physical constants
    ///
    /// # Returns
    ///
    /// The energy spent moving during this tick.
    pub fn tick(&mut self, direction: Vector, pain_bend: f64, params: &Params) -> f64 {
        let initial_center = self.center_of_mass;
        let previous: Vec<(Vector, Vector)> = self
            .organs
            .iter()
            .map(|organ| (organ.start_point(), organ.end_point()))
            .collect();

        let target_signal =
            Vector::polar(self.heading, 1.0).angle_to(direction) / std::f64::consts::PI;
        for organ in &mut self.organs {
            organ.grow(params.organ_growth_rate);
        }
        self.tick_nerves(target_signal, pain_bend);
        // changing shape alone never moves the body
        self.update_geometry_around(initial_center);

        let mut momentum = 0.0;
        let mut effort = 0.0;
        for (organ, (start, end)) in self.organs.iter().zip(&previous) {
            let sweep = (organ.start_point().distance_to(*start)
                + organ.end_point().distance_to(*end))
                / 2.0;
            momentum += organ.mass() * sweep;
            effort += 0.5 * organ.mass() * sweep * sweep;
        }

        let speed = params.propulsion * momentum / self.mass;
        self.translate(direction.normalize(speed));

        let max_turn = params.body_turn_rate_degrees.to_radians();
        let turn = Vector::polar(self.heading, 1.0)
            .angle_to(direction)
            .clamp(-max_turn, max_turn);
        self.heading = normalize_angle(self.heading + turn);
        self.update_geometry_around(self.center_of_mass);

        effort * self.traits.metabolic_rate * params.effort_energy_factor
    }

    /// Lays the organs out again, keeping the center of mass at `center`.
    fn update_geometry_around(&mut self, center: Vector) {
        self.update_geometry();
        self.translate(center - self.center_of_mass);
    }

    fn tick_nerves(&mut self, target_signal: f64, pain_bend: f64) {
        for index in 0..self.organs.len() {
            let parent_signal = self.organs[index]
                .parent()
                .map_or(0.0, |parent| self.organs[parent].nerve_output());
            self.organs[index].tick_nerve(parent_signal, target_signal, pain_bend);
        }
    }

    /// Recomputes organ positions top-down from the head, then the aggregates.
    fn update_geometry(&mut self) {
        for index in 0..self.organs.len() {
            let (anchor, parent_angle) = match self.organs[index].parent() {
                Some(parent) => (
                    self.organs[parent].end_point(),
                    self.organs[parent].absolute_angle(),
                ),
                None => (self.organs[index].start_point(), self.heading),
            };
            self.organs[index].update(anchor, parent_angle);
        }
        self.update_aggregates();
    }

    fn update_aggregates(&mut self) {
        self.mass = self.organs.iter().map(Organ::mass).sum();
        let weighted = self
            .organs
            .iter()
            .fold(Vector::ZERO, |sum, organ| sum + organ.center_of_mass() * organ.mass());
        self.center_of_mass = weighted * (1.0 / self.mass);
        self.radius = self
            .organs
            .iter()
            .flat_map(|organ| [organ.start_point(), organ.end_point()])
            .map(|point| point.distance_to(self.center_of_mass))
            .fold(1.0, f64::max);
        if let Some(bounding_box) = BoundingBox::around(
            self.organs
                .iter()
                .flat_map(|organ| [organ.start_point(), organ.end_point()]),
        ) {
            self.bounding_box = bounding_box;
        }
    }

    fn translate(&mut self, offset: Vector) {
        for organ in &mut self.organs {
            organ.translate(offset);
        }
        self.center_of_mass += offset;
        self.bounding_box.translate(offset);
    }
}
