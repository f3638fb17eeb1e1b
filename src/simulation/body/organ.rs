//! A single rigid segment of a body.

use serde::{Deserialize, Serialize};

use super::nerve::Nerve;
use crate::simulation::geometric_utils::{Segment, Vector};

/// Index of an organ inside its [`Body`](super::Body).
pub type OrganId = usize;

/// Genetic description of an organ, decoded from a chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganSpec {
    /// Length when fully grown.
    pub adult_length: f64,
    /// Thickness when fully grown.
    pub adult_thickness: f64,
    /// Color hue, cosmetic only.
    pub hue: u8,
    /// `1.0` or `-1.0`. Mirrored twins bend the opposite way.
    pub orientation: f64,
    /// Angle relative to the parent at rest, in radians.
    pub angle_at_rest: f64,
    /// How far the nerve signal bends the organ, in radians.
    pub amplitude: f64,
    /// Bend towards the target direction, in radians at full signal.
    pub skewing: f64,
    /// Signal source.
    pub nerve: Nerve,
}

impl OrganSpec {
    /// An organ with no adult length is never built.
    pub fn is_atrophic(&self) -> bool {
        self.adult_length <= 0.0
    }
}

/// A rigid segment with a growing size and a cached world position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organ {
    parent: Option<OrganId>,
    children: Vec<OrganId>,
    depth: usize,

    adult_length: f64,
    adult_thickness: f64,
    length: f64,
    thickness: f64,
    hue: u8,
    orientation: f64,
    angle_at_rest: f64,
    amplitude: f64,
    skewing: f64,
    nerve: Nerve,

    nerve_output: f64,
    relative_angle: f64,
    absolute_angle: f64,
    start_point: Vector,
    end_point: Vector,
    center_of_mass: Vector,
    mass: f64,
}

impl Organ {
    /// Creates a newborn organ.
    ///
    /// # Arguments
    ///
    /// * `spec` - Decoded genes
    /// * `parent` - Parent organ, `None` for the head
    /// * `depth` - Distance from the head
    /// * `birth_length` - Length at birth, capped by the adult length
    /// * `birth_thickness` - Thickness at birth, capped by the adult thickness
    pub fn new(
        spec: OrganSpec,
        parent: Option<OrganId>,
        depth: usize,
        birth_length: f64,
        birth_thickness: f64,
    ) -> Self {
        let length = birth_length.min(spec.adult_length);
        let thickness = birth_thickness.min(spec.adult_thickness);
        let relative_angle = spec.orientation * spec.angle_at_rest;
        Self {
            parent,
            children: Vec::new(),
            depth,
            adult_length: spec.adult_length,
            adult_thickness: spec.adult_thickness,
            length,
            thickness,
            hue: spec.hue,
            orientation: spec.orientation,
            angle_at_rest: spec.angle_at_rest,
            amplitude: spec.amplitude,
            skewing: spec.skewing,
            nerve: spec.nerve,
            nerve_output: 0.0,
            relative_angle,
            absolute_angle: relative_angle,
            start_point: Vector::ZERO,
            end_point: Vector::ZERO,
            center_of_mass: Vector::ZERO,
            mass: (length * thickness).max(1.0),
        }
    }

    /// Parent organ, `None` for the head.
    pub fn parent(&self) -> Option<OrganId> {
        self.parent
    }

    /// Child organs.
    pub fn children(&self) -> &[OrganId] {
        &self.children
    }

    /// Distance from the head in the organ tree.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Current length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Current thickness.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Length when fully grown.
    pub fn adult_length(&self) -> f64 {
        self.adult_length
    }

    /// Thickness when fully grown.
    pub fn adult_thickness(&self) -> f64 {
        self.adult_thickness
    }

    /// Color hue.
    pub fn hue(&self) -> u8 {
        self.hue
    }

    /// `1.0`, or `-1.0` for a mirrored twin.
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    /// Angle relative to the parent at rest, before orientation.
    pub fn angle_at_rest(&self) -> f64 {
        self.angle_at_rest
    }

    /// Current angle relative to the parent.
    pub fn relative_angle(&self) -> f64 {
        self.relative_angle
    }

    /// Current angle in world coordinates.
    pub fn absolute_angle(&self) -> f64 {
        self.absolute_angle
    }

    /// Last nerve output.
    pub fn nerve_output(&self) -> f64 {
        self.nerve_output
    }

    /// The signal source of this organ.
    pub fn nerve(&self) -> &Nerve {
        &self.nerve
    }

    /// Point attached to the parent.
    pub fn start_point(&self) -> Vector {
        self.start_point
    }

    /// Free end, where children attach.
    pub fn end_point(&self) -> Vector {
        self.end_point
    }

    /// Middle of the organ.
    pub fn center_of_mass(&self) -> Vector {
        self.center_of_mass
    }

    /// `length * thickness`, never below one.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mass once fully grown.
    pub fn adult_mass(&self) -> f64 {
        (self.adult_length * self.adult_thickness).max(1.0)
    }

    /// The organ as a world-space segment.
    pub fn segment(&self) -> Segment {
        Segment::between(self.start_point, self.end_point)
    }

    /// Returns `true` once length and thickness reached their adult values.
    pub fn is_fully_grown(&self) -> bool {
        self.length >= self.adult_length && self.thickness >= self.adult_thickness
    }

    pub(crate) fn add_child(&mut self, child: OrganId) {
        self.children.push(child);
    }

    /// Grows towards the adult size, never past it.
    pub(crate) fn grow(&mut self, rate: f64) {
        self.length = (self.length + rate).min(self.adult_length);
        self.thickness = (self.thickness + rate).min(self.adult_thickness);
    }

    pub(crate) fn grow_to_adult_form(&mut self) {
        self.length = self.adult_length;
        self.thickness = self.adult_thickness;
    }

    /// Fires the nerve and recomputes the relative angle.
    pub(crate) fn tick_nerve(&mut self, parent_signal: f64, target_signal: f64, pain_bend: f64) {
        self.nerve_output = self.nerve.tick(parent_signal);
        let bend = if self.parent.is_some() { pain_bend } else { 0.0 };
        self.relative_angle = self.orientation
            * (self.angle_at_rest + self.amplitude * self.nerve_output)
            + self.skewing * target_signal
            + bend;
    }

    /// Recomputes every cached geometric property from a new anchor.
    pub(crate) fn update(&mut self, start_point: Vector, parent_angle: f64) {
        self.absolute_angle = parent_angle + self.relative_angle;
        self.start_point = start_point;
        self.end_point = start_point + Vector::polar(self.absolute_angle, self.length);
        self.center_of_mass = (self.start_point + self.end_point) * 0.5;
        self.mass = (self.length * self.thickness).max(1.0);
    }

    /// Moves the organ without changing its shape.
    pub(crate) fn translate(&mut self, offset: Vector) {
        self.start_point += offset;
        self.end_point += offset;
        self.center_of_mass += offset;
    }
}
