//! Geometric primitives shared by the physics and the ecosystem.

use std::f64::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use geo::algorithm::{BoundingRect, Distance};
use geo::{Coord, Euclidean, Line, LineString, Point};
use serde::{Deserialize, Serialize};

/// A 2D vector in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vector {
    /// The null vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    pub const fn cartesian(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector from an angle in radians and a length.
    pub fn polar(angle: f64, length: f64) -> Self {
        Self::cartesian(length * angle.cos(), length * angle.sin())
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle from the x axis in radians, in `(-PI, PI]`.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Returns `true` if both components are zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Returns a vector with the same direction and the given length.
    ///
    /// The null vector stays null.
    pub fn normalize(self, length: f64) -> Self {
        let current = self.length();
        if current == 0.0 {
            return Self::ZERO;
        }
        self * (length / current)
    }

    /// Rotates the vector counterclockwise by `angle` radians.
    pub fn rotate_by(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::cartesian(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Distance between the points this and `other` point at.
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Signed angle in radians that rotates this vector onto `other`.
    ///
    /// Zero when either vector is null.
    pub fn angle_to(self, other: Self) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        self.cross(other).atan2(self.dot(other))
    }

    /// Converts to a `geo` point.
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

impl From<Vector> for Coord<f64> {
    fn from(v: Vector) -> Self {
        Coord { x: v.x, y: v.y }
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::cartesian(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::cartesian(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::cartesian(self.x * factor, self.y * factor)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::cartesian(-self.x, -self.y)
    }
}

/// A line segment described by its start point and its displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub start: Vector,
    /// Displacement from the start point to the end point.
    pub vector: Vector,
}

impl Segment {
    /// Creates a segment from a start point and a displacement.
    pub const fn new(start: Vector, vector: Vector) -> Self {
        Self { start, vector }
    }

    /// Creates a segment between two points.
    pub fn between(start: Vector, end: Vector) -> Self {
        Self::new(start, end - start)
    }

    /// End point.
    pub fn end(&self) -> Vector {
        self.start + self.vector
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.vector.length()
    }

    /// Middle point.
    pub fn midpoint(&self) -> Vector {
        self.start + self.vector * 0.5
    }

    /// Minimum Euclidean distance between the segment and a point.
    ///
    /// # Arguments
    ///
    /// * `point` - The point to measure from
    ///
    /// # Returns
    ///
    /// The distance to the closest point of the segment. Degenerate segments
    /// measure the distance to their start point.
    pub fn distance_to_point(&self, point: Vector) -> f64 {
        let line = Line::new(Coord::from(self.start), Coord::from(self.end()));
        Euclidean.distance(&point.to_point(), &line)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x.
    pub left: f64,
    /// Smallest y.
    pub bottom: f64,
    /// Largest x.
    pub right: f64,
    /// Largest y.
    pub top: f64,
}

impl BoundingBox {
    /// Smallest box containing all the points, or `None` if there are none.
    pub fn around(points: impl IntoIterator<Item = Vector>) -> Option<Self> {
        let line: LineString<f64> = points.into_iter().map(Coord::from).collect();
        line.bounding_rect().map(|rect| Self {
            left: rect.min().x,
            bottom: rect.min().y,
            right: rect.max().x,
            top: rect.max().y,
        })
    }

    /// Returns `true` if the point lies inside or on the border of the box.
    pub fn contains(&self, point: Vector) -> bool {
        (self.left..=self.right).contains(&point.x) && (self.bottom..=self.top).contains(&point.y)
    }

    /// Moves the box by `offset`.
    pub fn translate(&mut self, offset: Vector) {
        self.left += offset.x;
        self.right += offset.x;
        self.bottom += offset.y;
        self.top += offset.y;
    }
}

/// Normalizes an angle in radians to `(-PI, PI]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped == -PI { PI } else { wrapped }
}
