#![warn(missing_docs)]

//! Math types for boundplane.
//!
//! Thin wrappers around nalgebra providing the geometric inputs of plane
//! construction: points, vectors, directions, tolerance constants,
//! axis-aligned boxes, directed edges and hull plane equations.

use nalgebra::{Matrix3, Unit, Vector3};

mod aabb;
mod edge;
mod hull;

pub use aabb::Aabb3;
pub use edge::Edge;
pub use hull::HullPlane;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Signed volume of the parallelepiped spanned by `a`, `b` and `c`.
///
/// This is the determinant of the 3x3 matrix with the three vectors as
/// columns. It is zero exactly when the vectors are linearly dependent.
pub fn triple_product(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    Matrix3::from_columns(&[*a, *b, *c]).determinant()
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 linear).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
