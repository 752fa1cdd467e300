//! Axis-aligned bounding box of a reference geometry.
//!
//! Plane constructors size their quadrilaterals from this box: the edge
//! constructor uses its diagonal length, the hull constructor its footprint.

use crate::{Point3, Vec3};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from `[min x, min y, min z, max x, max y, max z]`.
    pub fn from_array(bbox: [f64; 6]) -> Self {
        let [a, b, c, x, y, z] = bbox;
        Self::new(Point3::new(a, b, c), Point3::new(x, y, z))
    }

    /// A copy grown by `pad` in all directions.
    pub fn expanded(&self, pad: f64) -> Self {
        let offset = Vec3::repeat(pad);
        Self {
            min: self.min - offset,
            max: self.max + offset,
        }
    }

    /// Length of the min-to-max diagonal.
    pub fn diagonal(&self) -> f64 {
        nalgebra::distance(&self.min, &self.max)
    }
}
