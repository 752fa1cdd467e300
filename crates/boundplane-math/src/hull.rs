//! Plane equations of convex hull faces.

use crate::{Point3, Vec3};

/// A hull face as an infinite plane `normal · x + offset = 0`.
///
/// `normal` is expected to be unit length. With that, `-offset` is the
/// signed distance of the plane from the origin along `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullPlane {
    /// Plane normal, pointing out of the hull.
    pub normal: Vec3,
    /// Signed offset `D` of the equation.
    pub offset: f64,
}

impl HullPlane {
    /// Create a plane equation from a normal and offset.
    pub fn new(normal: Vec3, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Plane through `point` with the given `normal`.
    pub fn from_normal_and_point(normal: Vec3, point: &Point3) -> Option<Self> {
        let n = normal.try_normalize(f64::EPSILON)?;
        Some(Self::new(n, -n.dot(&point.coords)))
    }

    /// Plane through the triangle `a`, `b`, `c`.
    ///
    /// Counter-clockwise winding (seen from outside) yields the outward normal.
    /// Returns `None` if the points are collinear.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        Self::from_normal_and_point((b - a).cross(&(c - a)), a)
    }

    /// The point of the plane closest to the origin, `-offset * normal`.
    pub fn point_on_plane(&self) -> Point3 {
        Point3::from(-self.offset * self.normal)
    }
}
