//! Directed line segments.

use crate::{Dir3, Point3, Vec3};

/// A directed segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// First endpoint.
    pub start: Point3,
    /// Second endpoint.
    pub end: Point3,
}

impl Edge {
    /// Create an edge between two points.
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`.
    pub fn vector(&self) -> Vec3 {
        self.end - self.start
    }

    /// Unit direction from `start` to `end`, or `None` for a zero-length edge.
    pub fn direction(&self) -> Option<Dir3> {
        Dir3::try_new(self.vector(), f64::EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction() {
        let e = Edge::new(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 4.0, 1.0));
        assert_relative_eq!(e.vector(), Vec3::new(0.0, 3.0, 0.0));
        let d = e.direction().unwrap();
        assert_relative_eq!(d.into_inner(), Vec3::y());
    }

    #[test]
    fn test_zero_length_has_no_direction() {
        let p = Point3::new(2.0, -1.0, 0.5);
        let e = Edge::new(p, p);
        assert!(e.direction().is_none());
    }
}
