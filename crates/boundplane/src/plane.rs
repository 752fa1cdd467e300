//! Finite planar quadrilaterals sized to a bounding box.

use boundplane_math::{triple_product, Aabb3, Dir3, Edge, HullPlane, Point3, Tolerance, Vec3};
use log::debug;

use crate::error::{GeometryError, Result};
use crate::settings::PlaneSettings;

/// Triangulation of the quad as 0-based corner indices.
pub const TRIANGLES: [[usize; 3]; 2] = [[1, 2, 0], [1, 3, 2]];

/// A finite plane: four coplanar corners `p0..p3`.
///
/// Every constructor checks that the corners are coplanar, so a `Plane`
/// value always satisfies that invariant. Corners are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    corners: [Point3; 4],
}

/// Check that four points are coplanar within `tolerance`.
///
/// Takes the edge vectors `(p1-p0), (p2-p0), (p3-p0)`, scales each to unit
/// length and requires the determinant of the resulting matrix to satisfy
/// `|det| < tolerance`. That determinant is the raw parallelepiped volume
/// divided by the product of the edge lengths, so it does not depend on the
/// size of the quad. Coincident corners count as coplanar. Returns the
/// normalized determinant on success.
pub fn check_coplanar(
    p0: &Point3,
    p1: &Point3,
    p2: &Point3,
    p3: &Point3,
    tolerance: f64,
) -> Result<f64> {
    let edges = [p1 - p0, p2 - p0, p3 - p0];
    let scale: f64 = edges.iter().map(|e| e.norm()).product();
    let determinant = if scale > 0.0 {
        triple_product(&edges[0], &edges[1], &edges[2]) / scale
    } else {
        0.0
    };
    if determinant.abs() < tolerance {
        Ok(determinant)
    } else {
        Err(GeometryError::NotCoplanar {
            determinant,
            tolerance,
        })
    }
}

fn unit_normal(normal: &Vec3) -> Result<Vec3> {
    if !normal.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::DegenerateNormal);
    }
    normal
        .try_normalize(f64::EPSILON)
        .ok_or(GeometryError::DegenerateNormal)
}

fn check_bbox(bbox: &Aabb3) -> Result<()> {
    let finite = bbox.min.iter().chain(bbox.max.iter()).all(|c| c.is_finite());
    if finite {
        Ok(())
    } else {
        Err(GeometryError::DegenerateBoundingBox)
    }
}

impl Plane {
    /// Create a plane from explicit corners, checking coplanarity.
    pub fn from_corners(corners: [Point3; 4], settings: &PlaneSettings) -> Result<Self> {
        settings.validate()?;
        let [p0, p1, p2, p3] = &corners;
        check_coplanar(p0, p1, p2, p3, settings.planarity_tolerance)?;
        Ok(Self { corners })
    }

    /// Create a plane containing `edge` and spanning `normal`, sized to `bbox`.
    ///
    /// The edge is extended by the box diagonal at both ends, and the
    /// extended endpoints are offset by `±diagonal * normal`:
    ///
    /// ```text
    /// p0 = e0' + d*n    p3 = e1' + d*n
    ///   |                 |
    ///   e0' ---edge---- e1'
    ///   |                 |
    /// p1 = e0' - d*n    p2 = e1' - d*n
    /// ```
    ///
    /// `normal` need not be unit length. A zero-volume `bbox` is rejected
    /// because it would give the quad no extent.
    pub fn from_edge(
        edge: &Edge,
        normal: &Vec3,
        bbox: &Aabb3,
        settings: &PlaneSettings,
    ) -> Result<Self> {
        check_bbox(bbox)?;
        let dist_diag = bbox.diagonal();
        if dist_diag <= 0.0 {
            return Err(GeometryError::DegenerateBoundingBox);
        }

        let dir = edge.direction().ok_or(GeometryError::DegenerateEdge)?;
        let n = unit_normal(normal)?;
        if Tolerance::DEFAULT.is_zero(dir.cross(&n).norm()) {
            return Err(GeometryError::NormalParallelToEdge);
        }

        let e0 = edge.start - dist_diag * dir.into_inner();
        let e1 = edge.end + dist_diag * dir.into_inner();
        let offset = dist_diag * n;

        debug!("plane from edge: diagonal {dist_diag:.6}, direction {:?}", dir.as_ref());
        Self::from_corners(
            [e0 + offset, e0 - offset, e1 - offset, e1 + offset],
            settings,
        )
    }

    /// Create a plane on a hull face, covering the padded footprint of `bbox`.
    ///
    /// The footprint lies across the two axes least aligned with the hull
    /// normal (X and Y for a mostly-vertical normal). Its padded corners are
    /// moved along the remaining axis until they meet the hull plane, so all
    /// four corners lie exactly on it. Corner order is row-major:
    /// `p0` = (low, low), `p1` = (high, low), `p2` = (low, high),
    /// `p3` = (high, high).
    pub fn from_hull_plane(
        hull: &HullPlane,
        bbox: &Aabb3,
        settings: &PlaneSettings,
    ) -> Result<Self> {
        settings.validate()?;
        check_bbox(bbox)?;
        let n = unit_normal(&hull.normal)?;
        let offset = hull.offset / hull.normal.norm();
        let plane_point = Point3::from(-offset * n);

        // Project along the dominant normal axis so the division below is
        // bounded: |n[k]| >= 1/sqrt(3) for a unit normal.
        let k = n.iamax();
        let (i, j) = ((k + 1) % 3, (k + 2) % 3);

        let padded = bbox.expanded(settings.padding);
        let onto_plane = |u: f64, v: f64| -> Point3 {
            let mut p = padded.min;
            p[i] = u;
            p[j] = v;
            p[k] = plane_point[k]
                - (n[i] * (u - plane_point[i]) + n[j] * (v - plane_point[j])) / n[k];
            p
        };

        let (lo, hi) = (padded.min, padded.max);
        debug!(
            "plane from hull: normal {:?}, offset {offset:.6}, footprint axes ({i}, {j})",
            n
        );
        Self::from_corners(
            [
                onto_plane(lo[i], lo[j]),
                onto_plane(hi[i], lo[j]),
                onto_plane(lo[i], hi[j]),
                onto_plane(hi[i], hi[j]),
            ],
            settings,
        )
    }

    /// Create one plane per hull face, all sized to the same `bbox`.
    pub fn from_hull_planes(
        hull: &[HullPlane],
        bbox: &Aabb3,
        settings: &PlaneSettings,
    ) -> Result<Vec<Self>> {
        hull.iter()
            .map(|h| Self::from_hull_plane(h, bbox, settings))
            .collect()
    }

    /// All four corners in order.
    pub fn corners(&self) -> &[Point3; 4] {
        &self.corners
    }

    /// First corner.
    pub fn p0(&self) -> &Point3 {
        &self.corners[0]
    }

    /// Second corner.
    pub fn p1(&self) -> &Point3 {
        &self.corners[1]
    }

    /// Third corner.
    pub fn p2(&self) -> &Point3 {
        &self.corners[2]
    }

    /// Fourth corner.
    pub fn p3(&self) -> &Point3 {
        &self.corners[3]
    }

    /// Triangulation used when the plane is exported, as 0-based indices.
    pub fn triangles(&self) -> [[usize; 3]; 2] {
        TRIANGLES
    }

    /// Average of the four corners.
    pub fn centroid(&self) -> Point3 {
        let sum: Vec3 = self.corners.iter().map(|p| p.coords).sum();
        Point3::from(sum / 4.0)
    }

    /// Unit normal of the supporting plane, or `None` if the quad has no area.
    pub fn normal(&self) -> Option<Dir3> {
        let [p0, p1, p2, p3] = &self.corners;
        let a = (p1 - p0).cross(&(p2 - p0));
        let b = (p1 - p0).cross(&(p3 - p0));
        let n = if a.norm_squared() >= b.norm_squared() { a } else { b };
        Dir3::try_new(n, Tolerance::DEFAULT.linear)
    }

    /// Signed distance from `point` to the supporting plane.
    pub fn distance_to(&self, point: &Point3) -> Option<f64> {
        self.normal().map(|n| n.dot(&(point - self.p0())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scenario_bbox() -> Aabb3 {
        Aabb3::from_array([-1.0, -1.0, -1.0, 2.0, 1.0, 1.0])
    }

    fn assert_planar(plane: &Plane) {
        let [p0, p1, p2, p3] = plane.corners();
        if let Err(e) = check_coplanar(p0, p1, p2, p3, 1e-10) {
            panic!("{e}");
        }
    }

    #[test]
    fn test_edge_scenario() {
        let edge = Edge::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let bbox = scenario_bbox();
        let plane = Plane::from_edge(&edge, &Vec3::z(), &bbox, &PlaneSettings::default()).unwrap();
        assert_planar(&plane);

        let d = bbox.diagonal();
        assert_relative_eq!(*plane.p0(), Point3::new(-d, 0.0, d));
        assert_relative_eq!(*plane.p1(), Point3::new(-d, 0.0, -d));
        assert_relative_eq!(*plane.p2(), Point3::new(1.0 + d, 0.0, -d));
        assert_relative_eq!(*plane.p3(), Point3::new(1.0 + d, 0.0, d));

        // Extends past the box diagonal beyond both edge endpoints
        assert!(plane.corners().iter().all(|p| p.x < -d + 1e-12 || p.x > 1.0 + d - 1e-12));
        assert!(plane.p3().x - 1.0 >= d - 1e-12);
        assert!(-plane.p0().x >= d - 1e-12);

        let n = plane.normal().unwrap();
        assert_relative_eq!(n.y.abs(), 1.0);
        assert_relative_eq!(plane.distance_to(&Point3::new(0.5, 0.0, 0.0)).unwrap(), 0.0);
    }

    #[test]
    fn test_edge_normal_is_normalized() {
        let edge = Edge::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let s = PlaneSettings::default();
        let a = Plane::from_edge(&edge, &Vec3::z(), &scenario_bbox(), &s).unwrap();
        let b = Plane::from_edge(&edge, &Vec3::new(0.0, 0.0, 5.0), &scenario_bbox(), &s).unwrap();
        for (p, q) in a.corners().iter().zip(b.corners()) {
            assert_relative_eq!(*p, *q, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_edge_oblique_is_planar() {
        let edge = Edge::new(Point3::new(0.3, -0.2, 0.1), Point3::new(1.7, 0.9, -0.4));
        let normal = Vec3::new(0.2, -0.5, 0.8);
        let bbox = Aabb3::from_array([-2.0, -1.5, -1.0, 2.5, 1.0, 3.0]);
        let plane = Plane::from_edge(&edge, &normal, &bbox, &PlaneSettings::default()).unwrap();
        assert_planar(&plane);
        // The original edge lies in the plane
        assert!(plane.distance_to(&edge.start).unwrap().abs() < 1e-9);
        assert!(plane.distance_to(&edge.end).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_edge_zero_volume_bbox_rejected() {
        let edge = Edge::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        let p = Point3::new(0.5, 0.5, 0.5);
        let s = PlaneSettings::default();
        let result = Plane::from_edge(&edge, &Vec3::z(), &Aabb3::new(p, p), &s);
        assert_eq!(result, Err(GeometryError::DegenerateBoundingBox));
    }

    #[test]
    fn test_edge_degenerate_inputs() {
        let s = PlaneSettings::default();
        let bbox = scenario_bbox();
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(
            Plane::from_edge(&Edge::new(p, p), &Vec3::z(), &bbox, &s),
            Err(GeometryError::DegenerateEdge)
        );

        let edge = Edge::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(
            Plane::from_edge(&edge, &Vec3::zeros(), &bbox, &s),
            Err(GeometryError::DegenerateNormal)
        );
        assert_eq!(
            Plane::from_edge(&edge, &Vec3::new(f64::NAN, 0.0, 1.0), &bbox, &s),
            Err(GeometryError::DegenerateNormal)
        );
        assert_eq!(
            Plane::from_edge(&edge, &Vec3::new(-2.0, 0.0, 0.0), &bbox, &s),
            Err(GeometryError::NormalParallelToEdge)
        );
    }

    #[test]
    fn test_hull_corners_on_plane() {
        let hull = HullPlane::from_normal_and_point(
            Vec3::new(0.2, -0.3, 0.9),
            &Point3::new(0.5, 0.25, 1.0),
        )
        .unwrap();
        let bbox = scenario_bbox();
        let plane = Plane::from_hull_plane(&hull, &bbox, &PlaneSettings::default()).unwrap();
        assert_planar(&plane);

        let origin = hull.point_on_plane();
        for p in plane.corners() {
            assert!(hull.normal.dot(&(p - origin)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hull_footprint_is_padded() {
        // Horizontal plane z = 0.5
        let hull = HullPlane::new(Vec3::z(), -0.5);
        let bbox = scenario_bbox();
        let plane = Plane::from_hull_plane(&hull, &bbox, &PlaneSettings::default()).unwrap();
        assert_relative_eq!(*plane.p0(), Point3::new(-2.0, -2.0, 0.5));
        assert_relative_eq!(*plane.p1(), Point3::new(3.0, -2.0, 0.5));
        assert_relative_eq!(*plane.p2(), Point3::new(-2.0, 2.0, 0.5));
        assert_relative_eq!(*plane.p3(), Point3::new(3.0, 2.0, 0.5));

        let plane = Plane::from_hull_plane(&hull, &bbox, &PlaneSettings::with_padding(0.0)).unwrap();
        assert_relative_eq!(*plane.p0(), Point3::new(-1.0, -1.0, 0.5));
        assert_relative_eq!(*plane.p3(), Point3::new(2.0, 1.0, 0.5));
    }

    #[test]
    fn test_hull_vertical_plane() {
        // x = 1 has no Z component, the footprint switches to the Y/Z axes
        let hull = HullPlane::new(Vec3::x(), -1.0);
        let s = PlaneSettings::default();
        let plane = Plane::from_hull_plane(&hull, &scenario_bbox(), &s).unwrap();
        assert_planar(&plane);
        assert!(plane.corners().iter().all(|p| (p.x - 1.0).abs() < 1e-12));
        assert_relative_eq!(*plane.p0(), Point3::new(1.0, -2.0, -2.0));
        assert_relative_eq!(*plane.p3(), Point3::new(1.0, 2.0, 2.0));
    }

    #[test]
    fn test_hull_non_unit_normal() {
        // 2z - 1 = 0 is the plane z = 0.5
        let hull = HullPlane::new(Vec3::new(0.0, 0.0, 2.0), -1.0);
        let s = PlaneSettings::default();
        let plane = Plane::from_hull_plane(&hull, &scenario_bbox(), &s).unwrap();
        assert!(plane.corners().iter().all(|p| (p.z - 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_hull_zero_volume_bbox() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let hull = HullPlane::new(Vec3::new(1.0, 1.0, 1.0).normalize(), -1.0);
        let s = PlaneSettings::default();
        let plane = Plane::from_hull_plane(&hull, &Aabb3::new(p, p), &s).unwrap();
        assert_planar(&plane);
        assert!(plane.normal().is_some());
    }

    #[test]
    fn test_hull_planes_of_cube() {
        let bbox = Aabb3::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let faces = [
            HullPlane::new(Vec3::x(), -1.0),
            HullPlane::new(-Vec3::x(), 0.0),
            HullPlane::new(Vec3::y(), -1.0),
            HullPlane::new(-Vec3::y(), 0.0),
            HullPlane::new(Vec3::z(), -1.0),
            HullPlane::new(-Vec3::z(), 0.0),
        ];
        let planes = Plane::from_hull_planes(&faces, &bbox, &PlaneSettings::default()).unwrap();
        assert_eq!(planes.len(), 6);
        for (plane, face) in planes.iter().zip(&faces) {
            let n = plane.normal().unwrap();
            assert_relative_eq!(n.dot(&face.normal).abs(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_from_corners_rejects_non_planar() {
        let s = PlaneSettings::default();
        let p0 = Point3::origin();
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);
        assert!(Plane::from_corners([p0, p1, p2, Point3::new(1.0, 1.0, 0.0)], &s).is_ok());

        // Both signs of the volume must be rejected
        for z in [0.25, -0.25] {
            let err = Plane::from_corners([p0, p1, p2, Point3::new(1.0, 1.0, z)], &s).unwrap_err();
            match err {
                GeometryError::NotCoplanar { determinant, tolerance } => {
                    // Volume 0.25 over edge lengths 1, 1 and |(1, 1, 0.25)|
                    assert_relative_eq!(determinant.abs(), 0.25 / 2.0625_f64.sqrt());
                    assert_eq!(tolerance, 1e-9);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_check_coplanar_tolerance() {
        let p0 = Point3::origin();
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let p2 = Point3::new(0.0, 1.0, 0.0);
        let p3 = Point3::new(1.0, 1.0, 1e-6);
        assert!(check_coplanar(&p0, &p1, &p2, &p3, 1e-9).is_err());
        assert!(check_coplanar(&p0, &p1, &p2, &p3, 1e-5).is_ok());
    }

    #[test]
    fn test_check_coplanar_is_scale_free() {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.5),
        ];
        let det = |s: f64| {
            let [p0, p1, p2, p3] = corners.map(|p| p * s);
            match check_coplanar(&p0, &p1, &p2, &p3, 1e-9) {
                Err(GeometryError::NotCoplanar { determinant, .. }) => determinant,
                other => panic!("unexpected result: {other:?}"),
            }
        };
        assert_relative_eq!(det(1000.0), det(1.0), epsilon = 1e-12);
        assert_relative_eq!(det(1e-3), det(1.0), epsilon = 1e-12);

        // Repeated corners span no volume
        let p = Point3::new(5.0, 5.0, 5.0);
        assert_eq!(check_coplanar(&p, &p, &p, &p, 1e-9), Ok(0.0));
    }

    #[test]
    fn test_constructors_at_large_scale() {
        let s = PlaneSettings::default();
        for scale in [1.0, 10.0, 100.0, 1000.0, 1e5] {
            let edge = Edge::new(
                Point3::new(0.3, -0.2, 0.1) * scale,
                Point3::new(1.7, 0.9, -0.4) * scale,
            );
            let normal = Vec3::new(0.2, -0.5, 0.8);
            let bbox = Aabb3::from_array([0.0, 0.0, 0.0, scale, 2.0 * scale, 3.0 * scale]);

            let plane = Plane::from_edge(&edge, &normal, &bbox, &s)
                .unwrap_or_else(|e| panic!("edge plane at scale {scale}: {e}"));
            assert_planar(&plane);

            let hull = HullPlane::from_normal_and_point(normal, &edge.start).unwrap();
            let plane = Plane::from_hull_plane(&hull, &bbox, &s)
                .unwrap_or_else(|e| panic!("hull plane at scale {scale}: {e}"));
            assert_planar(&plane);
        }

        // A visibly bent quad is still rejected at that size
        let bent = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1000.0, 0.0, 0.0),
            Point3::new(0.0, 1000.0, 0.0),
            Point3::new(1000.0, 1000.0, 1.0),
        ];
        assert!(matches!(
            Plane::from_corners(bent, &s),
            Err(GeometryError::NotCoplanar { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let s = PlaneSettings::default();
        let corners = [
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, 2.0),
            Point3::new(0.0, 2.0, 2.0),
            Point3::new(2.0, 2.0, 2.0),
        ];
        let plane = Plane::from_corners(corners, &s).unwrap();
        assert_eq!(plane.corners(), &corners);
        assert_eq!(plane.centroid(), Point3::new(1.0, 1.0, 2.0));
        assert_eq!(plane.triangles(), [[1, 2, 0], [1, 3, 2]]);
        assert_relative_eq!(plane.normal().unwrap().into_inner(), Vec3::z());
        assert_relative_eq!(plane.distance_to(&Point3::new(7.0, -3.0, 5.0)).unwrap(), 3.0);
    }
}
