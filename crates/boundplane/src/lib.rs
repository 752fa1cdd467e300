#![warn(missing_docs)]

//! Finite bounding planes for boundplane.
//!
//! Builds planar quadrilaterals that approximate an infinite plane over a
//! region of interest, either from a directed edge plus a normal or from a
//! convex hull face equation, each sized to an axis-aligned bounding box.
//! Planes are validated for coplanarity on construction and can be saved to
//! and loaded from Wavefront OBJ files.
//!
//! # Example
//!
//! ```no_run
//! use boundplane::{Aabb3, Edge, Plane, PlaneSettings, Point3, Vec3};
//!
//! let bbox = Aabb3::from_array([-1.0, -1.0, -1.0, 2.0, 1.0, 1.0]);
//! let edge = Edge::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
//! let settings = PlaneSettings::default();
//!
//! let plane = Plane::from_edge(&edge, &Vec3::z(), &bbox, &settings).unwrap();
//! plane.save_to_file("plane.obj").unwrap();
//!
//! let loaded = Plane::load_from_file("plane.obj", &settings).unwrap();
//! assert_eq!(loaded, plane);
//! ```

mod error;
mod obj;
mod plane;
mod settings;

pub use boundplane_math::{triple_product, Aabb3, Dir3, Edge, HullPlane, Point3, Tolerance, Vec3};
pub use error::{GeometryError, PlaneFileError, Result};
pub use plane::{check_coplanar, Plane, TRIANGLES};
pub use settings::{
    PlaneSettings, DEFAULT_BOUNDS_PADDING, DEFAULT_MERGE_TOLERANCE, DEFAULT_PLANARITY_TOLERANCE,
};
