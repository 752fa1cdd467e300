//! Wavefront OBJ import/export of planes.
//!
//! A plane file holds the four corners as `v` records in `p0..p3` order,
//! followed by the two triangles of [`TRIANGLES`] as 1-based `f` records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use boundplane_math::Point3;
use log::{debug, warn};

use crate::error::PlaneFileError;
use crate::plane::{Plane, TRIANGLES};
use crate::settings::PlaneSettings;

/// Name of the object appended on load that references every vertex record.
const ALL_VERTICES: &str = "boundplane_all_vertices";

/// Keep the first of every group of points closer than `tolerance`.
///
/// Stops once `limit` distinct points are collected, so a large mesh costs
/// `O(n * limit)` rather than `O(n^2)`.
fn merge_vertices(
    points: impl IntoIterator<Item = Point3>,
    tolerance: f64,
    limit: usize,
) -> Vec<Point3> {
    let mut merged: Vec<Point3> = Vec::with_capacity(limit);
    for p in points {
        if merged.len() == limit {
            break;
        }
        if !merged.iter().any(|q| (p - q).norm() <= tolerance) {
            merged.push(p);
        }
    }
    merged
}

/// Append an object with one point element per `v` record to `text`.
///
/// The parser only reports positions that some element references. The
/// extra object references each record once, in file order.
fn reference_all_vertices(text: &str) -> String {
    let count = text
        .lines()
        .filter(|line| line.split_whitespace().next() == Some("v"))
        .count();
    let mut out = String::with_capacity(text.len() + 32 + count * 8);
    out.push_str(text);
    out.push_str(&format!("\no {ALL_VERTICES}\n"));
    for i in 1..=count {
        out.push_str(&format!("f {i}\n"));
    }
    out
}

impl Plane {
    /// Load a plane from an OBJ file.
    ///
    /// The path is made absolute and parsed with `tobj`. Every `v` record is
    /// read in file order, whether or not a face references it. Records are
    /// merged within `settings.merge_tolerance` and the first four distinct
    /// vertices become the corners, so a saved plane loads back unchanged.
    ///
    /// # Errors
    ///
    /// * [`PlaneFileError::Io`] if the file cannot be read.
    /// * [`PlaneFileError::Parse`] if the parser rejects the file.
    /// * [`PlaneFileError::MalformedInput`] for fewer than four distinct vertices.
    /// * [`PlaneFileError::Geometry`] if the corners are not coplanar.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        settings: &PlaneSettings,
    ) -> Result<Self, PlaneFileError> {
        settings.validate()?;
        let path = std::path::absolute(path.as_ref())?;
        let text = reference_all_vertices(&fs::read_to_string(&path)?);

        let options = tobj::LoadOptions {
            single_index: false,
            triangulate: false,
            ..Default::default()
        };
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let (models, materials) =
            tobj::load_obj_buf(&mut text.as_bytes(), &options, |mtl| {
                tobj::load_mtl(dir.join(mtl))
            })
            .map_err(|e| PlaneFileError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;
        if let Err(e) = materials {
            warn!("{}: {e}", path.display());
        }

        let positions = models
            .iter()
            .filter(|m| m.name == ALL_VERTICES)
            .flat_map(|m| m.mesh.positions.chunks_exact(3))
            .map(|c| Point3::new(c[0], c[1], c[2]));
        let vertices = merge_vertices(positions, settings.merge_tolerance, 5);

        let corners: [Point3; 4] = match vertices.as_slice() {
            [p0, p1, p2, p3] => [*p0, *p1, *p2, *p3],
            [p0, p1, p2, p3, ..] => {
                warn!(
                    "{}: more than four distinct vertices, using the first four",
                    path.display()
                );
                [*p0, *p1, *p2, *p3]
            }
            _ => {
                return Err(PlaneFileError::MalformedInput {
                    path,
                    found: vertices.len(),
                })
            }
        };

        debug!("loaded plane from {}", path.display());
        Ok(Self::from_corners(corners, settings)?)
    }

    /// Save this plane as an OBJ file, creating or truncating `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PlaneFileError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_obj(&mut writer)?;
        writer.flush()?;
        debug!("saved plane to {}", path.as_ref().display());
        Ok(())
    }

    /// Write this plane in OBJ format to `writer`.
    pub fn write_obj<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.to_obj_string().as_bytes())
    }

    /// This plane in OBJ format.
    ///
    /// Coordinates use the shortest representation that parses back to the
    /// same `f64`, so the output is exact and deterministic.
    pub fn to_obj_string(&self) -> String {
        let mut out = String::new();
        for p in self.corners() {
            out.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
        }
        for [a, b, c] in TRIANGLES {
            // OBJ indices are 1-based
            out.push_str(&format!("f {} {} {}\n", a + 1, b + 1, c + 1));
        }
        out
    }
}
