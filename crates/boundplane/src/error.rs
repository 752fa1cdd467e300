//! Error types for plane construction and plane files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing a plane.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The four corners do not lie in a common plane.
    #[error("corners are not coplanar: |det| = {} exceeds {tolerance:e}", determinant.abs())]
    NotCoplanar {
        /// Determinant of the corner edge vectors scaled to unit length.
        determinant: f64,
        /// Tolerance the determinant was checked against.
        tolerance: f64,
    },

    /// The edge has zero length, so it has no direction.
    #[error("edge has zero length")]
    DegenerateEdge,

    /// The normal is zero or not finite.
    #[error("normal has zero length or is not finite")]
    DegenerateNormal,

    /// The normal is parallel to the edge, so the quad collapses to a line.
    #[error("normal is parallel to the edge")]
    NormalParallelToEdge,

    /// The bounding box has no extent or non-finite coordinates.
    #[error("bounding box has zero diagonal or non-finite coordinates")]
    DegenerateBoundingBox,

    /// Construction settings are out of range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors that can occur while reading or writing a plane file.
#[derive(Error, Debug)]
pub enum PlaneFileError {
    /// I/O error resolving, creating or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The OBJ parser rejected the file.
    #[error("failed to load/parse {}: {message}", path.display())]
    Parse {
        /// Absolute path of the file.
        path: PathBuf,
        /// Message reported by the parser.
        message: String,
    },

    /// The file holds fewer than four distinct vertices.
    #[error("{} has {found} distinct vertices, a plane needs 4", path.display())]
    MalformedInput {
        /// Absolute path of the file.
        path: PathBuf,
        /// Number of distinct vertices found.
        found: usize,
    },

    /// The vertices were read but do not form a valid plane.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for plane construction.
pub type Result<T> = std::result::Result<T, GeometryError>;
