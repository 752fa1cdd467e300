//! Plane construction settings.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Default outward offset applied to box-derived corners.
pub const DEFAULT_BOUNDS_PADDING: f64 = 1.0;

/// Default maximum |determinant| of the unit-scaled corner edge vectors for
/// four corners to count as coplanar.
pub const DEFAULT_PLANARITY_TOLERANCE: f64 = 1e-9;

/// Default distance under which loaded vertices are merged.
pub const DEFAULT_MERGE_TOLERANCE: f64 = 1e-9;

/// Parameters shared by the plane constructors and the file loader.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneSettings {
    /// Outward offset applied to bounding-box-derived corners.
    pub padding: f64,
    /// Maximum |determinant| of the corner edge vectors, each scaled to unit
    /// length. Independent of the size of the quad.
    pub planarity_tolerance: f64,
    /// Vertices closer than this are treated as one when loading.
    pub merge_tolerance: f64,
}

impl Default for PlaneSettings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_BOUNDS_PADDING,
            planarity_tolerance: DEFAULT_PLANARITY_TOLERANCE,
            merge_tolerance: DEFAULT_MERGE_TOLERANCE,
        }
    }
}

impl PlaneSettings {
    /// Settings with a custom padding and default tolerances.
    pub fn with_padding(padding: f64) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(GeometryError::InvalidSettings(format!(
                "padding must be finite and non-negative, got {}",
                self.padding
            )));
        }
        if !self.planarity_tolerance.is_finite() || self.planarity_tolerance <= 0.0 {
            return Err(GeometryError::InvalidSettings(format!(
                "planarity_tolerance must be finite and positive, got {}",
                self.planarity_tolerance
            )));
        }
        if !self.merge_tolerance.is_finite() || self.merge_tolerance < 0.0 {
            return Err(GeometryError::InvalidSettings(format!(
                "merge_tolerance must be finite and non-negative, got {}",
                self.merge_tolerance
            )));
        }
        Ok(())
    }
}
