//! Reference frame geometries are expressed in.

use serde::{Deserialize, Serialize};

use crate::point::Vector3;

/// Orthonormal axis triple defining the coordinate frame a geometry (and any
/// geometry derived from it, e.g. edit handles) is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    x_axis: Vector3,
    y_axis: Vector3,
    z_axis: Vector3,
}

impl ReferenceFrame {
    /// Creates a frame from the given axes. The axes are expected to be
    /// orthonormal; no normalization is applied.
    pub fn new(x_axis: Vector3, y_axis: Vector3, z_axis: Vector3) -> Self {
        Self {
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// The world-axis-aligned cartesian frame.
    pub fn cartesian() -> Self {
        Self {
            x_axis: Vector3::new(1.0, 0.0, 0.0),
            y_axis: Vector3::new(0.0, 1.0, 0.0),
            z_axis: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    /// First horizontal axis of the frame.
    pub fn x_axis(&self) -> Vector3 {
        self.x_axis
    }

    /// Second horizontal axis of the frame.
    pub fn y_axis(&self) -> Vector3 {
        self.y_axis
    }

    /// Vertical axis of the frame.
    pub fn z_axis(&self) -> Vector3 {
        self.z_axis
    }
}

impl Default for ReferenceFrame {
    fn default() -> Self {
        Self::cartesian()
    }
}
