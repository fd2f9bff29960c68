//! Terrain elevation sampling used by ground-clamped projections.

use maybe_sync::{MaybeSend, MaybeSync};

/// Source of terrain elevation under a given horizontal position.
///
/// The scene view samples this model when resolving a screen pixel to the
/// visible surface under the cursor.
pub trait ElevationModel: MaybeSend + MaybeSync {
    /// Elevation of the terrain surface at the given horizontal position.
    fn elevation_at(&self, x: f64, y: f64) -> f64;
}

/// Terrain that is perfectly flat at a fixed elevation.
#[derive(Debug, Default, Copy, Clone)]
pub struct FlatTerrain {
    elevation: f64,
}

impl FlatTerrain {
    /// Creates a new flat terrain at the given elevation.
    pub fn new(elevation: f64) -> Self {
        Self { elevation }
    }
}

impl ElevationModel for FlatTerrain {
    fn elevation_at(&self, _x: f64, _y: f64) -> f64 {
        self.elevation
    }
}
