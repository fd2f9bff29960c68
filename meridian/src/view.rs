//! Scene view of a map: a perspective camera over the map surface.

use std::sync::Arc;

use meridian_types::{
    CartesianPoint2d, CartesianPoint3d, CartesianPoint3dFloat, Point2, Point3, Size,
};
use nalgebra::Vector3;

use crate::elevation::{ElevationModel, FlatTerrain};

/// Lower bound for the eye-to-point distance in perspective calculations.
///
/// The distance enters the meters-per-pixel relation as a factor, so a zero
/// distance would make the conversion degenerate.
const MIN_EYE_DISTANCE: f64 = 1e-6;

const GROUND_RESOLVE_ITERATIONS: usize = 8;
const GROUND_RESOLVE_TOLERANCE_M: f64 = 1e-3;

/// Perspective camera looking at the map surface.
///
/// The view provides conversions between screen pixels and world coordinates:
/// projecting a world point onto the screen, resolving a pixel to the terrain
/// surface under it, and the meters-per-pixel scale at a given distance from
/// the camera.
#[derive(Clone)]
pub struct SceneView {
    eye: Point3,
    target: Point3,
    fov_y: f64,
    size: Size,
    terrain: Arc<dyn ElevationModel>,
}

impl SceneView {
    /// Creates a new view with the camera placed at `eye` and looking at
    /// `target`, with the default vertical field of view of 60 degrees over a
    /// flat terrain at zero elevation.
    pub fn new(eye: Point3, target: Point3, size: Size) -> Self {
        Self {
            eye,
            target,
            fov_y: std::f64::consts::FRAC_PI_3,
            size,
            terrain: Arc::new(FlatTerrain::default()),
        }
    }

    /// Position of the camera eye.
    pub fn eye(&self) -> Point3 {
        self.eye
    }

    /// The point the camera is looking at.
    pub fn target(&self) -> Point3 {
        self.target
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f64 {
        self.fov_y
    }

    /// Size of the rendering surface in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy of the view with the camera eye moved to the given
    /// position.
    pub fn with_eye(&self, eye: Point3) -> Self {
        Self {
            eye,
            ..self.clone()
        }
    }

    /// Returns a copy of the view looking at the given point.
    pub fn with_target(&self, target: Point3) -> Self {
        Self {
            target,
            ..self.clone()
        }
    }

    /// Returns a copy of the view with the given vertical field of view in
    /// radians.
    pub fn with_fov_y(&self, fov_y: f64) -> Self {
        Self {
            fov_y,
            ..self.clone()
        }
    }

    /// Returns a copy of the view with the given rendering surface size.
    pub fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Returns a copy of the view clamping ground positions to the given
    /// terrain.
    pub fn with_terrain(&self, terrain: Arc<dyn ElevationModel>) -> Self {
        Self {
            terrain,
            ..self.clone()
        }
    }

    /// Projects a world point to screen pixel coordinates.
    ///
    /// Returns `None` if the point is behind the camera or the view is
    /// degenerate (zero size or zero look direction).
    pub fn world_to_screen(&self, point: &Point3) -> Option<Point2> {
        if self.size.is_zero() {
            return None;
        }

        let (forward, right, up) = self.camera_axes()?;
        let v = to_vector(point) - to_vector(&self.eye);
        let depth = v.dot(&forward);
        if depth <= 0.0 {
            return None;
        }

        let half_fov_tan = (self.fov_y / 2.0).tan();
        let aspect = self.size.width() / self.size.height();
        let ndc_x = v.dot(&right) / (depth * half_fov_tan * aspect);
        let ndc_y = v.dot(&up) / (depth * half_fov_tan);

        Some(Point2::new(
            (ndc_x + 1.0) * self.size.half_width(),
            (1.0 - ndc_y) * self.size.half_height(),
        ))
    }

    /// Resolves a screen pixel to the position on the terrain surface visible
    /// under it.
    ///
    /// The resolution is iterative: the pixel ray is intersected with the
    /// elevation of the previous candidate until the sampled elevation
    /// converges. Returns `None` for rays that never reach the surface.
    pub fn screen_to_ground(&self, px: Point2) -> Option<Point3> {
        let dir = self.pixel_ray(px)?;
        let eye = to_vector(&self.eye);

        let mut elevation = self.terrain.elevation_at(self.eye.x(), self.eye.y());
        let mut hit = eye;
        for _ in 0..GROUND_RESOLVE_ITERATIONS {
            if dir.z.abs() < f64::EPSILON {
                return None;
            }
            let t = (elevation - eye.z) / dir.z;
            if !t.is_finite() || t <= 0.0 {
                return None;
            }

            hit = eye + dir * t;
            let sampled = self.terrain.elevation_at(hit.x, hit.y);
            if (sampled - elevation).abs() <= GROUND_RESOLVE_TOLERANCE_M {
                return Some(Point3::new(hit.x, hit.y, sampled));
            }

            elevation = sampled;
        }

        Some(Point3::new(hit.x, hit.y, elevation))
    }

    /// World-space span in meters that one screen pixel covers at the given
    /// point.
    ///
    /// This is the perspective size-at-distance relation: a fixed angular
    /// pixel span corresponds to a world span proportional to the distance
    /// from the camera eye. The distance is clamped from below so a point at
    /// the eye position does not produce a degenerate scale.
    pub fn meters_per_pixel_at(&self, point: &Point3) -> f64 {
        if self.size.is_zero() {
            return 0.0;
        }

        let distance = self.eye.distance(point).max(MIN_EYE_DISTANCE);
        2.0 * distance * (self.fov_y / 2.0).tan() / self.size.height()
    }

    /// Direction of the ray cast from the camera eye through the given screen
    /// pixel.
    fn pixel_ray(&self, px: Point2) -> Option<Vector3<f64>> {
        if self.size.is_zero() {
            return None;
        }

        let (forward, right, up) = self.camera_axes()?;
        let half_fov_tan = (self.fov_y / 2.0).tan();
        let aspect = self.size.width() / self.size.height();

        let ndc_x = px.x() / self.size.half_width() - 1.0;
        let ndc_y = 1.0 - px.y() / self.size.half_height();

        let dir = forward + right * (ndc_x * half_fov_tan * aspect) + up * (ndc_y * half_fov_tan);
        Some(dir.normalize())
    }

    /// Orthonormal camera basis: forward, right and up vectors.
    fn camera_axes(&self) -> Option<(Vector3<f64>, Vector3<f64>, Vector3<f64>)> {
        let direction = to_vector(&self.target) - to_vector(&self.eye);
        if direction.norm() < MIN_EYE_DISTANCE {
            return None;
        }

        let forward = direction.normalize();
        // The world up reference degenerates when looking straight down, so a
        // top-down camera falls back to screen-up = north.
        let up_reference = if forward.z.abs() > 1.0 - 1e-9 {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let right = forward.cross(&up_reference).normalize();
        let up = right.cross(&forward);

        Some((forward, right, up))
    }
}

fn to_vector(p: &Point3) -> Vector3<f64> {
    Vector3::new(p.x(), p.y(), p.z())
}
