//! Conversions from screen-space pointer movement to world-space deltas.

use meridian_types::{CartesianPoint2d, CartesianPoint3d, Point2, Point3, Vector3};

use crate::view::SceneView;

/// World-space delta for a horizontal drag.
///
/// Both pointer positions are resolved to the terrain surface under them, and
/// the difference of the resolved positions is taken in the horizontal plane.
/// Resolving against the surface (instead of intersecting a fixed-height
/// plane) keeps the dragged shape under the cursor on sloped or elevated
/// terrain.
///
/// Returns `None` when either pointer position does not resolve to the
/// surface, e.g. when it points at the sky.
pub(super) fn ground_delta(view: &SceneView, prev: Point2, curr: Point2) -> Option<Vector3> {
    let from = view.screen_to_ground(prev)?;
    let to = view.screen_to_ground(curr)?;

    Some(Vector3::new(to.x() - from.x(), to.y() - from.y(), 0.0))
}

/// World-space delta for a vertical drag.
///
/// Only the vertical pointer movement matters: the pixel span is converted to
/// meters with the perspective meters-per-pixel scale at the shape anchor, so
/// nearby shapes respond to the same pixel drag with a smaller world change
/// than distant ones. Dragging up increases the elevation.
pub(super) fn vertical_delta(
    view: &SceneView,
    anchor: &Point3,
    prev: Point2,
    curr: Point2,
) -> Vector3 {
    let meters_per_pixel = view.meters_per_pixel_at(anchor);

    Vector3::new(0.0, 0.0, (prev.y() - curr.y()) * meters_per_pixel)
}

/// Snaps every axis of the delta to the given grid step.
///
/// A non-positive step disables snapping.
pub(super) fn snap_delta(delta: Vector3, step_m: f64) -> Vector3 {
    if step_m <= 0.0 {
        return delta;
    }

    Vector3::new(
        snap_axis(delta.dx(), step_m),
        snap_axis(delta.dy(), step_m),
        snap_axis(delta.dz(), step_m),
    )
}

fn snap_axis(value: f64, step_m: f64) -> f64 {
    (value / step_m).round() * step_m
}
