//! Application of world-space deltas to feature shapes.

use meridian_types::{Prism, Rect3, Shape, Vector3};

use crate::control::editor::EditMode;

/// Applies the world-space delta to the shape according to the active
/// manipulation mode.
///
/// The input shape is never modified; a new shape is built instead. The
/// dispatch is exhaustive over the shape variants, and every combination of a
/// shape and a mode is defined: combinations without a geometric meaning
/// (e.g. extruding a point) return the shape unchanged instead of failing,
/// so a stray event can never leave the edited feature in a broken state.
pub(super) fn apply_delta(shape: &Shape, mode: EditMode, delta: Vector3) -> Shape {
    match mode {
        EditMode::TranslateXy => translate_xy(shape, delta),
        EditMode::TranslateZ => translate_z(shape, delta.dz()),
        EditMode::Extrude => extrude(shape, delta.dz()),
    }
}

fn translate_xy(shape: &Shape, delta: Vector3) -> Shape {
    let shift = Vector3::new(delta.dx(), delta.dy(), 0.0);
    match shape {
        Shape::Point(p) => Shape::Point(*p + shift),
        Shape::Polyline(contour) => Shape::Polyline(contour.map_points(|p| *p + shift)),
        Shape::Polygon(polygon) => Shape::Polygon(polygon.map_points(|p| *p + shift)),
        Shape::Prism(prism) => Shape::Prism(Prism::new(
            prism.base().map_points(|p| *p + shift),
            prism.bottom(),
            prism.top(),
        )),
        Shape::Collection(children) => Shape::Collection(
            children
                .iter()
                .map(|child| translate_xy(child, delta))
                .collect(),
        ),
    }
}

fn translate_z(shape: &Shape, dz: f64) -> Shape {
    let shift = Vector3::new(0.0, 0.0, dz);
    match shape {
        Shape::Point(p) => Shape::Point(*p + shift),
        Shape::Polyline(contour) => Shape::Polyline(contour.map_points(|p| *p + shift)),
        Shape::Polygon(polygon) => Shape::Polygon(polygon.map_points(|p| *p + shift)),
        Shape::Prism(prism) => Shape::Prism(Prism::new(
            prism.base().map_points(|p| *p + shift),
            prism.bottom() + dz,
            prism.top() + dz,
        )),
        Shape::Collection(children) => Shape::Collection(
            children
                .iter()
                .map(|child| translate_z(child, dz))
                .collect(),
        ),
    }
}

fn extrude(shape: &Shape, dz: f64) -> Shape {
    match shape {
        // A flat polygon is promoted to a prism between its own elevation and
        // the dragged one, wrapped into a collection so that consecutive
        // drags keep operating on the same structure.
        Shape::Polygon(polygon) => {
            let base_z = Rect3::from_points(polygon.iter_points())
                .map(|bounds| bounds.z_min())
                .unwrap_or(0.0);
            Shape::Collection(vec![Shape::Prism(Prism::new(
                polygon.clone(),
                base_z,
                base_z + dz,
            ))])
        }
        Shape::Prism(prism) => Shape::Prism(Prism::new(
            prism.base().clone(),
            prism.bottom(),
            prism.top() + dz,
        )),
        // Only a collection produced by a previous extrusion can be extruded
        // further; an arbitrary group of shapes has no extrusion semantics.
        Shape::Collection(children)
            if children.len() == 1 && matches!(children[0], Shape::Prism(_)) =>
        {
            Shape::Collection(vec![extrude(&children[0], dz)])
        }
        other => other.clone(),
    }
}
