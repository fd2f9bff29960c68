//! Transient handle geometry built around the edited shape.

use meridian_types::{
    CartesianPoint2dFloat, CartesianPoint3d, Contour, Point2, Point3, ReferenceFrame, Shape,
};

use crate::control::editor::EditMode;
use crate::view::SceneView;

/// Screen-space distance in pixels within which a pointer press grabs a
/// handle.
const HIT_TOLERANCE_PX: f64 = 12.0;

/// Vertical offset band of the extrusion handle, in fractions of the handle
/// size. Keeps the handle visually separate from the vertical translation
/// segment below it.
const EXTRUDE_BAND: (f64, f64) = (0.8, 1.2);

/// The manipulation handles built around the anchor of the edited shape.
///
/// Three handles are built: a planar cross affording horizontal translation,
/// a vertical segment affording elevation change, and, for extrudable shapes
/// only, a second vertical segment above the anchor affording extrusion.
///
/// The handles are transient: they are rebuilt from scratch after every
/// structural change of the edited shape and are never part of any feature.
#[derive(Debug, Clone)]
pub struct EditHandles {
    anchor: Point3,
    xy_cross: Contour<Point3>,
    z_segment: Contour<Point3>,
    extrude_segment: Option<Contour<Point3>>,
}

impl EditHandles {
    /// Builds handles around the anchor of the given shape.
    ///
    /// The anchor is the shape's focus point if it exposes one, or the center
    /// of its bounds otherwise. Returns `None` for shapes without a defined
    /// anchor (e.g. an empty collection).
    ///
    /// The same shape, frame and size always produce geometrically equal
    /// handles.
    pub fn build(shape: &Shape, frame: &ReferenceFrame, handle_size_m: f64) -> Option<Self> {
        let anchor = shape
            .focus_point()
            .or_else(|| shape.bounding_box().map(|bounds| bounds.center()))?;

        let x_arm = frame.x_axis() * handle_size_m;
        let y_arm = frame.y_axis() * handle_size_m;
        let z_axis = frame.z_axis();

        let xy_cross = Contour::open(vec![
            anchor - x_arm,
            anchor + x_arm,
            anchor - y_arm,
            anchor + y_arm,
        ]);
        let z_segment = Contour::open(vec![anchor, anchor + z_axis * handle_size_m]);
        let extrude_segment = shape.is_extrudable().then(|| {
            Contour::open(vec![
                anchor + z_axis * (handle_size_m * EXTRUDE_BAND.0),
                anchor + z_axis * (handle_size_m * EXTRUDE_BAND.1),
            ])
        });

        Some(Self {
            anchor,
            xy_cross,
            z_segment,
            extrude_segment,
        })
    }

    /// The anchor point the handles are built around.
    pub fn anchor(&self) -> Point3 {
        self.anchor
    }

    /// The planar cross handle.
    pub fn xy_cross(&self) -> &Contour<Point3> {
        &self.xy_cross
    }

    /// The vertical translation handle.
    pub fn z_segment(&self) -> &Contour<Point3> {
        &self.z_segment
    }

    /// The extrusion handle, present only for extrudable shapes.
    pub fn extrude_segment(&self) -> Option<&Contour<Point3>> {
        self.extrude_segment.as_ref()
    }

    /// The handle shapes in rendering order, for the overlay.
    pub fn to_shapes(&self) -> Vec<Shape> {
        let mut shapes = vec![
            Shape::Polyline(self.xy_cross.clone()),
            Shape::Polyline(self.z_segment.clone()),
        ];
        if let Some(segment) = &self.extrude_segment {
            shapes.push(Shape::Polyline(segment.clone()));
        }

        shapes
    }

    /// Determines which manipulation the pointer at the given screen position
    /// grabs, if any.
    ///
    /// Handles can visually overlap near the anchor, so they are checked in a
    /// fixed priority order: extrude, then vertical, then planar. Each check
    /// projects the handle's geometric midpoint to the screen and compares
    /// the pixel distance against a fixed tolerance; this is deliberately a
    /// point check, not a full stroke hit test.
    pub fn hit_test(&self, screen: Point2, view: &SceneView) -> Option<EditMode> {
        if let Some(segment) = &self.extrude_segment {
            if Self::is_near(screen, segment, view) {
                return Some(EditMode::Extrude);
            }
        }
        if Self::is_near(screen, &self.z_segment, view) {
            return Some(EditMode::TranslateZ);
        }
        if Self::is_near(screen, &self.xy_cross, view) {
            return Some(EditMode::TranslateXy);
        }

        None
    }

    fn is_near(screen: Point2, handle: &Contour<Point3>, view: &SceneView) -> bool {
        let Some(midpoint) = midpoint(handle) else {
            return false;
        };
        let Some(projected) = view.world_to_screen(&midpoint) else {
            return false;
        };

        screen.distance(&projected) <= HIT_TOLERANCE_PX
    }
}

/// Geometric midpoint (vertex average) of a contour.
fn midpoint(contour: &Contour<Point3>) -> Option<Point3> {
    let count = contour.points().len();
    if count == 0 {
        return None;
    }

    let (x, y, z) = contour.iter_points().fold((0.0, 0.0, 0.0), |acc, p| {
        (acc.0 + p.x(), acc.1 + p.y(), acc.2 + p.z())
    });
    let count = count as f64;

    Some(Point3::new(x / count, y / count, z / count))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use meridian_types::{CartesianPoint2d, ClosedContour, Polygon, Size};

    use super::*;

    fn square_around(x: f64, y: f64, z: f64, half_side: f64) -> Polygon<Point3> {
        Polygon::new(
            ClosedContour::new(vec![
                Point3::new(x - half_side, y - half_side, z),
                Point3::new(x + half_side, y - half_side, z),
                Point3::new(x + half_side, y + half_side, z),
                Point3::new(x - half_side, y + half_side, z),
            ]),
            vec![],
        )
    }

    fn tilted_view() -> SceneView {
        SceneView::new(
            Point3::new(0.0, -1000.0, 600.0),
            Point3::new(0.0, 0.0, 0.0),
            Size::new(800.0, 800.0),
        )
    }

    #[test]
    fn handles_are_built_around_bounds_center() {
        let shape = Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("polygon has an anchor");

        assert_abs_diff_eq!(handles.anchor(), Point3::new(10.0, 10.0, 0.0));
        assert_eq!(handles.xy_cross().points().len(), 4);
        assert_abs_diff_eq!(
            handles.z_segment().points()[1],
            Point3::new(10.0, 10.0, 50.0)
        );
        assert!(handles.extrude_segment().is_some());
    }

    #[test]
    fn extrude_handle_sits_in_its_band() {
        let shape = Shape::Polygon(square_around(0.0, 0.0, 0.0, 5.0));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("polygon has an anchor");
        let segment = handles.extrude_segment().expect("polygon is extrudable");

        for point in segment.iter_points() {
            assert!(point.z() >= 0.8 * 50.0 && point.z() <= 1.2 * 50.0);
        }
    }

    #[test]
    fn no_extrude_handle_for_polyline() {
        let shape = Shape::Polyline(Contour::open(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ]));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("polyline has an anchor");

        assert!(handles.extrude_segment().is_none());
    }

    #[test]
    fn no_handles_without_an_anchor() {
        assert!(
            EditHandles::build(&Shape::Collection(vec![]), &ReferenceFrame::cartesian(), 50.0)
                .is_none()
        );
    }

    #[test]
    fn point_shape_uses_focus_point() {
        let shape = Shape::Point(Point3::new(3.0, 4.0, 5.0));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("point has an anchor");
        assert_abs_diff_eq!(handles.anchor(), Point3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let shape = Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0));
        let frame = ReferenceFrame::cartesian();

        let first = EditHandles::build(&shape, &frame, 50.0).expect("polygon has an anchor");
        let second = EditHandles::build(&shape, &frame, 50.0).expect("polygon has an anchor");

        assert_abs_diff_eq!(first.xy_cross(), second.xy_cross());
        assert_abs_diff_eq!(first.z_segment(), second.z_segment());
        assert_abs_diff_eq!(
            first.extrude_segment().expect("polygon is extrudable"),
            second.extrude_segment().expect("polygon is extrudable")
        );
    }

    #[test]
    fn hit_priority_extrude_over_z_over_xy() {
        let view = tilted_view();

        // A point shape: only XY and Z handles exist.
        let shape = Shape::Point(Point3::new(0.0, 0.0, 0.0));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("point has an anchor");

        // The anchor is the midpoint of the cross; a press halfway between
        // the projected cross midpoint and the projected vertical segment
        // midpoint is within tolerance of both. The vertical handle must win.
        let anchor_px = view
            .world_to_screen(&handles.anchor())
            .expect("anchor is visible");
        let z_mid_px = view
            .world_to_screen(&midpoint(handles.z_segment()).expect("segment is not empty"))
            .expect("segment is visible");
        let halfway = Point2::new(
            (anchor_px.x() + z_mid_px.x()) / 2.0,
            (anchor_px.y() + z_mid_px.y()) / 2.0,
        );
        assert!(halfway.distance(&anchor_px) <= HIT_TOLERANCE_PX);
        assert!(halfway.distance(&z_mid_px) <= HIT_TOLERANCE_PX);
        assert_matches!(handles.hit_test(halfway, &view), Some(EditMode::TranslateZ));

        // For an extrudable shape, the extrusion handle wins over the
        // vertical one at its own midpoint when the two overlap on screen.
        let shape = Shape::Polygon(square_around(0.0, 0.0, 0.0, 5.0));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("polygon has an anchor");
        let extrude_px = view
            .world_to_screen(
                &midpoint(handles.extrude_segment().expect("polygon is extrudable"))
                    .expect("segment is not empty"),
            )
            .expect("segment is visible");
        assert_matches!(handles.hit_test(extrude_px, &view), Some(EditMode::Extrude));
    }

    #[test]
    fn hit_test_respects_tolerance() {
        let view = tilted_view();
        let shape = Shape::Point(Point3::new(0.0, 0.0, 0.0));
        let handles = EditHandles::build(&shape, &ReferenceFrame::cartesian(), 50.0)
            .expect("point has an anchor");

        let anchor_px = view
            .world_to_screen(&handles.anchor())
            .expect("anchor is visible");
        let far_away = Point2::new(anchor_px.x() + 300.0, anchor_px.y() + 300.0);
        assert!(handles.hit_test(far_away, &view).is_none());
    }

    #[test]
    fn straight_down_view_overlapping_handles() {
        // Looking straight down, every handle midpoint projects to the same
        // pixel; the priority order resolves the tie.
        let view = SceneView::new(
            Point3::new(10.0, 10.0, 1000.0),
            Point3::new(10.0, 10.0, 0.0),
            Size::new(800.0, 800.0),
        );

        let polygon = Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0));
        let handles = EditHandles::build(&polygon, &ReferenceFrame::cartesian(), 50.0)
            .expect("polygon has an anchor");
        let center = Point2::new(400.0, 400.0);
        assert_matches!(handles.hit_test(center, &view), Some(EditMode::Extrude));

        let polyline = Shape::Polyline(Contour::open(vec![
            Point3::new(5.0, 10.0, 0.0),
            Point3::new(15.0, 10.0, 0.0),
        ]));
        let handles = EditHandles::build(&polyline, &ReferenceFrame::cartesian(), 50.0)
            .expect("polyline has an anchor");
        assert_matches!(handles.hit_test(center, &view), Some(EditMode::TranslateZ));
    }
}
