//! Interactive editing of feature shapes on a 3D map view.
//!
//! The [`ShapeEditor`] controller lets the user move, raise and extrude a
//! single feature of a [`SketchLayer`](crate::layer::SketchLayer) by dragging
//! manipulation handles rendered around the shape:
//!
//! * a planar cross at the shape anchor moves the shape horizontally;
//! * a vertical segment raises or lowers it;
//! * a second vertical segment above the anchor (extrudable shapes only)
//!   extrudes a flat polygon into a prism or changes the height of an
//!   existing prism.
//!
//! The editor is a [`UserEventHandler`] and is driven by the
//! [`EventProcessor`](crate::control::EventProcessor) like any other
//! interaction controller. Between [`ShapeEditor::activate`] and
//! [`ShapeEditor::deactivate`] the editor owns the shape of the edited
//! feature: it keeps an immutable snapshot of the original geometry for
//! cancellation and a working copy that is pushed into the layer after every
//! drag step. Releasing the pointer commits the edit; pressing Escape
//! restores the original shape and requests deactivation.

use std::sync::Arc;

use meridian_types::{Point2, ReferenceFrame, Shape};
use parking_lot::RwLock;

use crate::control::{EventPropagation, KeyCode, MouseButton, UserEvent, UserEventHandler};
use crate::error::MeridianError;
use crate::layer::{FeatureId, SketchLayer};
use crate::map::Map;
use crate::overlay::{EditOverlay, HandleOverlay};

mod drag;
mod handles;
mod mutate;

pub use handles::EditHandles;

/// The manipulation a pointer drag currently performs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditMode {
    /// Horizontal translation along the ground surface.
    TranslateXy,
    /// Vertical translation.
    TranslateZ,
    /// Extrusion of a flat polygon into a prism, or a change of the height
    /// of an existing prism.
    Extrude,
}

/// Configuration of a [`ShapeEditor`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ShapeEditorConfiguration {
    handle_size_m: f64,
    snap_step_m: f64,
}

impl Default for ShapeEditorConfiguration {
    fn default() -> Self {
        Self {
            handle_size_m: 50.0,
            snap_step_m: 1.0,
        }
    }
}

impl ShapeEditorConfiguration {
    /// Length of the manipulation handles in meters.
    pub fn handle_size_m(&self) -> f64 {
        self.handle_size_m
    }

    /// Sets length of the manipulation handles in meters.
    pub fn with_handle_size_m(mut self, size: f64) -> Self {
        self.handle_size_m = size;
        self
    }

    /// Sets length of the manipulation handles in meters.
    pub fn set_handle_size_m(&mut self, size: f64) {
        self.handle_size_m = size;
    }

    /// Grid step in meters the edit deltas are snapped to.
    ///
    /// A non-positive value disables snapping.
    pub fn snap_step_m(&self) -> f64 {
        self.snap_step_m
    }

    /// Sets grid step in meters the edit deltas are snapped to.
    ///
    /// A non-positive value disables snapping.
    pub fn with_snap_step_m(mut self, step: f64) -> Self {
        self.snap_step_m = step;
        self
    }

    /// Sets grid step in meters the edit deltas are snapped to.
    ///
    /// A non-positive value disables snapping.
    pub fn set_snap_step_m(&mut self, step: f64) {
        self.snap_step_m = step;
    }
}

/// State held between activation and deactivation.
struct EditState {
    original: Shape,
    working: Shape,
    mode: Option<EditMode>,
    last_pointer: Point2,
    handles: EditHandles,
}

/// Event handler implementing interactive shape manipulation.
pub struct ShapeEditor {
    layer: Arc<RwLock<SketchLayer>>,
    feature_id: FeatureId,
    config: ShapeEditorConfiguration,
    frame: ReferenceFrame,
    overlay: Box<dyn EditOverlay>,
    state: Option<EditState>,
    deactivation_requested: bool,
}

impl ShapeEditor {
    /// Creates a new editor for the given feature of the given layer.
    pub fn new(
        layer: Arc<RwLock<SketchLayer>>,
        feature_id: FeatureId,
        config: ShapeEditorConfiguration,
    ) -> Self {
        Self {
            layer,
            feature_id,
            config,
            frame: ReferenceFrame::cartesian(),
            overlay: Box::new(HandleOverlay::new()),
            state: None,
            deactivation_requested: false,
        }
    }

    /// Replaces the overlay the editor presents its handles through.
    pub fn with_overlay(mut self, overlay: Box<dyn EditOverlay>) -> Self {
        self.overlay = overlay;
        self
    }

    /// Sets the reference frame the handle geometry is built in.
    pub fn with_reference_frame(mut self, frame: ReferenceFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Returns the current configuration of the editor.
    pub fn config(&self) -> ShapeEditorConfiguration {
        self.config
    }

    /// Id of the edited feature.
    pub fn feature_id(&self) -> FeatureId {
        self.feature_id
    }

    /// Whether the editor is currently activated.
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// The manipulation mode of the drag in progress, if any.
    pub fn active_mode(&self) -> Option<EditMode> {
        self.state.as_ref().and_then(|state| state.mode)
    }

    /// Returns true if the editor has requested deactivation since the last
    /// call, and resets the request.
    ///
    /// The request is raised when the user cancels the edit with Escape; the
    /// host reacts by removing the editor from its handler list.
    pub fn take_deactivation_request(&mut self) -> bool {
        std::mem::take(&mut self.deactivation_requested)
    }

    /// Starts editing the feature.
    ///
    /// Snapshots the feature shape, builds the manipulation handles around
    /// its anchor and presents them through the overlay.
    pub fn activate(&mut self, map: &mut Map) -> Result<(), MeridianError> {
        let shape = self
            .layer
            .read()
            .feature(self.feature_id)
            .map(|feature| feature.shape().clone())
            .ok_or(MeridianError::NotFound)?;

        let handles =
            EditHandles::build(&shape, &self.frame, self.config.handle_size_m()).ok_or_else(
                || MeridianError::Generic("the feature shape has no defined anchor".into()),
            )?;

        self.overlay.update(&handles.to_shapes());
        self.state = Some(EditState {
            original: shape.clone(),
            working: shape,
            mode: None,
            last_pointer: Point2::default(),
            handles,
        });
        self.deactivation_requested = false;
        map.redraw();

        log::debug!("Shape editor activated for feature {:?}", self.feature_id);

        Ok(())
    }

    /// Stops editing the feature.
    ///
    /// The last committed shape stays in the layer; the handle overlay is
    /// cleared and both shape snapshots are dropped.
    pub fn deactivate(&mut self, map: &mut Map) {
        if self.state.take().is_some() {
            self.overlay.clear();
            map.redraw();

            log::debug!("Shape editor deactivated for feature {:?}", self.feature_id);
        }
    }

    fn record_pointer(&mut self, pointer: Point2) -> EventPropagation {
        if let Some(state) = &mut self.state {
            // While a drag is in progress the pointer position is advanced by
            // the drag steps themselves; hover movements reported alongside
            // them must not reset the drag origin.
            if state.mode.is_none() {
                state.last_pointer = pointer;
            }
        }

        EventPropagation::Propagate
    }

    fn arm(&mut self, pointer: Point2, map: &Map) -> EventPropagation {
        let Some(state) = &mut self.state else {
            return EventPropagation::Propagate;
        };

        state.last_pointer = pointer;
        state.mode = state.handles.hit_test(pointer, map.view());

        match state.mode {
            Some(mode) => {
                log::debug!("Shape editor armed in {mode:?} mode");
                EventPropagation::Stop
            }
            None => EventPropagation::Propagate,
        }
    }

    fn drag_step(&mut self, pointer: Point2, map: &mut Map) -> EventPropagation {
        let Some(state) = &mut self.state else {
            return EventPropagation::Propagate;
        };
        let Some(mode) = state.mode else {
            return EventPropagation::Propagate;
        };

        let delta = match mode {
            EditMode::TranslateXy => drag::ground_delta(map.view(), state.last_pointer, pointer),
            EditMode::TranslateZ | EditMode::Extrude => Some(drag::vertical_delta(
                map.view(),
                &state.handles.anchor(),
                state.last_pointer,
                pointer,
            )),
        };
        // The pointer does not resolve to the ground; the drag is owned, but
        // this step changes nothing.
        let Some(delta) = delta else {
            return EventPropagation::Stop;
        };
        let delta = drag::snap_delta(delta, self.config.snap_step_m());

        state.working = mutate::apply_delta(&state.working, mode, delta);
        state.last_pointer = pointer;

        if self
            .layer
            .write()
            .set_shape(self.feature_id, state.working.clone())
            .is_err()
        {
            log::warn!(
                "Feature {:?} disappeared from the layer while being edited",
                self.feature_id
            );
            return EventPropagation::Stop;
        }

        // The anchor moves with the shape, so the handles are derived anew
        // from the updated working copy.
        if let Some(handles) =
            EditHandles::build(&state.working, &self.frame, self.config.handle_size_m())
        {
            self.overlay.update(&handles.to_shapes());
            state.handles = handles;
        }
        map.redraw();

        EventPropagation::Stop
    }

    fn release(&mut self) -> EventPropagation {
        let Some(state) = &mut self.state else {
            return EventPropagation::Propagate;
        };

        if state.mode.take().is_some() {
            EventPropagation::Stop
        } else {
            EventPropagation::Propagate
        }
    }

    fn cancel(&mut self, map: &mut Map) -> EventPropagation {
        let Some(state) = self.state.take() else {
            return EventPropagation::Propagate;
        };

        if self
            .layer
            .write()
            .set_shape(self.feature_id, state.original)
            .is_err()
        {
            log::warn!(
                "Feature {:?} disappeared from the layer; cannot restore its shape",
                self.feature_id
            );
        }

        self.overlay.clear();
        self.deactivation_requested = true;
        map.redraw();

        log::debug!("Shape editing cancelled for feature {:?}", self.feature_id);

        EventPropagation::Stop
    }
}

impl UserEventHandler for ShapeEditor {
    fn handle(&mut self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        if self.state.is_none() {
            return EventPropagation::Propagate;
        }

        match event {
            UserEvent::PointerMoved(e) => self.record_pointer(e.screen_pointer_position),
            UserEvent::ButtonPressed(MouseButton::Left, e) => {
                self.arm(e.screen_pointer_position, map)
            }
            UserEvent::DragStarted(MouseButton::Left, _) if self.active_mode().is_some() => {
                EventPropagation::Consume
            }
            UserEvent::Drag(MouseButton::Left, _, e) => {
                self.drag_step(e.screen_pointer_position, map)
            }
            UserEvent::ButtonReleased(MouseButton::Left, _)
            | UserEvent::DragEnded(MouseButton::Left, _) => self.release(),
            UserEvent::KeyReleased(KeyCode::Escape) => self.cancel(map),
            _ => EventPropagation::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use meridian_types::{CartesianPoint3d, ClosedContour, Point3, Polygon, Size, Vector2};

    use super::*;
    use crate::control::{EventProcessor, MouseButtonsState, MouseEvent, RawUserEvent};
    use crate::view::SceneView;

    /// Vertical fov chosen so that one pixel corresponds to exactly one
    /// meter at 1000 m from the eye with a 800 px high viewport.
    fn unit_scale_fov() -> f64 {
        2.0 * 0.4f64.atan()
    }

    fn top_down_map() -> Map {
        let view = SceneView::new(
            Point3::new(10.0, 10.0, 1000.0),
            Point3::new(10.0, 10.0, 0.0),
            Size::new(800.0, 800.0),
        )
        .with_fov_y(unit_scale_fov());
        Map::new(view, None)
    }

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

    fn setup(shape: Shape) -> (Arc<RwLock<SketchLayer>>, FeatureId, ShapeEditor) {
        let mut layer = SketchLayer::new();
        let feature_id = layer.add(shape);
        let layer = Arc::new(RwLock::new(layer));
        let editor = ShapeEditor::new(
            layer.clone(),
            feature_id,
            ShapeEditorConfiguration::default(),
        );

        (layer, feature_id, editor)
    }

    fn mouse_event(x: f64, y: f64) -> MouseEvent {
        MouseEvent {
            screen_pointer_position: Point2::new(x, y),
            buttons: MouseButtonsState::default(),
        }
    }

    fn press(x: f64, y: f64) -> UserEvent {
        UserEvent::ButtonPressed(MouseButton::Left, mouse_event(x, y))
    }

    fn drag_started(x: f64, y: f64) -> UserEvent {
        UserEvent::DragStarted(MouseButton::Left, mouse_event(x, y))
    }

    fn drag(x: f64, y: f64) -> UserEvent {
        UserEvent::Drag(MouseButton::Left, Vector2::default(), mouse_event(x, y))
    }

    fn release(x: f64, y: f64) -> UserEvent {
        UserEvent::ButtonReleased(MouseButton::Left, mouse_event(x, y))
    }

    fn feature_shape(layer: &Arc<RwLock<SketchLayer>>, id: FeatureId) -> Shape {
        layer
            .read()
            .feature(id)
            .expect("feature exists")
            .shape()
            .clone()
    }

    #[test]
    fn activation_requires_an_existing_feature() {
        let (layer, feature_id, _) = setup(Shape::Point(Point3::new(10.0, 10.0, 0.0)));
        layer.write().remove(feature_id).expect("feature exists");

        let mut editor = ShapeEditor::new(layer, feature_id, Default::default());
        let mut map = top_down_map();
        assert_matches!(editor.activate(&mut map), Err(MeridianError::NotFound));
        assert!(!editor.is_active());
    }

    #[test]
    fn events_are_ignored_while_inactive() {
        let (layer, feature_id, mut editor) = setup(Shape::Point(Point3::new(10.0, 10.0, 0.0)));
        let mut map = top_down_map();
        let before = feature_shape(&layer, feature_id);

        assert_matches!(
            editor.handle(&press(400.0, 400.0), &mut map),
            EventPropagation::Propagate
        );
        assert_matches!(
            editor.handle(&drag(400.0, 390.0), &mut map),
            EventPropagation::Propagate
        );

        assert_abs_diff_eq!(feature_shape(&layer, feature_id), before);
    }

    #[test]
    fn press_away_from_handles_arms_nothing() {
        let (_, _, mut editor) = setup(Shape::Point(Point3::new(10.0, 10.0, 0.0)));
        let mut map = top_down_map();
        editor.activate(&mut map).expect("activation succeeds");

        assert_matches!(
            editor.handle(&press(100.0, 100.0), &mut map),
            EventPropagation::Propagate
        );
        assert!(editor.active_mode().is_none());
    }

    #[test]
    fn vertical_drag_commits_on_release() {
        let (layer, feature_id, mut editor) = setup(Shape::Point(Point3::new(10.0, 10.0, 0.0)));
        let mut map = top_down_map();
        editor.activate(&mut map).expect("activation succeeds");

        // In a straight top-down view every handle midpoint projects to the
        // screen center; for a point shape the vertical handle wins there.
        assert_matches!(
            editor.handle(&press(400.0, 400.0), &mut map),
            EventPropagation::Stop
        );
        assert_eq!(editor.active_mode(), Some(EditMode::TranslateZ));
        assert_matches!(
            editor.handle(&drag_started(400.0, 400.0), &mut map),
            EventPropagation::Consume
        );

        // One meter per pixel at the anchor: 10 px up is 10 m.
        editor.handle(&drag(400.0, 390.0), &mut map);
        editor.handle(&release(400.0, 390.0), &mut map);

        assert!(editor.active_mode().is_none());
        assert_matches!(
            feature_shape(&layer, feature_id),
            Shape::Point(p) if p == Point3::new(10.0, 10.0, 10.0)
        );

        // The commit survives: further drags without a new press change
        // nothing.
        editor.handle(&drag(400.0, 300.0), &mut map);
        assert_matches!(
            feature_shape(&layer, feature_id),
            Shape::Point(p) if p == Point3::new(10.0, 10.0, 10.0)
        );
    }

    #[test]
    fn extrusion_scenario() {
        // A polygon with its anchor at (10, 10, 0), handle size 50 m, snap
        // step 10 m. A drag that yields 37 m before snapping must commit a
        // prism from 0 to 40 m.
        let (layer, feature_id, _) = setup(Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0)));
        let mut editor = ShapeEditor::new(
            layer.clone(),
            feature_id,
            ShapeEditorConfiguration::default().with_snap_step_m(10.0),
        );
        let mut map = top_down_map();
        editor.activate(&mut map).expect("activation succeeds");

        assert_matches!(
            editor.handle(&press(400.0, 400.0), &mut map),
            EventPropagation::Stop
        );
        assert_eq!(editor.active_mode(), Some(EditMode::Extrude));
        editor.handle(&drag_started(400.0, 400.0), &mut map);
        editor.handle(&drag(400.0, 363.0), &mut map);

        let shape = feature_shape(&layer, feature_id);
        let Shape::Collection(children) = &shape else {
            panic!("extrusion must produce a collection");
        };
        assert_eq!(children.len(), 1);
        let Shape::Prism(prism) = &children[0] else {
            panic!("the collection must contain a prism");
        };
        assert_abs_diff_eq!(prism.bottom(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(prism.top(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn continued_extrusion_raises_the_same_prism() {
        let (layer, feature_id, mut editor) =
            setup(Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0)));
        let mut map = top_down_map();
        editor.activate(&mut map).expect("activation succeeds");

        editor.handle(&press(400.0, 400.0), &mut map);
        editor.handle(&drag_started(400.0, 400.0), &mut map);
        editor.handle(&drag(400.0, 380.0), &mut map);
        editor.handle(&drag(400.0, 360.0), &mut map);

        let shape = feature_shape(&layer, feature_id);
        let Shape::Collection(children) = &shape else {
            panic!("extrusion must produce a collection");
        };
        assert_eq!(children.len(), 1);
        assert_matches!(&children[0], Shape::Prism(_));
    }

    #[test]
    fn escape_restores_the_original_shape() {
        let original_polygon = Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0));
        let (layer, feature_id, mut editor) = setup(original_polygon.clone());
        let mut map = top_down_map();
        editor.activate(&mut map).expect("activation succeeds");

        editor.handle(&press(400.0, 400.0), &mut map);
        editor.handle(&drag_started(400.0, 400.0), &mut map);
        editor.handle(&drag(400.0, 380.0), &mut map);
        editor.handle(&drag(400.0, 350.0), &mut map);

        // The working copy reached the layer.
        assert_matches!(
            feature_shape(&layer, feature_id),
            Shape::Collection(_)
        );

        assert_matches!(
            editor.handle(&UserEvent::KeyReleased(KeyCode::Escape), &mut map),
            EventPropagation::Stop
        );

        assert_abs_diff_eq!(feature_shape(&layer, feature_id), original_polygon);
        assert!(editor.take_deactivation_request());
        assert!(!editor.take_deactivation_request());
        assert!(!editor.is_active());
    }

    #[test]
    fn horizontal_drag_follows_the_ground() {
        let (layer, feature_id, mut editor) = setup(Shape::Point(Point3::new(10.0, 10.0, 0.0)));
        // A tilted view separates the projected handle midpoints, so a press
        // on the cross midpoint arms horizontal translation.
        let view = SceneView::new(
            Point3::new(10.0, -990.0, 600.0),
            Point3::new(10.0, 10.0, 0.0),
            Size::new(800.0, 800.0),
        );
        let mut map = Map::new(view, None);
        editor.activate(&mut map).expect("activation succeeds");

        assert_matches!(
            editor.handle(&press(400.0, 400.0), &mut map),
            EventPropagation::Stop
        );
        assert_eq!(editor.active_mode(), Some(EditMode::TranslateXy));

        editor.handle(&drag_started(400.0, 400.0), &mut map);
        editor.handle(&drag(420.0, 400.0), &mut map);

        let expected_dx = {
            let from = map
                .view()
                .screen_to_ground(Point2::new(400.0, 400.0))
                .expect("pixel hits the ground");
            let to = map
                .view()
                .screen_to_ground(Point2::new(420.0, 400.0))
                .expect("pixel hits the ground");
            (to.x() - from.x()).round()
        };

        let shape = feature_shape(&layer, feature_id);
        let Shape::Point(p) = shape else {
            panic!("translation must not change the shape type");
        };
        assert_abs_diff_eq!(p.x(), 10.0 + expected_dx, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.z(), 0.0);
    }

    #[test]
    fn full_gesture_through_event_processor() {
        let (layer, feature_id, mut editor) = setup(Shape::Point(Point3::new(10.0, 10.0, 0.0)));
        let mut map = top_down_map();
        editor.activate(&mut map).expect("activation succeeds");

        let mut processor = EventProcessor::new();
        processor.add_handler(editor);

        processor.handle(
            RawUserEvent::PointerMoved(Point2::new(400.0, 400.0)),
            &mut map,
        );
        processor.handle(RawUserEvent::ButtonPressed(MouseButton::Left), &mut map);
        // The hover event dispatched together with each drag step must not
        // swallow the drag delta.
        processor.handle(
            RawUserEvent::PointerMoved(Point2::new(400.0, 390.0)),
            &mut map,
        );
        processor.handle(RawUserEvent::ButtonReleased(MouseButton::Left), &mut map);

        assert_matches!(
            feature_shape(&layer, feature_id),
            Shape::Point(p) if p == Point3::new(10.0, 10.0, 10.0)
        );
    }

    #[test]
    fn deactivation_clears_the_overlay() {
        let overlay = Arc::new(RwLock::new(HandleOverlay::new()));
        let mut layer = SketchLayer::new();
        let feature_id = layer.add(Shape::Polygon(square_around(10.0, 10.0, 0.0, 5.0)));
        let layer = Arc::new(RwLock::new(layer));
        let mut editor = ShapeEditor::new(layer, feature_id, Default::default())
            .with_overlay(Box::new(overlay.clone()));
        let mut map = top_down_map();

        editor.activate(&mut map).expect("activation succeeds");
        // Cross, vertical segment and extrusion segment.
        assert_eq!(overlay.read().shapes().len(), 3);

        editor.deactivate(&mut map);
        assert!(overlay.read().shapes().is_empty());
        assert!(!editor.is_active());
    }
}
