//! This example drives a complete edit session with synthetic input events:
//! it extrudes a polygon into a prism by "dragging" the extrusion handle and
//! prints the resulting feature geometry after every step.

use std::sync::Arc;

use meridian::control::editor::{ShapeEditor, ShapeEditorConfiguration};
use meridian::control::{EventProcessor, MouseButton, RawUserEvent};
use meridian::layer::SketchLayer;
use meridian::{Map, SceneView};
use meridian_types::{ClosedContour, Point2, Point3, Polygon, Shape, Size};
use parking_lot::RwLock;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let polygon = Polygon::new(
        ClosedContour::new(vec![
            Point3::new(-50.0, -50.0, 0.0),
            Point3::new(50.0, -50.0, 0.0),
            Point3::new(50.0, 50.0, 0.0),
            Point3::new(-50.0, 50.0, 0.0),
        ]),
        vec![],
    );

    let mut layer = SketchLayer::new();
    let feature_id = layer.add(Shape::Polygon(polygon));
    let layer = Arc::new(RwLock::new(layer));

    let view = SceneView::new(
        Point3::new(0.0, 0.0, 1000.0),
        Point3::new(0.0, 0.0, 0.0),
        Size::new(800.0, 800.0),
    );
    let mut map = Map::new(view, None);

    let mut editor = ShapeEditor::new(
        layer.clone(),
        feature_id,
        ShapeEditorConfiguration::default().with_snap_step_m(10.0),
    );
    editor
        .activate(&mut map)
        .expect("the feature is in the layer");

    let mut processor = EventProcessor::new();
    processor.add_handler(editor);

    // The extrusion handle of the polygon projects to the screen center in
    // this top-down view. Press it and drag upwards.
    let gesture = [
        RawUserEvent::PointerMoved(Point2::new(400.0, 400.0)),
        RawUserEvent::ButtonPressed(MouseButton::Left),
        RawUserEvent::PointerMoved(Point2::new(400.0, 380.0)),
        RawUserEvent::PointerMoved(Point2::new(400.0, 350.0)),
        RawUserEvent::ButtonReleased(MouseButton::Left),
    ];

    for event in gesture {
        processor.handle(event, &mut map);

        let layer = layer.read();
        let shape = layer
            .feature(feature_id)
            .expect("the feature is in the layer")
            .shape();
        println!("feature shape: {shape:?}");
    }
}
