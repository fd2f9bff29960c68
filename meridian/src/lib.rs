//! Meridian is an interactive shape manipulation toolkit for 3D map views.
//! It lets an application give its users direct control over the geometries
//! displayed on a perspective-projected map: translating them along the
//! ground, raising them, and extruding flat shapes into volumes.
//!
//! # Main components
//!
//! Everything in the toolkit revolves around
//!
//! * [`Map`] struct, which carries the currently displayed [`SceneView`] and
//!   the redraw channel to the host, and
//! * [`SketchLayer`](layer::SketchLayer) that stores the editable
//!   [features](layer::Feature). The layer only holds data; presenting it on
//!   screen is the host renderer's job.
//!
//! User interactions are handled the usual way for an interactive map:
//!
//! * [`EventProcessor`](control::EventProcessor) converts raw input events
//!   into some intermediate representation more convenient to deal with, and
//! * [`controls`](control) change the state of the map or layers based on
//!   the user input. The central one is the
//!   [`ShapeEditor`](control::editor::ShapeEditor): a controller that owns a
//!   single feature's shape for the duration of an edit session, converts
//!   pointer drags into world-space geometry changes and pushes the edited
//!   shape back into the layer.
//!
//! A typical edit session:
//!
//! ```
//! use std::sync::Arc;
//!
//! use meridian::control::editor::{ShapeEditor, ShapeEditorConfiguration};
//! use meridian::control::EventProcessor;
//! use meridian::layer::SketchLayer;
//! use meridian::{Map, SceneView};
//! use meridian_types::{Point3, Shape, Size};
//! use parking_lot::RwLock;
//!
//! let mut layer = SketchLayer::new();
//! let feature_id = layer.add(Shape::Point(Point3::new(0.0, 0.0, 0.0)));
//! let layer = Arc::new(RwLock::new(layer));
//!
//! let view = SceneView::new(
//!     Point3::new(0.0, 0.0, 1000.0),
//!     Point3::new(0.0, 0.0, 0.0),
//!     Size::new(800.0, 600.0),
//! );
//! let mut map = Map::new(view, None);
//!
//! let mut editor = ShapeEditor::new(
//!     layer.clone(),
//!     feature_id,
//!     ShapeEditorConfiguration::default(),
//! );
//! editor.activate(&mut map).expect("the feature is in the layer");
//!
//! let mut processor = EventProcessor::new();
//! processor.add_handler(editor);
//! // Feed `RawUserEvent`s from the windowing system into `processor`.
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod control;
pub mod elevation;
pub mod error;
pub mod layer;
mod map;
mod messenger;
mod overlay;
mod view;

pub use map::Map;
pub use messenger::{DummyMessenger, Messenger};
pub use overlay::{EditOverlay, HandleOverlay};
pub use view::SceneView;

// Reexport meridian_types
pub use meridian_types;
