//! Overlay presenting transient editing geometry to the host renderer.

use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};
use meridian_types::Shape;
use parking_lot::RwLock;

use crate::messenger::Messenger;

/// Receiver of the transient shapes an editing controller wants displayed on
/// top of the map.
///
/// The controller pushes a fresh set of shapes after every structural change
/// and clears the overlay on deactivation; the overlay never owns feature
/// geometry.
pub trait EditOverlay: MaybeSend + MaybeSync {
    /// Replaces the displayed shapes with the given ones.
    fn update(&mut self, shapes: &[Shape]);
    /// Removes all displayed shapes.
    fn clear(&mut self);
}

/// An overlay that stores the current shapes for the host renderer to pick
/// up on the next frame.
#[derive(Default)]
pub struct HandleOverlay {
    shapes: Vec<Shape>,
    messenger: Option<Box<dyn Messenger>>,
}

impl HandleOverlay {
    /// Creates a new empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes currently displayed by the overlay.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Sets the messenger used to notify the host when the overlay content
    /// changes.
    pub fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.messenger = Some(messenger);
    }

    fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}

impl EditOverlay for HandleOverlay {
    fn update(&mut self, shapes: &[Shape]) {
        self.shapes = shapes.to_vec();
        self.redraw();
    }

    fn clear(&mut self) {
        self.shapes.clear();
        self.redraw();
    }
}

impl<T: EditOverlay + 'static> EditOverlay for Arc<RwLock<T>> {
    fn update(&mut self, shapes: &[Shape]) {
        self.write().update(shapes)
    }

    fn clear(&mut self) {
        self.write().clear()
    }
}
