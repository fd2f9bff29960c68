//! Map state shared between the host application and interaction controllers.

use crate::messenger::Messenger;
use crate::view::SceneView;

/// The current view of a map and the redraw channel to its host.
///
/// The map itself does no rendering; it only carries the [`SceneView`]
/// controllers read and update, and notifies the host through the
/// [`Messenger`] when the presentation should be refreshed.
pub struct Map {
    view: SceneView,
    messenger: Option<Box<dyn Messenger>>,
}

impl Map {
    /// Creates a new map.
    pub fn new(view: SceneView, messenger: Option<Box<dyn Messenger>>) -> Self {
        Self { view, messenger }
    }

    /// Current view of the map.
    pub fn view(&self) -> &SceneView {
        &self.view
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: SceneView) {
        self.view = view;
        self.redraw();
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }
}
