//! Redraw notification contract between the toolkit and the host application.

use maybe_sync::{MaybeSend, MaybeSync};

/// Messenger is a way for the toolkit to notify the hosting application that
/// the map should be redrawn.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Request redraw of the map.
    fn request_redraw(&self);
}

/// Messenger that does nothing.
#[derive(Debug, Default, Copy, Clone)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
