//! Feature storage shared between the host application and editing
//! controllers.

use meridian_types::Shape;

use crate::error::MeridianError;
use crate::messenger::Messenger;

/// Unique identifier of a feature within a [`SketchLayer`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FeatureId(u64);

/// An arbitrary geographic object: an identity with a single owned shape.
///
/// The shape is replaced wholesale when the feature is edited; geometries are
/// never mutated in place.
#[derive(Debug, Clone)]
pub struct Feature {
    id: FeatureId,
    shape: Shape,
}

impl Feature {
    /// Identifier of the feature.
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Geometry of the feature.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A set of features the host application displays and the editing
/// controllers modify.
///
/// The layer is typically shared as `Arc<RwLock<SketchLayer>>` between the
/// host and a controller; the controller owns the shape of the feature it
/// edits for the duration of its activation.
#[derive(Default)]
pub struct SketchLayer {
    features: Vec<Feature>,
    next_id: u64,
    messenger: Option<Box<dyn Messenger>>,
}

impl SketchLayer {
    /// Creates a new empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a feature with the given shape to the layer and returns its id.
    pub fn add(&mut self, shape: Shape) -> FeatureId {
        let id = FeatureId(self.next_id);
        self.next_id += 1;
        self.features.push(Feature { id, shape });
        self.redraw();

        id
    }

    /// Returns the feature with the given id.
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Replaces the shape of the feature with the given id.
    pub fn set_shape(&mut self, id: FeatureId, shape: Shape) -> Result<(), MeridianError> {
        let feature = self
            .features
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(MeridianError::NotFound)?;
        feature.shape = shape;
        self.redraw();

        Ok(())
    }

    /// Removes the feature with the given id from the layer.
    pub fn remove(&mut self, id: FeatureId) -> Result<(), MeridianError> {
        let index = self
            .features
            .iter()
            .position(|f| f.id == id)
            .ok_or(MeridianError::NotFound)?;
        self.features.remove(index);
        self.redraw();

        Ok(())
    }

    /// Iterates over the features of the layer.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Sets the messenger used to notify the host about layer changes.
    pub fn set_messenger(&mut self, messenger: Box<dyn Messenger>) {
        self.messenger = Some(messenger);
    }

    fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}
