use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};
use meridian_types::{Crs, Rect};

use crate::error::MeridianError;

/// Source of geographic data shown by a [`Layer`].
///
/// Datasets belong to the data model, which is outside of this crate. The map view only needs
/// to know their extent and CRS (to initialize the viewport) and to release them when the map
/// is closed. Renderers access concrete dataset types through [`Dataset::as_any`].
pub trait Dataset: MaybeSend + MaybeSync {
    /// Human readable name of the dataset.
    fn name(&self) -> &str;
    /// Extent of the data in the dataset CRS. May require I/O.
    fn bounds(&self) -> Result<Rect, MeridianError>;
    /// CRS of the data. May require I/O.
    fn crs(&self) -> Result<Crs, MeridianError>;
    /// Releases resources held by the dataset.
    fn close(&self) -> Result<(), MeridianError> {
        Ok(())
    }
    /// Converts the trait object into the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// A dataset placed on a map.
///
/// Layers are cheap to clone: the dataset is shared.
#[derive(Clone)]
pub struct Layer {
    dataset: Arc<dyn Dataset>,
    title: String,
    visible: bool,
}

impl Layer {
    /// Creates a visible layer titled after the dataset.
    pub fn new(dataset: Arc<dyn Dataset>) -> Self {
        Self {
            title: dataset.name().to_string(),
            dataset,
            visible: true,
        }
    }

    /// The layer data.
    pub fn dataset(&self) -> &Arc<dyn Dataset> {
        &self.dataset
    }

    /// Title of the layer.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Changes the title of the layer.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Whether the layer should be rendered.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the layer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Debug for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("dataset", &self.dataset.name())
            .field("title", &self.title)
            .field("visible", &self.visible)
            .finish()
    }
}
