//! Data model aggregate rendered by a [`MapView`](crate::MapView).

use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};
use parking_lot::RwLock;

use crate::listener::{ListenerId, ListenerList};
use crate::viewport::Viewport;

mod layer;
mod style;

pub use layer::{Dataset, Layer};
pub use style::Style;

/// Receives notifications about map changes that require a redraw.
pub trait MapListener: MaybeSend + MaybeSync {
    /// The map style was replaced.
    fn on_style_changed(&self, map: &Map, style: &Style, old: &Style);
}

/// Layers and style of a map. Shared with the render worker, which reads it at the start of
/// every render.
#[derive(Debug, Default)]
pub(crate) struct MapContents {
    pub(crate) layers: Vec<Layer>,
    pub(crate) style: Style,
}

/// A map is an ordered set of layers, the style they are drawn with and the canonical
/// viewport.
///
/// A [`MapView`](crate::MapView) works on a detached clone of the canonical viewport, so
/// gestures do not modify [`Map::view`].
#[derive(Default)]
pub struct Map {
    view: Viewport,
    contents: Arc<RwLock<MapContents>>,
    listeners: ListenerList<dyn MapListener>,
    closed: bool,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with the given canonical viewport.
    pub fn with_view(view: Viewport) -> Self {
        Self {
            view,
            ..Default::default()
        }
    }

    /// Canonical viewport of the map.
    pub fn view(&self) -> &Viewport {
        &self.view
    }

    /// Mutable access to the canonical viewport.
    pub fn view_mut(&mut self) -> &mut Viewport {
        &mut self.view
    }

    /// Copy of the layer list, in drawing order.
    pub fn layers(&self) -> Vec<Layer> {
        self.contents.read().layers.clone()
    }

    /// Number of layers.
    pub fn layer_count(&self) -> usize {
        self.contents.read().layers.len()
    }

    /// Returns true if the map has at least one layer.
    pub fn has_layers(&self) -> bool {
        !self.contents.read().layers.is_empty()
    }

    /// Appends a layer to the top of the map.
    pub fn add_layer(&mut self, layer: Layer) {
        self.contents.write().layers.push(layer);
    }

    /// Inserts a layer at position `index`, shifting all layers after it up.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_layer(&mut self, index: usize, layer: Layer) {
        self.contents.write().layers.insert(index, layer);
    }

    /// Removes the layer at `index` and returns it.
    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        let mut contents = self.contents.write();
        if index < contents.layers.len() {
            Some(contents.layers.remove(index))
        } else {
            None
        }
    }

    /// Applies `f` to the layer list.
    pub fn update_layers<R>(&mut self, f: impl FnOnce(&mut Vec<Layer>) -> R) -> R {
        f(&mut self.contents.write().layers)
    }

    /// Current style.
    pub fn style(&self) -> Style {
        self.contents.read().style.clone()
    }

    /// Replaces the style and fires [`MapListener::on_style_changed`].
    pub fn set_style(&mut self, style: Style) {
        let old = std::mem::replace(&mut self.contents.write().style, style.clone());
        for listener in self.listeners.iter() {
            listener.on_style_changed(self, &style, &old);
        }
    }

    /// Subscribes a listener to the map changes.
    pub fn bind(&mut self, listener: impl MapListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not bound.
    pub fn unbind(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Closes the datasets of all layers. Calling it again does nothing.
    ///
    /// Errors reported by datasets are logged; closing continues with the remaining layers.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        for layer in self.contents.read().layers.iter() {
            if let Err(err) = layer.dataset().close() {
                log::warn!("Failed to close dataset {}: {err}", layer.dataset().name());
            }
        }
    }

    /// Returns true if [`Map::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub(crate) fn contents(&self) -> Arc<RwLock<MapContents>> {
        self.contents.clone()
    }
}
