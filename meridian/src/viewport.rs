use std::fmt::{Debug, Formatter};

use maybe_sync::{MaybeSend, MaybeSync};
use meridian_types::{Crs, Rect, Size};

use crate::listener::{ListenerId, ListenerList};

/// Receives notifications about viewport changes.
///
/// Notifications are delivered synchronously from inside the setter that caused them, after
/// the new value has been stored, in the order the listeners were [bound](Viewport::bind).
/// All methods have empty default implementations.
pub trait ViewportListener: MaybeSend + MaybeSync {
    /// Bounds of the viewport changed.
    fn on_bounds_changed(&self, _viewport: &Viewport, _bounds: Rect, _old: Rect) {}
    /// Pixel size of the viewport changed.
    fn on_size_changed(&self, _viewport: &Viewport, _size: Size<u32>, _old: Size<u32>) {}
    /// CRS of the viewport changed. The bounds may have changed together with the CRS.
    fn on_crs_changed(&self, _viewport: &Viewport, _crs: &Crs, _old: &Crs) {}
}

/// Authoritative map state: the world envelope that is shown, its CRS and the pixel size of the
/// area it is shown in.
///
/// Every setter fires exactly one notification to the bound [`ViewportListener`]s before it
/// returns. Cloning a viewport copies its state but not its listeners, so a clone is a
/// detached snapshot.
pub struct Viewport {
    bounds: Rect,
    crs: Crs,
    size: Size<u32>,
    listeners: ListenerList<dyn ViewportListener>,
}

impl Viewport {
    /// Creates a viewport with zero pixel size.
    pub fn new(bounds: Rect, crs: Crs) -> Self {
        Self {
            bounds,
            crs,
            size: Size::default(),
            listeners: ListenerList::default(),
        }
    }

    /// Returns a copy of the viewport with the given pixel size. Does not notify listeners.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// World envelope of the viewport, in units of [`Viewport::crs`].
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Coordinate reference system of the bounds.
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Pixel size of the viewport.
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.size.width()
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Replaces the bounds and fires [`ViewportListener::on_bounds_changed`].
    pub fn set_bounds(&mut self, bounds: Rect) {
        let old = std::mem::replace(&mut self.bounds, bounds);
        self.notify(|listener, viewport| listener.on_bounds_changed(viewport, bounds, old));
    }

    /// Zooms the viewport to the given envelope.
    ///
    /// This is the entry point used by the zoom gestures. It has the same effect as
    /// [`Viewport::set_bounds`].
    pub fn zoom_to(&mut self, envelope: Rect) {
        self.set_bounds(envelope);
    }

    /// Replaces the CRS and fires [`ViewportListener::on_crs_changed`].
    ///
    /// The bounds are not reprojected. Use [`Viewport::set_bounds_and_crs`] to change both.
    pub fn set_crs(&mut self, crs: Crs) {
        let old = std::mem::replace(&mut self.crs, crs);
        self.notify(|listener, viewport| listener.on_crs_changed(viewport, &viewport.crs, &old));
    }

    /// Replaces the bounds and the CRS in one step, keeping them consistent at every
    /// notification.
    ///
    /// Fires a single notification: [`ViewportListener::on_crs_changed`] if the CRS changed,
    /// [`ViewportListener::on_bounds_changed`] otherwise.
    pub fn set_bounds_and_crs(&mut self, bounds: Rect, crs: Crs) {
        if crs == self.crs {
            self.set_bounds(bounds);
            return;
        }

        self.bounds = bounds;
        self.set_crs(crs);
    }

    /// Sets the pixel size and fires [`ViewportListener::on_size_changed`].
    pub fn resize(&mut self, width: u32, height: u32) {
        let size = Size::new(width, height);
        let old = std::mem::replace(&mut self.size, size);
        self.notify(|listener, viewport| listener.on_size_changed(viewport, size, old));
    }

    /// Subscribes the listener to the changes of this viewport.
    pub fn bind(&mut self, listener: impl ViewportListener + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Removes a listener. Returns `false` if it was not bound.
    pub fn unbind(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of bound listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&self, f: impl Fn(&dyn ViewportListener, &Viewport)) {
        for listener in self.listeners.iter() {
            f(listener, self);
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 0.0, 0.0), Crs::default())
    }
}

impl Clone for Viewport {
    fn clone(&self) -> Self {
        Self {
            bounds: self.bounds,
            crs: self.crs.clone(),
            size: self.size,
            listeners: ListenerList::default(),
        }
    }
}

impl PartialEq for Viewport {
    fn eq(&self, other: &Self) -> bool {
        self.bounds == other.bounds && self.crs == other.crs && self.size == other.size
    }
}

impl Debug for Viewport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("bounds", &self.bounds)
            .field("crs", &self.crs)
            .field("size", &self.size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
