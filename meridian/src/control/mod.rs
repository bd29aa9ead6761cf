//! Touch gesture handling of a [`MapView`].
//!
//! Interaction is done in two steps:
//! 1. The platform converts its native touch events into [`TouchEvent`]s. Apps that use
//!    `winit` can use [`WinitTouchHandler`](crate::winit::WinitTouchHandler) for that.
//! 2. [`MapView::on_touch_event`] gives every event to each of its [`MapControl`]s in order.
//!    A control keeps the state of its gesture detector between events and manipulates the
//!    view's [`Window`](crate::Window) and [`Viewport`](crate::Viewport) when a gesture is
//!    recognized.

use std::time::Duration;

use meridian_types::Point2d;

use crate::map_view::MapView;

mod detector;
mod double_tap;
mod pan;
mod pinch;

pub use detector::{
    DragDetector, DragGesture, DragUpdate, ScaleDetector, ScaleGesture, TapDetector, TapGesture,
};
pub use double_tap::DoubleTapZoomControl;
pub use pan::PanControl;
pub use pinch::PinchZoomControl;

/// Id of a touch pointer. Valid and unique only while the pointer touches the screen.
pub type PointerId = u64;

/// A pointer (finger) touching the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Id of the pointer.
    pub id: PointerId,
    /// Position on the screen in pixels from the top-left corner.
    pub position: Point2d,
}

impl Pointer {
    /// Creates a new pointer.
    pub fn new(id: PointerId, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point2d::new(x, y),
        }
    }
}

/// Kind of change a [`TouchEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    /// The first pointer touched the screen.
    Down,
    /// Another pointer touched the screen while at least one was already down.
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A pointer was lifted while others remain on the screen.
    PointerUp,
    /// The last pointer was lifted.
    Up,
    /// The gesture was aborted by the system.
    Cancel,
}

/// State of all pointers at the moment of a change.
///
/// For [`TouchAction::PointerUp`] and [`TouchAction::Up`] the lifted pointer is still listed
/// in [`TouchEvent::pointers`], at [`TouchEvent::action_index`].
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// What happened.
    pub action: TouchAction,
    /// Index in [`TouchEvent::pointers`] of the pointer that went down or up.
    pub action_index: usize,
    /// All pointers touching the screen.
    pub pointers: Vec<Pointer>,
    /// Time of the event, measured from an arbitrary fixed moment.
    pub time: Duration,
}

impl TouchEvent {
    /// Creates a new event.
    pub fn new(
        action: TouchAction,
        action_index: usize,
        pointers: Vec<Pointer>,
        time: Duration,
    ) -> Self {
        Self {
            action,
            action_index,
            pointers,
            time,
        }
    }

    /// Event of a single pointer with id `0`.
    pub fn single(action: TouchAction, x: f64, y: f64, time: Duration) -> Self {
        Self::new(action, 0, vec![Pointer::new(0, x, y)], time)
    }

    /// The pointer that went down or up.
    pub fn action_pointer(&self) -> Option<&Pointer> {
        self.pointers.get(self.action_index)
    }

    /// Position of the first pointer.
    pub fn position(&self) -> Option<Point2d> {
        self.pointers.first().map(|p| p.position)
    }

    /// Pointers that remain on the screen after the event.
    pub fn remaining_pointers(&self) -> impl Iterator<Item = &Pointer> {
        let lifted = match self.action {
            TouchAction::PointerUp | TouchAction::Up => Some(self.action_index),
            _ => None,
        };
        let count = match self.action {
            TouchAction::Cancel => 0,
            _ => self.pointers.len(),
        };

        self.pointers
            .iter()
            .take(count)
            .enumerate()
            .filter(move |(index, _)| Some(*index) != lifted)
            .map(|(_, pointer)| pointer)
    }
}

/// A gesture handler attached to a [`MapView`].
///
/// All controls of a view see every event in their order; a control does not stop the event
/// from reaching the next one.
#[derive(Debug, Clone)]
pub enum MapControl {
    /// Drag with one finger.
    Pan(PanControl),
    /// Zoom in on double tap.
    DoubleTapZoom(DoubleTapZoomControl),
    /// Zoom with two fingers.
    PinchZoom(PinchZoomControl),
}

impl MapControl {
    /// Standard controls in their standard order: pan, double-tap zoom, pinch zoom.
    pub fn defaults() -> Vec<MapControl> {
        vec![
            MapControl::Pan(PanControl::default()),
            MapControl::DoubleTapZoom(DoubleTapZoomControl::default()),
            MapControl::PinchZoom(PinchZoomControl::default()),
        ]
    }

    /// Configures the control for the view. Called when the control is added to the view and
    /// when the view configuration changes.
    pub fn init(&mut self, view: &MapView) {
        match self {
            MapControl::Pan(control) => control.init(view),
            MapControl::DoubleTapZoom(control) => control.init(view),
            MapControl::PinchZoom(control) => control.init(view),
        }
    }

    /// Handles the event. Returns true if the event was part of a gesture of this control.
    pub fn handle_touch(&mut self, event: &TouchEvent, view: &mut MapView) -> bool {
        match self {
            MapControl::Pan(control) => control.handle_touch(event, view),
            MapControl::DoubleTapZoom(control) => control.handle_touch(event, view),
            MapControl::PinchZoom(control) => control.handle_touch(event, view),
        }
    }
}

/// Scales the window about the screen point for immediate feedback, then zooms the viewport
/// bounds by the same factor about the world point under it.
fn zoom_about(view: &mut MapView, factor: f64, focus: Point2d) {
    if !factor.is_finite() || factor <= 0.0 {
        log::warn!("Ignoring invalid zoom factor {factor}");
        return;
    }

    view.window_mut().scale(factor, focus.x, focus.y);
    view.invalidate();

    let world = view.transform().canvas_to_world().map(focus);
    let bounds = view.viewport().bounds().scale_about(factor, &world);
    view.viewport_mut().zoom_to(bounds);
}
