//! Integration with `winit`.

use std::sync::Arc;

use meridian_types::Point2d;
use web_time::Instant;
use winit::event::{Touch, TouchPhase, WindowEvent};
use winit::window::Window;

use crate::control::{Pointer, PointerId, TouchAction, TouchEvent};
use crate::messenger::Messenger;

/// Converts `winit` touch events into [`TouchEvent`]s.
///
/// `winit` reports every touch separately. The handler tracks all pointers that are down to
/// produce events with the full pointer list.
#[derive(Debug)]
pub struct WinitTouchHandler {
    pointers: Vec<Pointer>,
    start: Instant,
}

impl Default for WinitTouchHandler {
    fn default() -> Self {
        Self {
            pointers: vec![],
            start: Instant::now(),
        }
    }
}

impl WinitTouchHandler {
    /// Converts the window event. Returns `None` for events that are not touches.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<TouchEvent> {
        match event {
            WindowEvent::Touch(touch) => self.process_touch(touch),
            _ => None,
        }
    }

    /// Converts a touch. Returns `None` for touches of unknown pointers.
    pub fn process_touch(&mut self, touch: &Touch) -> Option<TouchEvent> {
        self.handle(
            touch.id,
            Point2d::new(touch.location.x, touch.location.y),
            touch.phase,
        )
    }

    fn handle(
        &mut self,
        id: PointerId,
        position: Point2d,
        phase: TouchPhase,
    ) -> Option<TouchEvent> {
        let pointer = Pointer { id, position };
        let time = self.start.elapsed();
        let index = self.pointers.iter().position(|p| p.id == id);

        let (action, index, pointers) = match (phase, index) {
            (TouchPhase::Started, None) => {
                let action = if self.pointers.is_empty() {
                    TouchAction::Down
                } else {
                    TouchAction::PointerDown
                };
                self.pointers.push(pointer);
                (action, self.pointers.len() - 1, self.pointers.clone())
            }
            (TouchPhase::Moved, Some(index)) => {
                self.pointers[index] = pointer;
                (TouchAction::Move, index, self.pointers.clone())
            }
            (TouchPhase::Ended, Some(index)) => {
                self.pointers[index] = pointer;
                let pointers = self.pointers.clone();
                self.pointers.remove(index);
                let action = if self.pointers.is_empty() {
                    TouchAction::Up
                } else {
                    TouchAction::PointerUp
                };
                (action, index, pointers)
            }
            (TouchPhase::Cancelled, Some(index)) => {
                (TouchAction::Cancel, index, std::mem::take(&mut self.pointers))
            }
            (phase, _) => {
                log::debug!("Ignoring touch {phase:?} of pointer {id}");
                return None;
            }
        };

        Some(TouchEvent::new(action, index, pointers, time))
    }
}

/// Messenger that requests a redraw of a `winit` window.
#[derive(Debug, Clone)]
pub struct WinitMessenger {
    window: Arc<Window>,
}

impl WinitMessenger {
    /// Creates a new messenger for the window.
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl Messenger for WinitMessenger {
    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
