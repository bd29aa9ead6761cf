use crate::control::{zoom_about, ScaleDetector, ScaleGesture, TouchEvent};
use crate::map_view::MapView;

/// Zooms the map with two fingers.
///
/// Every pinch step scales the window about the pinch focus for immediate feedback and zooms
/// the viewport by the same factor.
#[derive(Debug, Clone, Default)]
pub struct PinchZoomControl {
    detector: ScaleDetector,
}

impl PinchZoomControl {
    pub(crate) fn init(&mut self, view: &MapView) {
        self.detector = ScaleDetector::new(view.config().min_pinch_span());
    }

    pub(crate) fn handle_touch(&mut self, event: &TouchEvent, view: &mut MapView) -> bool {
        if let Some(ScaleGesture {
            focus,
            scale_factor,
        }) = self.detector.on_touch_event(event)
        {
            // Fingers moving apart show less of the world.
            zoom_about(view, 1.0 / scale_factor, focus);
        }

        self.detector.is_in_progress()
    }
}
