use crate::config::MapViewConfig;
use crate::control::{zoom_about, TapDetector, TapGesture, TouchEvent};
use crate::map_view::MapView;

/// Zooms in about the tapped point on double tap.
#[derive(Debug, Clone)]
pub struct DoubleTapZoomControl {
    detector: TapDetector,
    zoom: f64,
}

impl Default for DoubleTapZoomControl {
    fn default() -> Self {
        let config = MapViewConfig::default();
        Self {
            detector: TapDetector::new(&config),
            zoom: config.double_tap_zoom(),
        }
    }
}

impl DoubleTapZoomControl {
    pub(crate) fn init(&mut self, view: &MapView) {
        self.detector = TapDetector::new(view.config());
        self.zoom = view.config().double_tap_zoom();
    }

    pub(crate) fn handle_touch(&mut self, event: &TouchEvent, view: &mut MapView) -> bool {
        match self.detector.on_touch_event(event) {
            Some(TapGesture::DoubleTap(position)) => {
                zoom_about(view, self.zoom, position);
                true
            }
            _ => false,
        }
    }
}
