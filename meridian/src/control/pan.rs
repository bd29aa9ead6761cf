use meridian_types::Vector2d;

use crate::config::PanCommit;
use crate::control::{DragDetector, DragGesture, TouchEvent};
use crate::map_view::MapView;

/// Moves the map with one finger.
///
/// While the finger moves, the window is translated so the current bitmap follows it. The
/// movement is written into the viewport according to the [`PanCommit`] policy of the view
/// configuration.
#[derive(Debug, Clone, Default)]
pub struct PanControl {
    detector: DragDetector,
    commit: PanCommit,
}

impl PanControl {
    pub(crate) fn init(&mut self, view: &MapView) {
        let config = view.config();
        self.detector = DragDetector::new(config.touch_slop());
        self.commit = config.pan_commit();
    }

    pub(crate) fn handle_touch(&mut self, event: &TouchEvent, view: &mut MapView) -> bool {
        let update = self.detector.on_touch_event(event);
        match (update.gesture, self.commit) {
            (Some(DragGesture::Moved(delta)), commit) => {
                view.window_mut().translate(delta.x, delta.y);
                view.invalidate();

                if commit == PanCommit::Continuous {
                    commit_pan(view, delta);
                }
            }
            (Some(DragGesture::Finished(total)), PanCommit::OnGestureEnd) => {
                commit_pan(view, total);
            }
            (Some(DragGesture::Cancelled(total)), PanCommit::OnGestureEnd) => {
                view.window_mut().translate(-total.x, -total.y);
                view.invalidate();
            }
            _ => {}
        }

        update.consumed
    }
}

/// Shifts the viewport bounds so the world point under the finger follows a screen movement
/// of `screen_delta` pixels.
fn commit_pan(view: &mut MapView, screen_delta: Vector2d) {
    let world_delta = view.transform().canvas_to_world().map_vector(screen_delta);
    let bounds = view
        .viewport()
        .bounds()
        .translate(-world_delta.x, -world_delta.y);

    log::trace!("Pan by {screen_delta:?} px committed");
    view.viewport_mut().set_bounds(bounds);
}
