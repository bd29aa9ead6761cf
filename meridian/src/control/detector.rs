use std::time::Duration;

use meridian_types::{CartesianPoint2d, Point2d, Vector2d};

use crate::config::MapViewConfig;
use crate::control::{TouchAction, TouchEvent};

/// Progress of a one-finger drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragGesture {
    /// The pointer moved by the given screen delta since the previous report.
    Moved(Vector2d),
    /// The drag ended normally. Contains the total screen delta of the drag.
    Finished(Vector2d),
    /// The drag was aborted by the system. Contains the total screen delta of the drag.
    Cancelled(Vector2d),
}

/// Result of feeding an event into a [`DragDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragUpdate {
    /// The event belongs to a drag.
    pub consumed: bool,
    /// Drag progress reported by the event.
    pub gesture: Option<DragGesture>,
}

/// Recognizes one-finger drags.
///
/// A drag starts when the pointer travels further than the touch slop from the point it went
/// down at. The first reported delta is measured from that point, so no movement is lost.
#[derive(Debug, Clone, Default)]
pub struct DragDetector {
    slop: f64,
    start: Option<Point2d>,
    last: Point2d,
    dragging: bool,
}

impl DragDetector {
    /// Creates a detector with the given touch slop.
    pub fn new(slop: f64) -> Self {
        Self {
            slop,
            ..Default::default()
        }
    }

    /// Returns true while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Processes the event.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> DragUpdate {
        match event.action {
            TouchAction::Down => {
                self.reset();
                if let Some(position) = event.position() {
                    self.start = Some(position);
                    self.last = position;
                }

                DragUpdate::default()
            }
            TouchAction::Move => {
                let (Some(start), Some(position)) = (self.start, event.position()) else {
                    return DragUpdate::default();
                };

                if !self.dragging && position.taxicab_distance(&start) <= self.slop {
                    return DragUpdate::default();
                }

                self.dragging = true;
                let delta = position - self.last;
                self.last = position;

                DragUpdate {
                    consumed: true,
                    gesture: Some(DragGesture::Moved(delta)),
                }
            }
            TouchAction::PointerDown | TouchAction::PointerUp | TouchAction::Up => {
                self.finish(DragGesture::Finished)
            }
            TouchAction::Cancel => self.finish(DragGesture::Cancelled),
        }
    }

    fn finish(&mut self, gesture: fn(Vector2d) -> DragGesture) -> DragUpdate {
        let update = match (self.dragging, self.start) {
            (true, Some(start)) => DragUpdate {
                consumed: true,
                gesture: Some(gesture(self.last - start)),
            },
            _ => DragUpdate::default(),
        };

        self.reset();
        update
    }

    fn reset(&mut self) {
        self.start = None;
        self.dragging = false;
    }
}

/// A recognized tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapGesture {
    /// A single tap at the given screen position.
    Tap(Point2d),
    /// The second tap of a double tap. The position is the one of the first tap.
    DoubleTap(Point2d),
}

#[derive(Debug, Clone, Copy)]
struct Touch {
    position: Point2d,
    time: Duration,
}

/// Recognizes taps and double taps of a single pointer.
#[derive(Debug, Clone)]
pub struct TapDetector {
    touch_slop: f64,
    tap_timeout: Duration,
    double_tap_timeout: Duration,
    double_tap_slop: f64,

    down: Option<Touch>,
    last_tap: Option<Touch>,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(&MapViewConfig::default())
    }
}

impl TapDetector {
    /// Creates a detector with thresholds from the configuration.
    pub fn new(config: &MapViewConfig) -> Self {
        Self {
            touch_slop: config.touch_slop(),
            tap_timeout: config.tap_timeout(),
            double_tap_timeout: config.double_tap_timeout(),
            double_tap_slop: config.double_tap_slop(),
            down: None,
            last_tap: None,
        }
    }

    /// Processes the event.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> Option<TapGesture> {
        match event.action {
            TouchAction::Down => {
                self.down = event.position().map(|position| Touch {
                    position,
                    time: event.time,
                });
                None
            }
            TouchAction::Move => {
                if let (Some(down), Some(position)) = (self.down, event.position()) {
                    if position.taxicab_distance(&down.position) > self.touch_slop {
                        self.down = None;
                        self.last_tap = None;
                    }
                }
                None
            }
            TouchAction::Up => {
                let down = self.down.take()?;
                if event.time.saturating_sub(down.time) > self.tap_timeout {
                    self.last_tap = None;
                    return None;
                }

                match self.last_tap.take() {
                    Some(first) if self.is_double_tap(&first, &down) => {
                        Some(TapGesture::DoubleTap(first.position))
                    }
                    _ => {
                        self.last_tap = Some(Touch {
                            position: down.position,
                            time: event.time,
                        });
                        Some(TapGesture::Tap(down.position))
                    }
                }
            }
            TouchAction::PointerDown | TouchAction::PointerUp | TouchAction::Cancel => {
                self.down = None;
                self.last_tap = None;
                None
            }
        }
    }

    fn is_double_tap(&self, first: &Touch, second: &Touch) -> bool {
        second.time.saturating_sub(first.time) <= self.double_tap_timeout
            && second.position.distance(&first.position) <= self.double_tap_slop
    }
}

/// Progress of a pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleGesture {
    /// Centroid of the pointers on the screen.
    pub focus: Point2d,
    /// Ratio of the current span to the previous one. Greater than `1` when the fingers move
    /// apart.
    pub scale_factor: f64,
}

/// Recognizes pinches of two or more pointers.
///
/// The span of the pointers is twice their mean distance from the centroid. Pointers going
/// down or up re-baseline the span without reporting.
#[derive(Debug, Clone)]
pub struct ScaleDetector {
    min_span: f64,
    prev_span: Option<f64>,
}

impl Default for ScaleDetector {
    fn default() -> Self {
        Self::new(MapViewConfig::default().min_pinch_span())
    }
}

impl ScaleDetector {
    /// Creates a detector that ignores spans smaller than `min_span` pixels.
    pub fn new(min_span: f64) -> Self {
        Self {
            min_span,
            prev_span: None,
        }
    }

    /// Returns true while two or more pointers are down.
    pub fn is_in_progress(&self) -> bool {
        self.prev_span.is_some()
    }

    /// Processes the event.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> Option<ScaleGesture> {
        let (focus, span) = match span(event) {
            Some(v) => v,
            None => {
                self.prev_span = None;
                return None;
            }
        };

        let prev_span = self.prev_span.replace(span);
        if event.action != TouchAction::Move {
            return None;
        }

        let prev_span = prev_span?;
        if prev_span < self.min_span || span < self.min_span {
            return None;
        }

        Some(ScaleGesture {
            focus,
            scale_factor: span / prev_span,
        })
    }
}

/// Centroid and span of the pointers remaining on the screen, if there are at least two.
fn span(event: &TouchEvent) -> Option<(Point2d, f64)> {
    let (count, sum) = event
        .remaining_pointers()
        .fold((0usize, Vector2d::zeros()), |(count, sum), pointer| {
            (count + 1, sum + pointer.position.coords)
        });
    if count < 2 {
        return None;
    }

    let count = count as f64;
    let focus = Point2d::from(sum / count);
    let mean_distance = event
        .remaining_pointers()
        .map(|pointer| pointer.position.distance(&focus))
        .sum::<f64>()
        / count;

    Some((focus, mean_distance * 2.0))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::control::Pointer;

    fn at(action: TouchAction, x: f64, y: f64, ms: u64) -> TouchEvent {
        TouchEvent::single(action, x, y, Duration::from_millis(ms))
    }

    fn two(action: TouchAction, index: usize, a: (f64, f64), b: (f64, f64)) -> TouchEvent {
        TouchEvent::new(
            action,
            index,
            vec![Pointer::new(0, a.0, a.1), Pointer::new(1, b.0, b.1)],
            Duration::ZERO,
        )
    }

    #[test]
    fn drag_starts_after_slop() {
        let mut detector = DragDetector::new(8.0);

        let update = detector.on_touch_event(&at(TouchAction::Down, 10.0, 10.0, 0));
        assert_eq!(update, DragUpdate::default());
        let update = detector.on_touch_event(&at(TouchAction::Move, 13.0, 14.0, 10));
        assert_eq!(update, DragUpdate::default());
        assert!(!detector.is_dragging());

        let update = detector.on_touch_event(&at(TouchAction::Move, 15.0, 14.0, 20));
        assert!(update.consumed);
        assert_eq!(update.gesture, Some(DragGesture::Moved(Vector2d::new(5.0, 4.0))));

        let update = detector.on_touch_event(&at(TouchAction::Move, 20.0, 4.0, 30));
        assert_eq!(update.gesture, Some(DragGesture::Moved(Vector2d::new(5.0, -10.0))));

        let update = detector.on_touch_event(&at(TouchAction::Up, 20.0, 4.0, 40));
        assert_eq!(update.gesture, Some(DragGesture::Finished(Vector2d::new(10.0, -6.0))));
        assert!(!detector.is_dragging());
    }

    #[test]
    fn second_pointer_ends_drag() {
        let mut detector = DragDetector::new(1.0);
        detector.on_touch_event(&at(TouchAction::Down, 0.0, 0.0, 0));
        detector.on_touch_event(&at(TouchAction::Move, 10.0, 0.0, 10));

        let second = two(TouchAction::PointerDown, 1, (10.0, 0.0), (50.0, 50.0));
        let update = detector.on_touch_event(&second);
        assert_eq!(update.gesture, Some(DragGesture::Finished(Vector2d::new(10.0, 0.0))));

        let update = detector.on_touch_event(&two(TouchAction::Move, 0, (20.0, 0.0), (50.0, 50.0)));
        assert_eq!(update, DragUpdate::default());
    }

    #[test]
    fn cancelled_drag() {
        let mut detector = DragDetector::new(1.0);
        detector.on_touch_event(&at(TouchAction::Down, 0.0, 0.0, 0));
        detector.on_touch_event(&at(TouchAction::Move, 0.0, 10.0, 10));

        let update = detector.on_touch_event(&at(TouchAction::Cancel, 0.0, 10.0, 20));
        assert_eq!(update.gesture, Some(DragGesture::Cancelled(Vector2d::new(0.0, 10.0))));
    }

    #[test]
    fn tap_without_drag_is_not_consumed() {
        let mut detector = DragDetector::new(8.0);
        detector.on_touch_event(&at(TouchAction::Down, 0.0, 0.0, 0));
        let update = detector.on_touch_event(&at(TouchAction::Up, 0.0, 0.0, 50));
        assert_eq!(update, DragUpdate::default());
    }

    #[test]
    fn double_tap() {
        let mut detector = TapDetector::default();

        assert_eq!(detector.on_touch_event(&at(TouchAction::Down, 100.0, 100.0, 0)), None);
        assert_eq!(
            detector.on_touch_event(&at(TouchAction::Up, 100.0, 100.0, 80)),
            Some(TapGesture::Tap(Point2d::new(100.0, 100.0)))
        );
        detector.on_touch_event(&at(TouchAction::Down, 110.0, 95.0, 250));
        assert_eq!(
            detector.on_touch_event(&at(TouchAction::Up, 110.0, 95.0, 300)),
            Some(TapGesture::DoubleTap(Point2d::new(100.0, 100.0)))
        );

        // The third tap starts a new sequence.
        detector.on_touch_event(&at(TouchAction::Down, 110.0, 95.0, 350));
        assert_matches!(
            detector.on_touch_event(&at(TouchAction::Up, 110.0, 95.0, 400)),
            Some(TapGesture::Tap(_))
        );
    }

    #[test]
    fn slow_or_distant_taps_are_not_double() {
        let mut detector = TapDetector::default();

        detector.on_touch_event(&at(TouchAction::Down, 0.0, 0.0, 0));
        detector.on_touch_event(&at(TouchAction::Up, 0.0, 0.0, 50));
        detector.on_touch_event(&at(TouchAction::Down, 0.0, 0.0, 1000));
        assert_matches!(
            detector.on_touch_event(&at(TouchAction::Up, 0.0, 0.0, 1050)),
            Some(TapGesture::Tap(_))
        );

        detector.on_touch_event(&at(TouchAction::Down, 300.0, 0.0, 1100));
        assert_matches!(
            detector.on_touch_event(&at(TouchAction::Up, 300.0, 0.0, 1150)),
            Some(TapGesture::Tap(_))
        );

        // Long press.
        detector.on_touch_event(&at(TouchAction::Down, 300.0, 0.0, 1200));
        assert_eq!(detector.on_touch_event(&at(TouchAction::Up, 300.0, 0.0, 1600)), None);
    }

    #[test]
    fn moved_touch_is_not_a_tap() {
        let mut detector = TapDetector::default();
        detector.on_touch_event(&at(TouchAction::Down, 0.0, 0.0, 0));
        detector.on_touch_event(&at(TouchAction::Move, 30.0, 0.0, 20));
        assert_eq!(detector.on_touch_event(&at(TouchAction::Up, 30.0, 0.0, 40)), None);
    }

    #[test]
    fn pinch_reports_span_ratio() {
        let mut detector = ScaleDetector::new(10.0);

        assert_eq!(detector.on_touch_event(&at(TouchAction::Down, 100.0, 100.0, 0)), None);
        assert!(!detector.is_in_progress());
        let second = two(TouchAction::PointerDown, 1, (100.0, 100.0), (200.0, 100.0));
        assert_eq!(detector.on_touch_event(&second), None);
        assert!(detector.is_in_progress());

        let gesture = detector
            .on_touch_event(&two(TouchAction::Move, 0, (50.0, 100.0), (250.0, 100.0)))
            .expect("pinch update");
        assert_abs_diff_eq!(gesture.scale_factor, 2.0);
        assert_abs_diff_eq!(gesture.focus, Point2d::new(150.0, 100.0));

        let gesture = detector
            .on_touch_event(&two(TouchAction::Move, 0, (100.0, 100.0), (200.0, 100.0)))
            .expect("pinch update");
        assert_abs_diff_eq!(gesture.scale_factor, 0.5);

        let lifted = two(TouchAction::PointerUp, 1, (100.0, 100.0), (200.0, 100.0));
        assert_eq!(detector.on_touch_event(&lifted), None);
        assert!(!detector.is_in_progress());
        assert_eq!(detector.on_touch_event(&at(TouchAction::Move, 10.0, 10.0, 0)), None);
    }

    #[test]
    fn small_spans_are_ignored() {
        let mut detector = ScaleDetector::new(10.0);
        detector.on_touch_event(&two(TouchAction::PointerDown, 1, (100.0, 100.0), (104.0, 100.0)));
        assert_eq!(
            detector.on_touch_event(&two(TouchAction::Move, 0, (100.0, 100.0), (130.0, 100.0))),
            None
        );
        assert_matches!(
            detector.on_touch_event(&two(TouchAction::Move, 0, (100.0, 100.0), (160.0, 100.0))),
            Some(ScaleGesture { scale_factor, .. }) if (scale_factor - 2.0).abs() < 1e-9
        );
    }
}
