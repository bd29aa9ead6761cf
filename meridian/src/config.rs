use std::time::Duration;

/// Name of the render worker thread.
pub const RENDER_THREAD_NAME: &str = "meridian-render";

const DEFAULT_TOUCH_SLOP: f64 = 8.0;
const DEFAULT_TAP_TIMEOUT: Duration = Duration::from_millis(200);
const DEFAULT_DOUBLE_TAP_TIMEOUT: Duration = Duration::from_millis(500);
const DEFAULT_DOUBLE_TAP_SLOP: f64 = 100.0;
const DEFAULT_DOUBLE_TAP_ZOOM: f64 = 0.5;
const DEFAULT_MIN_PINCH_SPAN: f64 = 16.0;

/// When the pan gesture writes its accumulated movement into the viewport.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PanCommit {
    /// The window follows the finger during the drag; the viewport is updated once, when the
    /// finger is lifted. One render per gesture.
    #[default]
    OnGestureEnd,
    /// The viewport is updated on every drag step. Every step submits a render; the render
    /// worker coalesces the intermediate ones.
    Continuous,
}

/// Configuration of the gesture handling of a [`MapView`](crate::MapView).
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapViewConfig {
    touch_slop: f64,
    tap_timeout: Duration,
    double_tap_timeout: Duration,
    double_tap_slop: f64,
    double_tap_zoom: f64,
    min_pinch_span: f64,
    pan_commit: PanCommit,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            tap_timeout: DEFAULT_TAP_TIMEOUT,
            double_tap_timeout: DEFAULT_DOUBLE_TAP_TIMEOUT,
            double_tap_slop: DEFAULT_DOUBLE_TAP_SLOP,
            double_tap_zoom: DEFAULT_DOUBLE_TAP_ZOOM,
            min_pinch_span: DEFAULT_MIN_PINCH_SPAN,
            pan_commit: PanCommit::default(),
        }
    }
}

impl MapViewConfig {
    /// Distance in pixels (taxicab) a pointer has to travel before a drag starts.
    pub fn touch_slop(&self) -> f64 {
        self.touch_slop
    }

    /// Sets the distance a pointer has to travel before a drag starts.
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Sets the distance a pointer has to travel before a drag starts.
    pub fn set_touch_slop(&mut self, slop: f64) {
        self.touch_slop = slop;
    }

    /// Maximum time between pointer down and up for the touch to count as a tap.
    pub fn tap_timeout(&self) -> Duration {
        self.tap_timeout
    }

    /// Sets the maximum duration of a tap.
    pub fn with_tap_timeout(mut self, timeout: Duration) -> Self {
        self.tap_timeout = timeout;
        self
    }

    /// Sets the maximum duration of a tap.
    pub fn set_tap_timeout(&mut self, timeout: Duration) {
        self.tap_timeout = timeout;
    }

    /// Maximum time between the first and the second tap of a double tap.
    pub fn double_tap_timeout(&self) -> Duration {
        self.double_tap_timeout
    }

    /// Sets the maximum time between the taps of a double tap.
    pub fn with_double_tap_timeout(mut self, timeout: Duration) -> Self {
        self.double_tap_timeout = timeout;
        self
    }

    /// Sets the maximum time between the taps of a double tap.
    pub fn set_double_tap_timeout(&mut self, timeout: Duration) {
        self.double_tap_timeout = timeout;
    }

    /// Maximum distance in pixels between the two taps of a double tap.
    pub fn double_tap_slop(&self) -> f64 {
        self.double_tap_slop
    }

    /// Sets the maximum distance between the two taps of a double tap.
    pub fn with_double_tap_slop(mut self, slop: f64) -> Self {
        self.double_tap_slop = slop;
        self
    }

    /// Sets the maximum distance between the two taps of a double tap.
    pub fn set_double_tap_slop(&mut self, slop: f64) {
        self.double_tap_slop = slop;
    }

    /// Factor applied to the viewport bounds on a double tap.
    ///
    /// The value of `0.5` means the visible world extent is halved, so the map is zoomed in
    /// twice.
    pub fn double_tap_zoom(&self) -> f64 {
        self.double_tap_zoom
    }

    /// Sets the factor applied to the viewport bounds on a double tap.
    pub fn with_double_tap_zoom(mut self, factor: f64) -> Self {
        self.double_tap_zoom = factor;
        self
    }

    /// Sets the factor applied to the viewport bounds on a double tap.
    pub fn set_double_tap_zoom(&mut self, factor: f64) {
        self.double_tap_zoom = factor;
    }

    /// Minimum span in pixels between the pinching pointers. Smaller spans are not reported,
    /// the scale factor gets too unstable.
    pub fn min_pinch_span(&self) -> f64 {
        self.min_pinch_span
    }

    /// Sets the minimum pinch span.
    pub fn with_min_pinch_span(mut self, span: f64) -> Self {
        self.min_pinch_span = span;
        self
    }

    /// Sets the minimum pinch span.
    pub fn set_min_pinch_span(&mut self, span: f64) {
        self.min_pinch_span = span;
    }

    /// When the pan gesture updates the viewport.
    pub fn pan_commit(&self) -> PanCommit {
        self.pan_commit
    }

    /// Sets when the pan gesture updates the viewport.
    pub fn with_pan_commit(mut self, commit: PanCommit) -> Self {
        self.pan_commit = commit;
        self
    }

    /// Sets when the pan gesture updates the viewport.
    pub fn set_pan_commit(&mut self, commit: PanCommit) {
        self.pan_commit = commit;
    }
}
