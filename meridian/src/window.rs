use meridian_types::{Rect, Size};

/// Screen-space state of the committed bitmap.
///
/// The window keeps two pixel rectangles:
/// * the *buffer* rectangle is the geometry of the last committed bitmap, always `[0, 0, w, h]`;
/// * the *display* rectangle is where that bitmap is currently drawn on the screen.
///
/// During a gesture the display rectangle is moved and scaled so that the stale bitmap
/// follows the fingers without waiting for a new render. When a fresh bitmap is committed
/// the display rectangle is reset with [`Window::reinit`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Window {
    buffer: Rect,
    display: Rect,
}

impl Window {
    /// Creates a window of zero size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both rectangles to `[0, 0, width, height]`.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.buffer = Rect::from_size(Size::new(width as f64, height as f64));
        self.display = self.buffer;
    }

    /// Zooms the display rectangle about the screen point `(focus_x, focus_y)`.
    ///
    /// `factor` is the change of the visible world extent, the same value that is applied to
    /// the viewport bounds: `factor > 1` zooms out (the bitmap is drawn smaller), `factor < 1`
    /// zooms in. The focus point keeps its position on the screen. The result is not clamped
    /// to the buffer.
    pub fn scale(&mut self, factor: f64, focus_x: f64, focus_y: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring invalid window scale factor {factor}");
            return;
        }

        let display = &mut self.display;
        *display = Rect::new(
            focus_x + (display.x_min - focus_x) / factor,
            focus_y + (display.y_min - focus_y) / factor,
            focus_x + (display.x_max - focus_x) / factor,
            focus_y + (display.y_max - focus_y) / factor,
        );
    }

    /// Moves the display rectangle by `(dx, dy)` pixels.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.display = self.display.translate(dx, dy);
    }

    /// Discards accumulated scale and translation. Called once per committed bitmap.
    pub fn reinit(&mut self) {
        self.display = self.buffer;
    }

    /// Source rectangle of the paint operation: the full committed bitmap.
    pub fn window(&self) -> Rect {
        self.buffer
    }

    /// Destination rectangle of the paint operation.
    pub fn canvas(&self) -> Rect {
        self.display
    }

    /// Returns true if the display rectangle differs from the buffer rectangle.
    pub fn is_transformed(&self) -> bool {
        self.buffer != self.display
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn resize_resets_both_rectangles() {
        let mut window = Window::new();
        for (w, h) in [(100, 50), (1, 1), (1920, 1080), (0, 0)] {
            window.translate(13.0, -7.0);
            window.scale(0.3, 10.0, 10.0);
            window.resize(w, h);

            let expected = Rect::new(0.0, 0.0, w as f64, h as f64);
            assert_eq!(window.window(), expected);
            assert_eq!(window.canvas(), expected);
            assert!(!window.is_transformed());
        }
    }

    #[test]
    fn reinit_discards_gesture_state() {
        let mut window = Window::new();
        window.resize(400, 300);
        window.translate(25.0, 40.0);
        window.scale(0.5, 200.0, 150.0);
        window.translate(-3.0, 1.0);
        assert!(window.is_transformed());

        window.reinit();
        assert_eq!(window.canvas(), window.window());
    }

    #[test]
    fn scale_keeps_focus_fixed() {
        let mut window = Window::new();
        window.resize(200, 100);

        // 2x zoom in about (50, 25).
        window.scale(0.5, 50.0, 25.0);
        assert_abs_diff_eq!(window.canvas(), Rect::new(-50.0, -25.0, 350.0, 175.0));

        // The focus point maps to the same buffer pixel as before.
        let canvas = window.canvas();
        let buffer_x = (50.0 - canvas.x_min) / canvas.width() * 200.0;
        let buffer_y = (25.0 - canvas.y_min) / canvas.height() * 100.0;
        assert_abs_diff_eq!(buffer_x, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(buffer_y, 25.0, epsilon = 1e-9);
    }

    #[test]
    fn zoom_out_shrinks_display() {
        let mut window = Window::new();
        window.resize(200, 100);
        window.scale(2.0, 0.0, 0.0);
        assert_abs_diff_eq!(window.canvas(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn scale_round_trip() {
        for factor in [1e-3, 0.25, 0.9, 1.0, 1.7, 4.0, 250.0] {
            let mut window = Window::new();
            window.resize(640, 480);
            window.translate(12.0, -30.0);
            let before = window.canvas();

            window.scale(factor, 123.0, 456.0);
            window.scale(1.0 / factor, 123.0, 456.0);

            assert_abs_diff_eq!(window.canvas(), before, epsilon = 1e-6);
        }
    }

    #[test]
    fn invalid_factor_is_ignored() {
        let mut window = Window::new();
        window.resize(10, 10);
        window.scale(0.0, 5.0, 5.0);
        window.scale(f64::NAN, 5.0, 5.0);
        window.scale(-1.0, 5.0, 5.0);
        assert!(!window.is_transformed());
    }
}
