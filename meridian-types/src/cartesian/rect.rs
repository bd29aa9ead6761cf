use approx::AbsDiffEq;
use nalgebra::{Point2, Scalar};
use num_traits::Num;

use crate::cartesian::point::CartesianPoint2d;
use crate::cartesian::size::Size;

/// Axis-aligned rectangle.
///
/// The same type describes world envelopes (viewport bounds) and pixel rectangles (the window
/// buffer and display rectangles). No normalization is done: a rectangle with `x_max < x_min`
/// is simply [empty](Rect::is_empty).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect<N = f64> {
    /// Left edge.
    pub x_min: N,
    /// Bottom edge in world space, top edge in screen space.
    pub y_min: N,
    /// Right edge.
    pub x_max: N,
    /// Top edge in world space, bottom edge in screen space.
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd + Scalar> Rect<N> {
    /// Creates a new rectangle.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Rectangle `[0, 0, width, height]`.
    pub fn from_size(size: Size<N>) -> Self {
        Self::new(N::zero(), N::zero(), size.width(), size.height())
    }

    /// Extent along the x axis.
    pub fn width(&self) -> N {
        self.x_max - self.x_min
    }

    /// Extent along the y axis.
    pub fn height(&self) -> N {
        self.y_max - self.y_min
    }

    /// Returns true if the rectangle has no positive area.
    pub fn is_empty(&self) -> bool {
        self.width() <= N::zero() || self.height() <= N::zero()
    }

    /// Center point.
    pub fn center(&self) -> Point2<N> {
        let two = N::one() + N::one();
        Point2::new(
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        )
    }

    /// Scales the rectangle by `factor` keeping `focus` at the same relative position.
    ///
    /// `factor > 1` grows the rectangle, `factor < 1` shrinks it. The focus point does not
    /// have to be inside the rectangle.
    pub fn scale_about(&self, factor: N, focus: &impl CartesianPoint2d<Num = N>) -> Self {
        let scale = |value: N, origin: N| origin + (value - origin) * factor;
        Self {
            x_min: scale(self.x_min, focus.x()),
            y_min: scale(self.y_min, focus.y()),
            x_max: scale(self.x_max, focus.x()),
            y_max: scale(self.y_max, focus.y()),
        }
    }

    /// Moves the rectangle by the given offsets.
    pub fn translate(&self, dx: N, dy: N) -> Self {
        Self {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }
}

impl<N: AbsDiffEq> AbsDiffEq for Rect<N>
where
    N::Epsilon: Copy,
{
    type Epsilon = N::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        N::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x_min.abs_diff_eq(&other.x_min, epsilon)
            && self.y_min.abs_diff_eq(&other.y_min, epsilon)
            && self.x_max.abs_diff_eq(&other.x_max, epsilon)
            && self.y_max.abs_diff_eq(&other.y_max, epsilon)
    }
}
