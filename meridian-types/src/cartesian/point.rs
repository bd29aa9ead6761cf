use nalgebra::{Point2, Scalar, Vector2};
use num_traits::{Float, Num};

/// Point with `f64` coordinates. Used both for screen pixels and world units.
pub type Point2d = Point2<f64>;

/// Difference between two [`Point2d`]s.
pub type Vector2d = Vector2<f64>;

/// A point in a 2d cartesian coordinate system.
pub trait CartesianPoint2d {
    /// Numeric type of the coordinates.
    type Num: Num + Copy + PartialOrd + Scalar;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Vector from `other` to `self`.
    fn sub(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Vector2<Self::Num> {
        Vector2::new(self.x() - other.x(), self.y() - other.y())
    }

    /// Squared euclidean distance.
    fn distance_sq(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let v = self.sub(other);
        v.x * v.x + v.y * v.y
    }

    /// Sum of the absolute coordinate differences. Cheap metric for touch slop checks.
    fn taxicab_distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num {
        let dx = if self.x() >= other.x() {
            self.x() - other.x()
        } else {
            other.x() - self.x()
        };
        let dy = if self.y() >= other.y() {
            self.y() - other.y()
        } else {
            other.y() - self.y()
        };

        dx + dy
    }

    /// Euclidean distance.
    fn distance(&self, other: &impl CartesianPoint2d<Num = Self::Num>) -> Self::Num
    where
        Self::Num: Float,
    {
        self.distance_sq(other).sqrt()
    }
}

impl<N: Num + Copy + PartialOrd + Scalar> CartesianPoint2d for Point2<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxicab_distance_is_symmetric() {
        let a = Point2d::new(1.0, 5.0);
        let b = Point2d::new(4.0, 1.0);

        assert_eq!(a.taxicab_distance(&b), 7.0);
        assert_eq!(b.taxicab_distance(&a), 7.0);
        assert_eq!(a.distance(&b), 5.0);
    }
}
