use num_traits::Num;

/// Width and height of a rectangular area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size<N = f64> {
    width: N,
    height: N,
}

impl<N: Num + PartialOrd + Copy> Size<N> {
    /// Creates a new size.
    pub fn new(width: N, height: N) -> Self {
        Self { width, height }
    }

    /// Width.
    pub fn width(&self) -> N {
        self.width
    }

    /// Height.
    pub fn height(&self) -> N {
        self.height
    }

    /// Returns true if either dimension is not positive.
    pub fn is_zero(&self) -> bool {
        self.width <= N::zero() || self.height <= N::zero()
    }
}
