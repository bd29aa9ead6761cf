use meridian_types::{AxisDirection, Point2d, Vector2d};
use nalgebra::{Matrix3, Vector2};

use crate::viewport::Viewport;

/// 2d affine transformation stored as a homogeneous 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
}

impl AffineTransform {
    /// Transformation that does nothing.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Transforms a point.
    pub fn map(&self, point: Point2d) -> Point2d {
        self.matrix.transform_point(&point)
    }

    /// Transforms a vector (a difference between two points). Translation is not applied.
    pub fn map_vector(&self, vector: Vector2d) -> Vector2d {
        self.matrix.transform_vector(&vector)
    }

    /// Inverse transformation, if the transformation is not degenerate.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix
            .try_inverse()
            .map(|matrix| Self { matrix })
    }

    /// The underlying homogeneous matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Pair of transformations between world coordinates of a [`Viewport`] and canvas pixels.
///
/// The whole viewport bounds are fit into the pixel area with a uniform scale and centered,
/// so one world unit has the same pixel length along both axes. If the viewport CRS has
/// its y axis pointing north, the y axis is flipped (screen y grows down).
///
/// The pipeline is a value computed from a viewport; it has to be rebuilt every time the
/// viewport bounds, CRS or size change. For degenerate viewports (zero pixel size or empty
/// bounds) both transformations are identities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformPipeline {
    world_to_canvas: AffineTransform,
    canvas_to_world: AffineTransform,
    scale: f64,
}

impl TransformPipeline {
    /// Computes transformations for the current state of the viewport.
    pub fn new(viewport: &Viewport) -> Self {
        let size = viewport.size();
        let bounds = viewport.bounds();

        let is_finite = bounds.x_min.is_finite()
            && bounds.y_min.is_finite()
            && bounds.x_max.is_finite()
            && bounds.y_max.is_finite();
        if size.is_zero() || bounds.is_empty() || !is_finite {
            return Self::identity();
        }

        let width = size.width() as f64;
        let height = size.height() as f64;
        let scale = (width / bounds.width()).min(height / bounds.height());
        let y_scale = match viewport.crs().y_axis() {
            AxisDirection::North => -scale,
            AxisDirection::South => scale,
        };

        let center = bounds.center();
        let matrix = Matrix3::new_translation(&Vector2::new(width / 2.0, height / 2.0))
            * Matrix3::new_nonuniform_scaling(&Vector2::new(scale, y_scale))
            * Matrix3::new_translation(&Vector2::new(-center.x, -center.y));

        let world_to_canvas = AffineTransform { matrix };
        let Some(canvas_to_world) = world_to_canvas.inverse() else {
            log::warn!("Viewport transformation is not invertible: {viewport:?}");
            return Self::identity();
        };

        Self {
            world_to_canvas,
            canvas_to_world,
            scale,
        }
    }

    /// Pipeline of a degenerate viewport: both directions are identities.
    pub fn identity() -> Self {
        Self {
            world_to_canvas: AffineTransform::identity(),
            canvas_to_world: AffineTransform::identity(),
            scale: 1.0,
        }
    }

    /// World to canvas (pixel) transformation.
    pub fn world_to_canvas(&self) -> &AffineTransform {
        &self.world_to_canvas
    }

    /// Canvas (pixel) to world transformation.
    pub fn canvas_to_world(&self) -> &AffineTransform {
        &self.canvas_to_world
    }

    /// Number of pixels per world unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Size of one pixel in world units.
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::identity()
    }
}
