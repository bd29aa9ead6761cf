//! Error types used by the crate.

use meridian_types::error::MeridianTypesError;
use thiserror::Error;

/// Meridian error type.
#[derive(Debug, Error)]
pub enum MeridianError {
    /// Failed to read data from a dataset.
    #[error("failed to load data: {0}")]
    DataAccess(String),
    /// A dataset could not be reprojected into the viewport CRS.
    ///
    /// The view does no reprojection itself. [`Renderer`](crate::render::Renderer)s return
    /// this error for layers whose CRS differs from the viewport CRS and cannot be converted.
    #[error("failed to reproject data: {0}")]
    Reprojection(String),
    /// Rasterization of a render request failed.
    #[error("render failed: {0}")]
    Render(String),
    /// An object was created in an environment it cannot work in.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// Error reported by the geometry types.
    #[error(transparent)]
    Types(#[from] MeridianTypesError),
    /// Error from the operating system, e.g. failure to spawn the render thread.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
