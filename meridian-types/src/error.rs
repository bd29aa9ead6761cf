//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeridianTypesError {
    /// CRS identifier could not be parsed.
    #[error("invalid CRS identifier: {0}")]
    InvalidCrs(String),
}
