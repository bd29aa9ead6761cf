//! Coordinate reference system identifiers.
//!
//! Reprojection is not provided by this crate. A [`Crs`] is only used to tell the map view
//! which units the viewport bounds are in and which way the y axis points.

mod crs;

pub use crs::{AxisDirection, Crs, ProjectionType};
