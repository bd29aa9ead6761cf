//! Geometry primitives shared by the `meridian` map view.
//!
//! The crate is intentionally small: it contains the cartesian types the view needs to
//! describe screen and world rectangles ([`Rect`], [`Size`], [`Point2d`]) and an opaque
//! coordinate reference system identifier ([`Crs`]). Projection math is out of scope.

pub mod cartesian;
pub mod error;
pub mod geo;

pub use cartesian::{CartesianPoint2d, Point2d, Rect, Size, Vector2d};
pub use geo::{AxisDirection, Crs, ProjectionType};
