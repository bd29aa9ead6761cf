use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::MeridianTypesError;

/// Coordinate reference system of a viewport or a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs {
    projection_type: ProjectionType,
    y_axis: AxisDirection,
}

/// Projection of a [`Crs`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ProjectionType {
    /// Nothing is known about the projection.
    Unknown,
    /// Geographic coordinates (longitude, latitude) in degrees.
    Geographic,
    /// Spherical Web Mercator.
    WebMercator,
    /// Any other projection, identified by its authority code, e.g. `EPSG:3035`.
    Other(String),
}

/// Direction in which the y coordinate of a CRS grows.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisDirection {
    /// Y grows up on the map. Screen y is inverted relative to world y.
    #[default]
    North,
    /// Y grows down, the same as screen pixels (image-like coordinates).
    South,
}

impl Crs {
    /// WGS84 geographic coordinates.
    pub const WGS84: Crs = Crs {
        projection_type: ProjectionType::Geographic,
        y_axis: AxisDirection::North,
    };

    /// Web Mercator.
    pub const EPSG3857: Crs = Crs {
        projection_type: ProjectionType::WebMercator,
        y_axis: AxisDirection::North,
    };

    /// CRS of unknown projection with y axis pointing north.
    pub const UNKNOWN: Crs = Crs {
        projection_type: ProjectionType::Unknown,
        y_axis: AxisDirection::North,
    };

    /// Creates a new CRS.
    pub fn new(projection_type: ProjectionType, y_axis: AxisDirection) -> Self {
        Self {
            projection_type,
            y_axis,
        }
    }

    /// Projection of the CRS.
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }

    /// Direction of the y axis.
    pub fn y_axis(&self) -> AxisDirection {
        self.y_axis
    }

    /// Returns a copy of the CRS with the given y axis direction.
    pub fn with_y_axis(&self, y_axis: AxisDirection) -> Self {
        Self {
            y_axis,
            ..self.clone()
        }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl FromStr for Crs {
    type Err = MeridianTypesError;

    /// Parses `EPSG:<code>` identifiers. Codes 4326 and 3857 (and its alias 900913) map to
    /// the predefined constants, other codes produce [`ProjectionType::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((authority, code)) = s.trim().split_once(':') else {
            return Err(MeridianTypesError::InvalidCrs(s.to_string()));
        };

        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MeridianTypesError::InvalidCrs(s.to_string()));
        }

        let authority = authority.to_ascii_uppercase();
        match (authority.as_str(), code) {
            ("EPSG", "4326") => Ok(Crs::WGS84),
            ("EPSG", "3857") | ("EPSG", "900913") => Ok(Crs::EPSG3857),
            (authority, code) if !authority.is_empty() => Ok(Crs::new(
                ProjectionType::Other(format!("{authority}:{code}")),
                AxisDirection::North,
            )),
            _ => Err(MeridianTypesError::InvalidCrs(s.to_string())),
        }
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.projection_type {
            ProjectionType::Unknown => write!(f, "unknown"),
            ProjectionType::Geographic => write!(f, "EPSG:4326"),
            ProjectionType::WebMercator => write!(f, "EPSG:3857"),
            ProjectionType::Other(code) => write!(f, "{code}"),
        }
    }
}
