//! Identified, validated WGS84 locations.

use geo::Coord;
use thiserror::Error;

use crate::distance::haversine_km;

/// Valid latitude range in decimal degrees.
const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in decimal degrees.
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A location identifier paired with its resolved coordinate.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. A waypoint
/// is immutable once constructed; the identifier is an opaque token such as a
/// postcode and is echoed back unchanged in planned routes.
///
/// # Examples
/// ```
/// use postroute_core::Waypoint;
///
/// # fn main() -> Result<(), postroute_core::WaypointError> {
/// let waypoint = Waypoint::new("BH12PE", 50.7209, -1.8806)?;
/// assert_eq!(waypoint.id(), "BH12PE");
/// assert_eq!(waypoint.latitude(), 50.7209);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Waypoint {
    id: String,
    location: Coord<f64>,
}

/// Errors returned by [`Waypoint::new`] and [`Waypoint::from_coord`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaypointError {
    /// Either component was NaN or infinite.
    #[error("coordinate ({latitude}, {longitude}) is not finite")]
    NonFinite {
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Waypoint {
    /// Validates and constructs a [`Waypoint`] from latitude and longitude.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError`] when either component is non-finite or out
    /// of range.
    pub fn new(
        id: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, WaypointError> {
        Self::from_coord(
            id,
            Coord {
                x: longitude,
                y: latitude,
            },
        )
    }

    /// Validates and constructs a [`Waypoint`] from a `geo` coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`WaypointError`] when either component is non-finite or out
    /// of range.
    pub fn from_coord(id: impl Into<String>, location: Coord<f64>) -> Result<Self, WaypointError> {
        let (latitude, longitude) = (location.y, location.x);
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(WaypointError::NonFinite {
                latitude,
                longitude,
            });
        }
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(WaypointError::LatitudeOutOfRange(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(WaypointError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            id: id.into(),
            location,
        })
    }

    /// Identifier supplied by the caller.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        haversine_km(self.location, other.location)
    }
}
