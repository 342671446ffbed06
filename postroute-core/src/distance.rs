//! Great-circle distance between WGS84 coordinates.
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]. The result is symmetric and zero for identical
//! coordinates, within floating-point tolerance.

use geo::Coord;

/// Mean Earth radius used for all distance calculations, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Return the haversine distance between `a` and `b` in kilometres.
///
/// Coordinates follow the `geo` convention: `x = longitude`, `y = latitude`,
/// both in decimal degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use postroute_core::haversine_km;
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let east = Coord { x: 1.0, y: 0.0 };
/// let km = haversine_km(origin, east);
/// assert!((km - 111.195).abs() < 0.001);
/// assert_eq!(haversine_km(origin, origin), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine distance is inherently floating-point maths"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = b.x.to_radians() - a.x.to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lon = (d_lon / 2.0).sin();
    // Rounding can push near-antipodal values fractionally above one.
    let h = (sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lon * sin_lon).min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
