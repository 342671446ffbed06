//! Ordered visiting sequences of waypoints.

use crate::Waypoint;

/// An ordered visiting sequence, start first and destination last.
///
/// # Examples
/// ```
/// use postroute_core::{Route, Waypoint};
///
/// # fn main() -> Result<(), postroute_core::WaypointError> {
/// let route = Route::new(vec![
///     Waypoint::new("A", 0.0, 0.0)?,
///     Waypoint::new("B", 0.0, 1.0)?,
/// ]);
/// assert_eq!(route.identifiers(), vec!["A", "B"]);
/// assert!((route.total_distance_km() - 111.195).abs() < 0.001);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    /// Construct a route from already ordered waypoints.
    #[must_use]
    pub const fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    /// Waypoints in visiting order.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Consume the route, returning its waypoints.
    #[must_use]
    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.waypoints
    }

    /// Identifiers in visiting order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.waypoints
            .iter()
            .map(|waypoint| waypoint.id().to_owned())
            .collect()
    }

    /// Number of waypoints on the route.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the route has no waypoints.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Sum of the haversine leg lengths in kilometres.
    #[must_use]
    pub fn total_distance_km(&self) -> f64 {
        self.waypoints
            .iter()
            .zip(self.waypoints.iter().skip(1))
            .map(|(from, to)| from.distance_km(to))
            .sum()
    }
}
