//! Core domain types for the Postroute engine.
//!
//! Waypoints pair a caller-supplied identifier (typically a postcode) with a
//! validated WGS84 coordinate. The [`order_route`] function sequences them
//! with a greedy nearest-neighbour heuristic over haversine distance, and
//! [`RoutePlanner`] wraps that in the outer "resolve, then order" operation
//! driven by a [`GeocodeResolver`].
//!
//! Constructors return `Result` to surface invalid input early; ordering
//! itself is total over valid waypoints.

#![forbid(unsafe_code)]

pub mod distance;
mod ordering;
pub mod planner;
pub mod resolver;
mod route;
#[doc(hidden)]
pub mod test_support;
mod waypoint;

pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use ordering::{OrderingStrategy, order_route};
pub use planner::{PlanError, PlanRequest, PlanRequestError, RoutePlanner};
pub use resolver::{GeocodeError, GeocodeResolver, Resolution};
pub use route::Route;
pub use waypoint::{Waypoint, WaypointError};
