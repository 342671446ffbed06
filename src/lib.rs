//! Facade crate for the Postroute route planner.
//!
//! This crate re-exports the core domain types and exposes the postcodes.io
//! resolver behind the `http-resolver` feature.

#![forbid(unsafe_code)]

pub use postroute_core::{
    EARTH_RADIUS_KM, GeocodeError, GeocodeResolver, OrderingStrategy, PlanError, PlanRequest,
    PlanRequestError, Resolution, Route, RoutePlanner, Waypoint, WaypointError, haversine_km,
    order_route,
};

#[cfg(feature = "http-resolver")]
pub use postroute_data::geocode::{
    HttpGeocodeResolver, HttpGeocodeResolverConfig, ResolverBuildError,
};
