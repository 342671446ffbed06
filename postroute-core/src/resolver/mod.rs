//! Resolve location identifiers into waypoints.
//!
//! The `GeocodeResolver` trait abstracts the external geocoding lookup. A
//! resolver maps an identifier such as a postcode to a [`Waypoint`](crate::Waypoint)
//! or reports it unknown. "Not found" is an ordinary outcome (`Ok(None)`);
//! errors are reserved for failures such as timeouts or malformed responses.

mod error;
mod provider;

pub use error::GeocodeError;
pub use provider::{GeocodeResolver, Resolution};
