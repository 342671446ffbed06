//! HTTP-based geocode resolvers for postcode lookup services.
//!
//! This module provides [`HttpGeocodeResolver`], an implementation of
//! [`postroute_core::GeocodeResolver`] that looks up UK postcodes against a
//! postcodes.io compatible service.
//!
//! # Architecture
//!
//! Each identifier becomes one `GET {base_url}/postcodes/{identifier}` call.
//! The synchronous [`GeocodeResolver`](postroute_core::GeocodeResolver) trait
//! is implemented by blocking on async HTTP calls internally, keeping the
//! core library embeddable in synchronous contexts. Batched lookups through
//! `resolve_all` run concurrently up to a configured limit.
//!
//! # Example
//!
//! ```no_run
//! use postroute_data::geocode::{HttpGeocodeResolver, HttpGeocodeResolverConfig};
//! use postroute_core::GeocodeResolver;
//! use std::time::Duration;
//!
//! // Create a resolver with custom configuration
//! let config = HttpGeocodeResolverConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_max_concurrent_requests(4);
//! let resolver = HttpGeocodeResolver::with_config(config)?;
//!
//! // Or use the public service
//! let resolver = HttpGeocodeResolver::postcodes_io()?;
//!
//! if let Some(waypoint) = resolver.resolve("BH12PE")? {
//!     println!("{} is at {:?}", waypoint.id(), waypoint.location());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod postcodes;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpGeocodeResolver, HttpGeocodeResolverConfig,
    ResolverBuildError,
};
