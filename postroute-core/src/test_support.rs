//! In-memory `GeocodeResolver` used by unit, behaviour and property tests.

use std::collections::HashMap;
use std::sync::Mutex;

use geo::Coord;

use crate::{GeocodeError, GeocodeResolver, Resolution, Waypoint};

/// Resolver backed by a fixed table of coordinates.
///
/// Coordinates are validated on lookup, so an out-of-range entry surfaces as
/// [`GeocodeError::InvalidCoordinate`] just as a misbehaving service would.
/// Every lookup is recorded and can be inspected with [`Self::lookups`].
#[derive(Debug, Default)]
pub struct MemoryResolver {
    locations: HashMap<String, Coord<f64>>,
    failures: HashMap<String, GeocodeError>,
    lookups: Mutex<Vec<String>>,
}

impl MemoryResolver {
    /// Create a resolver that knows no identifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `identifier` at the given latitude and longitude.
    #[must_use]
    pub fn with_location(mut self, identifier: &str, latitude: f64, longitude: f64) -> Self {
        self.locations.insert(
            identifier.to_owned(),
            Coord {
                x: longitude,
                y: latitude,
            },
        );
        self
    }

    /// Make lookups of `identifier` fail with `error`.
    #[must_use]
    pub fn with_failure(mut self, identifier: &str, error: GeocodeError) -> Self {
        self.failures.insert(identifier.to_owned(), error);
        self
    }

    /// Identifiers looked up so far, in call order.
    #[must_use]
    pub fn lookups(&self) -> Vec<String> {
        self.lookups
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl GeocodeResolver for MemoryResolver {
    fn resolve(&self, identifier: &str) -> Resolution {
        if let Ok(mut calls) = self.lookups.lock() {
            calls.push(identifier.to_owned());
        }
        if identifier.trim().is_empty() {
            return Err(GeocodeError::EmptyIdentifier);
        }
        if let Some(error) = self.failures.get(identifier) {
            return Err(error.clone());
        }
        self.locations
            .get(identifier)
            .map(|location| {
                Waypoint::from_coord(identifier, *location).map_err(|source| {
                    GeocodeError::InvalidCoordinate {
                        identifier: identifier.to_owned(),
                        source,
                    }
                })
            })
            .transpose()
    }
}
