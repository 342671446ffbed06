//! Test utilities for geocode resolvers.
//!
//! This module provides [`StubGeocodeResolver`], a deterministic test double
//! that replays canned postcodes.io response bodies through the same
//! conversion as [`super::HttpGeocodeResolver`], without making HTTP
//! requests.

use std::collections::HashMap;

use postroute_core::{GeocodeError, GeocodeResolver, Resolution};

use super::postcodes::LookupResponse;
use super::provider::convert_response;

/// Stub `GeocodeResolver` for testing.
///
/// Identifiers without a configured response behave like an HTTP 404 and
/// resolve to `Ok(None)`.
///
/// # Example
///
/// ```
/// use postroute_core::GeocodeResolver;
/// use postroute_data::geocode::test_support::StubGeocodeResolver;
///
/// let resolver = StubGeocodeResolver::new()
///     .with_body(
///         "BH12PE",
///         r#"{"status":200,"result":{"postcode":"BH1 2PE","latitude":50.72,"longitude":-1.88}}"#,
///     );
///
/// let waypoint = resolver.resolve("BH12PE").expect("lookup should succeed");
/// assert_eq!(waypoint.map(|w| w.latitude()), Some(50.72));
/// assert!(resolver.resolve("ZZ99ZZ").expect("lookup should succeed").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubGeocodeResolver {
    responses: HashMap<String, StubResponse>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Body(String),
    Error(GeocodeError),
}

impl StubGeocodeResolver {
    /// Create a resolver that answers 404 for every identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer lookups of `identifier` with the given JSON body.
    #[must_use]
    pub fn with_body(mut self, identifier: &str, body: impl Into<String>) -> Self {
        self.responses
            .insert(identifier.to_owned(), StubResponse::Body(body.into()));
        self
    }

    /// Answer lookups of `identifier` with a found postcode at the given
    /// coordinates.
    #[must_use]
    pub fn with_postcode(self, identifier: &str, latitude: f64, longitude: f64) -> Self {
        let body = serde_json::json!({
            "status": 200,
            "result": {
                "postcode": identifier,
                "latitude": latitude,
                "longitude": longitude,
            }
        });
        self.with_body(identifier, body.to_string())
    }

    /// Fail lookups of `identifier` with the given error.
    #[must_use]
    pub fn with_error(mut self, identifier: &str, error: GeocodeError) -> Self {
        self.responses
            .insert(identifier.to_owned(), StubResponse::Error(error));
        self
    }
}

impl GeocodeResolver for StubGeocodeResolver {
    fn resolve(&self, identifier: &str) -> Resolution {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyIdentifier);
        }

        match self.responses.get(trimmed) {
            None => Ok(None),
            Some(StubResponse::Error(error)) => Err(error.clone()),
            Some(StubResponse::Body(body)) => {
                let response: LookupResponse =
                    serde_json::from_str(body).map_err(|err| GeocodeError::ParseError {
                        message: err.to_string(),
                    })?;
                convert_response(trimmed, response)
            }
        }
    }
}
