use thiserror::Error;

use crate::WaypointError;

/// Errors from [`crate::resolver::GeocodeResolver::resolve`].
///
/// An unknown identifier is not an error; resolvers report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The identifier was empty after trimming whitespace.
    #[error("location identifier must not be empty")]
    EmptyIdentifier,

    /// The lookup did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },

    /// The geocoding service answered with an unexpected HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail from the client.
        message: String,
    },

    /// The request failed before a response was received.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Request URL.
        url: String,
        /// Error detail from the client.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse geocoder response: {message}")]
    ParseError {
        /// Decoder error detail.
        message: String,
    },

    /// The service reported a failure inside an otherwise valid response.
    #[error("geocoder reported status {status}: {message}")]
    ServiceError {
        /// Status embedded in the response body.
        status: u16,
        /// Error message embedded in the response body.
        message: String,
    },

    /// The service returned a coordinate outside valid WGS84 ranges.
    #[error("geocoder returned an invalid coordinate for {identifier}: {source}")]
    InvalidCoordinate {
        /// Identifier being resolved.
        identifier: String,
        /// Validation failure.
        #[source]
        source: WaypointError,
    },
}
