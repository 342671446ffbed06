use thiserror::Error;

use crate::GeocodeError;

use super::request::PlanRequestError;

/// Errors returned by [`crate::RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Request parameters were invalid, e.g. a blank start.
    #[error("invalid plan request: {0}")]
    InvalidRequest(#[from] PlanRequestError),

    /// The start identifier is unknown to the resolver.
    #[error("start location {identifier:?} could not be resolved")]
    StartNotFound {
        /// Identifier that was not found.
        identifier: String,
    },

    /// The destination identifier is unknown to the resolver.
    #[error("destination {identifier:?} could not be resolved")]
    DestinationNotFound {
        /// Identifier that was not found.
        identifier: String,
    },

    /// The resolver failed while looking up an identifier.
    #[error("failed to resolve {identifier:?}: {source}")]
    Geocode {
        /// Identifier being resolved.
        identifier: String,
        /// Resolver failure.
        #[source]
        source: GeocodeError,
    },
}
