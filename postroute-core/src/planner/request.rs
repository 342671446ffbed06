//! Plan requests and their validation.

use thiserror::Error;

/// Parameters for a plan request.
///
/// `locations` is an unordered collection of identifiers to visit. It may
/// repeat identifiers and may include the start and destination; the planner
/// removes those before resolving.
///
/// # Examples
/// ```rust
/// use postroute_core::PlanRequest;
///
/// let request = PlanRequest::new(["BH12PE", "BH88AQ", "BH76HW"], "BH12PE", "BH76HW");
/// assert_eq!(request.intermediate_identifiers(), vec!["BH88AQ"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Identifiers to visit, in any order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub locations: Vec<String>,
    /// Identifier the route starts from.
    pub start: String,
    /// Identifier the route ends at.
    pub destination: String,
}

/// Validation errors for [`PlanRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanRequestError {
    /// The start identifier was blank.
    #[error("start identifier must not be empty")]
    EmptyStart,
    /// The destination identifier was blank.
    #[error("destination identifier must not be empty")]
    EmptyDestination,
}

impl PlanRequest {
    /// Construct a request from any collection of identifiers.
    #[must_use]
    pub fn new<I, S>(locations: I, start: impl Into<String>, destination: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
            start: start.into(),
            destination: destination.into(),
        }
    }

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns [`PlanRequestError`] when the start or destination is blank.
    pub fn validate(&self) -> Result<(), PlanRequestError> {
        if self.start_identifier().is_empty() {
            return Err(PlanRequestError::EmptyStart);
        }
        if self.destination_identifier().is_empty() {
            return Err(PlanRequestError::EmptyDestination);
        }
        Ok(())
    }

    /// Start identifier with surrounding whitespace removed.
    #[must_use]
    pub fn start_identifier(&self) -> &str {
        self.start.trim()
    }

    /// Destination identifier with surrounding whitespace removed.
    #[must_use]
    pub fn destination_identifier(&self) -> &str {
        self.destination.trim()
    }

    /// Identifiers to visit between start and destination.
    ///
    /// Blank entries and every occurrence of the start and destination are
    /// removed; remaining duplicates keep their first occurrence.
    #[must_use]
    pub fn intermediate_identifiers(&self) -> Vec<String> {
        let start = self.start_identifier();
        let destination = self.destination_identifier();
        let mut intermediates: Vec<String> = Vec::with_capacity(self.locations.len());
        for location in self.locations.iter().map(|raw| raw.trim()) {
            if location.is_empty() || location == start || location == destination {
                continue;
            }
            if intermediates.iter().any(|seen| seen == location) {
                continue;
            }
            intermediates.push(location.to_owned());
        }
        intermediates
    }
}
