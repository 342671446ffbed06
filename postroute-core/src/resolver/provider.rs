//! Geocode resolver trait and the per-identifier outcome alias.

use crate::Waypoint;

use super::error::GeocodeError;

/// Outcome of resolving one identifier: a waypoint, "not found", or an error.
pub type Resolution = Result<Option<Waypoint>, GeocodeError>;

/// Map location identifiers to coordinates.
///
/// Implementers must return a waypoint whose [`Waypoint::id`] equals the
/// identifier that was asked for, so routes echo the caller's tokens.
///
/// # Examples
///
/// ```rust
/// use postroute_core::{GeocodeError, GeocodeResolver, Resolution, Waypoint};
///
/// struct NullIsland;
///
/// impl GeocodeResolver for NullIsland {
///     fn resolve(&self, identifier: &str) -> Resolution {
///         if identifier.is_empty() {
///             return Err(GeocodeError::EmptyIdentifier);
///         }
///         if identifier != "ORIGIN" {
///             return Ok(None);
///         }
///         Waypoint::new(identifier, 0.0, 0.0)
///             .map(Some)
///             .map_err(|source| GeocodeError::InvalidCoordinate {
///                 identifier: identifier.to_owned(),
///                 source,
///             })
///     }
/// }
///
/// let found = NullIsland.resolve("ORIGIN")?;
/// assert!(found.is_some());
/// assert!(NullIsland.resolve("ELSEWHERE")?.is_none());
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait GeocodeResolver {
    /// Resolve a single identifier.
    ///
    /// Implementations must return `Err(GeocodeError::EmptyIdentifier)` when
    /// `identifier` is blank, and `Ok(None)` when it is well formed but
    /// unknown.
    fn resolve(&self, identifier: &str) -> Resolution;

    /// Resolve a batch of identifiers, returning one outcome per input in
    /// input order.
    ///
    /// The default resolves sequentially. Lookups are independent, so
    /// implementations backed by I/O may issue them concurrently.
    fn resolve_all(&self, identifiers: &[String]) -> Vec<Resolution> {
        identifiers
            .iter()
            .map(|identifier| self.resolve(identifier))
            .collect()
    }
}

impl<R: GeocodeResolver + ?Sized> GeocodeResolver for &R {
    fn resolve(&self, identifier: &str) -> Resolution {
        (**self).resolve(identifier)
    }

    fn resolve_all(&self, identifiers: &[String]) -> Vec<Resolution> {
        (**self).resolve_all(identifiers)
    }
}

impl<R: GeocodeResolver + ?Sized> GeocodeResolver for Box<R> {
    fn resolve(&self, identifier: &str) -> Resolution {
        (**self).resolve(identifier)
    }

    fn resolve_all(&self, identifiers: &[String]) -> Vec<Resolution> {
        (**self).resolve_all(identifiers)
    }
}
