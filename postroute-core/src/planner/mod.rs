//! Resolve identifiers and order them into a route.
//!
//! [`RoutePlanner`] is the outer operation around the orderer. It removes the
//! start and destination from the location list, resolves every distinct
//! identifier once through a [`GeocodeResolver`], drops intermediates the
//! resolver does not know, and orders the rest.
//!
//! An unknown start or destination aborts the plan. [`RoutePlanner::plan`]
//! reports why; [`RoutePlanner::plan_identifiers`] flattens every failure to
//! an empty list for callers that only understand "route or nothing".

mod error;
mod request;

pub use error::PlanError;
pub use request::{PlanRequest, PlanRequestError};

use crate::{GeocodeResolver, OrderingStrategy, Resolution, Route, Waypoint};

/// Plans routes by resolving identifiers and ordering the waypoints.
///
/// The planner holds no per-request state, so a single instance may serve
/// concurrent callers when its resolver is `Sync`.
///
/// # Examples
/// ```rust
/// use postroute_core::{PlanRequest, RoutePlanner};
/// use postroute_core::test_support::MemoryResolver;
///
/// let resolver = MemoryResolver::new()
///     .with_location("S", 0.0, 0.0)
///     .with_location("P2", 0.0, 2.0)
///     .with_location("P1", 0.0, 1.0)
///     .with_location("D", 0.0, 10.0);
/// let planner = RoutePlanner::new(resolver);
///
/// let request = PlanRequest::new(["P2", "UNKNOWN", "P1"], "S", "D");
/// let route = planner.plan(&request)?;
/// assert_eq!(route.identifiers(), vec!["S", "P1", "P2", "D"]);
/// # Ok::<(), postroute_core::PlanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RoutePlanner<R> {
    resolver: R,
    strategy: OrderingStrategy,
}

impl<R> RoutePlanner<R>
where
    R: GeocodeResolver,
{
    /// Construct a planner using nearest-neighbour ordering.
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self::with_strategy(resolver, OrderingStrategy::default())
    }

    /// Construct a planner with an explicit ordering strategy.
    #[must_use]
    pub const fn with_strategy(resolver: R, strategy: OrderingStrategy) -> Self {
        Self { resolver, strategy }
    }

    /// Ordering strategy applied to resolved intermediates.
    #[must_use]
    pub const fn strategy(&self) -> OrderingStrategy {
        self.strategy
    }

    /// Resolver used for lookups.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Resolve and order the request into a route.
    ///
    /// # Errors
    ///
    /// - [`PlanError::InvalidRequest`] when the start or destination is blank.
    /// - [`PlanError::StartNotFound`] / [`PlanError::DestinationNotFound`]
    ///   when either endpoint is unknown to the resolver.
    /// - [`PlanError::Geocode`] when any lookup fails outright.
    pub fn plan(&self, request: &PlanRequest) -> Result<Route, PlanError> {
        request.validate()?;
        let start_id = request.start_identifier();
        let destination_id = request.destination_identifier();
        log::info!("planning route from {start_id} to {destination_id}");

        let intermediate_ids = request.intermediate_identifiers();
        let same_endpoints = start_id == destination_id;
        let mut lookups = Vec::with_capacity(intermediate_ids.len() + 2);
        lookups.push(start_id.to_owned());
        if !same_endpoints {
            lookups.push(destination_id.to_owned());
        }
        lookups.extend(intermediate_ids);

        let outcomes = self.resolver.resolve_all(&lookups);
        let mut resolved = lookups.into_iter().zip(outcomes);

        let start = take_endpoint(&mut resolved, start_id, |identifier| {
            PlanError::StartNotFound { identifier }
        })?;
        let destination = if same_endpoints {
            start.clone()
        } else {
            take_endpoint(&mut resolved, destination_id, |identifier| {
                PlanError::DestinationNotFound { identifier }
            })?
        };
        let intermediates = collect_intermediates(resolved)?;

        let route = self.strategy.order(&start, &intermediates, &destination);
        log::info!("planned route: {:?}", route.identifiers());
        Ok(route)
    }

    /// Resolve and order the request, returning only the identifiers.
    ///
    /// Any failure, including an unknown start or destination, yields an
    /// empty list. Use [`Self::plan`] to tell failures apart from routes.
    #[must_use]
    pub fn plan_identifiers(&self, request: &PlanRequest) -> Vec<String> {
        match self.plan(request) {
            Ok(route) => route.identifiers(),
            Err(err) => {
                log::warn!("returning empty route: {err}");
                Vec::new()
            }
        }
    }
}

fn take_endpoint<I>(
    resolved: &mut I,
    identifier: &str,
    not_found: impl FnOnce(String) -> PlanError,
) -> Result<Waypoint, PlanError>
where
    I: Iterator<Item = (String, Resolution)>,
{
    match resolved.next() {
        Some((_, Ok(Some(waypoint)))) => Ok(waypoint),
        Some((id, Ok(None))) => {
            log::info!("endpoint {id} could not be resolved");
            Err(not_found(id))
        }
        Some((id, Err(source))) => Err(PlanError::Geocode {
            identifier: id,
            source,
        }),
        None => Err(not_found(identifier.to_owned())),
    }
}

fn collect_intermediates<I>(resolved: I) -> Result<Vec<Waypoint>, PlanError>
where
    I: Iterator<Item = (String, Resolution)>,
{
    let mut waypoints = Vec::new();
    for (id, outcome) in resolved {
        match outcome {
            Ok(Some(waypoint)) => waypoints.push(waypoint),
            Ok(None) => log::warn!("dropping unresolved location {id}"),
            Err(source) => {
                log::error!("lookup of {id} failed: {source}");
                return Err(PlanError::Geocode {
                    identifier: id,
                    source,
                });
            }
        }
    }
    Ok(waypoints)
}
