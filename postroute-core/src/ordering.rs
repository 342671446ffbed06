//! Visiting-order heuristics over resolved waypoints.
//!
//! [`order_route`] is the greedy nearest-neighbour heuristic: from the
//! current position it always moves to the closest unvisited intermediate,
//! recomputing distances after every step. It makes no optimality promise.
//!
//! Ties are broken by input order; the earliest equidistant intermediate wins,
//! so identical inputs always produce identical routes.

use crate::{Route, Waypoint};

/// Heuristic used to order intermediate waypoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum OrderingStrategy {
    /// Repeatedly visit the closest unvisited intermediate to the current
    /// position.
    #[default]
    NearestNeighbour,
    /// Visit intermediates in ascending distance from the start, sorting
    /// once. Cheaper, but ignores where the previous leg ended.
    Radial,
}

impl OrderingStrategy {
    /// Order `intermediates` between `start` and `destination`.
    ///
    /// The caller's slice is left untouched; the route owns clones of every
    /// waypoint. `destination` is appended unless its identifier equals the
    /// identifier of the last waypoint already on the route.
    #[must_use]
    pub fn order(self, start: &Waypoint, intermediates: &[Waypoint], destination: &Waypoint) -> Route {
        let mut visited = match self {
            Self::NearestNeighbour => nearest_neighbour(start, intermediates),
            Self::Radial => radial(start, intermediates),
        };
        if visited.last().map(Waypoint::id) != Some(destination.id()) {
            visited.push(destination.clone());
        }
        log::debug!(
            "ordered {} intermediates with {:?} into {} stops",
            intermediates.len(),
            self,
            visited.len()
        );
        Route::new(visited)
    }
}

/// Order `intermediates` from `start` to `destination` by nearest neighbour.
///
/// The result has `1 + intermediates.len()` waypoints, plus one when the
/// destination identifier differs from the last visited waypoint.
///
/// # Examples
/// ```
/// use postroute_core::{Waypoint, order_route};
///
/// # fn main() -> Result<(), postroute_core::WaypointError> {
/// let start = Waypoint::new("S", 0.0, 0.0)?;
/// let stops = vec![
///     Waypoint::new("P1", 0.0, 1.0)?,
///     Waypoint::new("P5", 0.0, 5.0)?,
///     Waypoint::new("P2", 0.0, 2.0)?,
/// ];
/// let destination = Waypoint::new("D", 0.0, 10.0)?;
///
/// let route = order_route(&start, &stops, &destination);
/// assert_eq!(route.identifiers(), vec!["S", "P1", "P2", "P5", "D"]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn order_route(start: &Waypoint, intermediates: &[Waypoint], destination: &Waypoint) -> Route {
    OrderingStrategy::NearestNeighbour.order(start, intermediates, destination)
}

fn nearest_neighbour<'a>(start: &'a Waypoint, intermediates: &'a [Waypoint]) -> Vec<Waypoint> {
    let mut remaining: Vec<&Waypoint> = intermediates.iter().collect();
    let mut visited = Vec::with_capacity(intermediates.len() + 2);
    visited.push(start.clone());

    let mut current = start;
    while let Some((index, distance)) = nearest(current, &remaining) {
        // `Vec::remove` keeps the survivors in input order for later ties.
        let next = remaining.remove(index);
        log::debug!("nearest to {} is {} ({distance:.3} km)", current.id(), next.id());
        visited.push(next.clone());
        current = next;
    }
    visited
}

/// Index and distance of the candidate closest to `from`; first wins on ties.
fn nearest(from: &Waypoint, candidates: &[&Waypoint]) -> Option<(usize, f64)> {
    candidates
        .iter()
        .map(|candidate| from.distance_km(candidate))
        .enumerate()
        .fold(None, |best, (index, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        })
}

fn radial(start: &Waypoint, intermediates: &[Waypoint]) -> Vec<Waypoint> {
    let mut by_distance: Vec<(f64, &Waypoint)> = intermediates
        .iter()
        .map(|waypoint| (start.distance_km(waypoint), waypoint))
        .collect();
    // Stable sort: equidistant waypoints keep their input order.
    by_distance.sort_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs));

    let mut visited = Vec::with_capacity(intermediates.len() + 2);
    visited.push(start.clone());
    for (_, waypoint) in by_distance {
        if visited.last().map(Waypoint::id) == Some(waypoint.id()) {
            continue;
        }
        visited.push(waypoint.clone());
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn equator(id: &str, longitude: f64) -> Waypoint {
        Waypoint::new(id, 0.0, longitude).expect("valid waypoint")
    }

    #[fixture]
    fn start() -> Waypoint {
        equator("S", 0.0)
    }

    #[fixture]
    fn destination() -> Waypoint {
        equator("D", 10.0)
    }

    #[rstest]
    fn orders_by_nearest_neighbour(start: Waypoint, destination: Waypoint) {
        let stops = vec![equator("P1", 1.0), equator("P5", 5.0), equator("P2", 2.0)];
        let route = order_route(&start, &stops, &destination);
        assert_eq!(route.identifiers(), vec!["S", "P1", "P2", "P5", "D"]);
    }

    #[rstest]
    fn empty_intermediates_yield_start_and_destination(start: Waypoint, destination: Waypoint) {
        let route = order_route(&start, &[], &destination);
        assert_eq!(route.identifiers(), vec!["S", "D"]);
    }

    #[rstest]
    fn destination_matching_start_is_not_duplicated(start: Waypoint) {
        let route = order_route(&start, &[], &start.clone());
        assert_eq!(route.identifiers(), vec!["S"]);
    }

    #[rstest]
    fn destination_reached_last_is_not_duplicated(start: Waypoint) {
        let stops = vec![equator("P1", 1.0), equator("D", 3.0)];
        let destination = equator("D", 3.0);
        let route = order_route(&start, &stops, &destination);
        assert_eq!(route.identifiers(), vec!["S", "P1", "D"]);
    }

    #[rstest]
    fn destination_with_same_coordinate_but_new_id_is_appended(start: Waypoint) {
        let stops = vec![equator("P3", 3.0)];
        let destination = equator("D", 3.0);
        let route = order_route(&start, &stops, &destination);
        assert_eq!(route.identifiers(), vec!["S", "P3", "D"]);
    }

    #[rstest]
    fn ties_are_broken_by_input_order(start: Waypoint, destination: Waypoint) {
        let west = equator("W", -1.0);
        let east = equator("E", 1.0);

        let route = order_route(&start, &[west.clone(), east.clone()], &destination);
        assert_eq!(route.identifiers(), vec!["S", "W", "E", "D"]);

        let swapped = order_route(&start, &[east, west], &destination);
        assert_eq!(swapped.identifiers(), vec!["S", "E", "W", "D"]);
    }

    #[rstest]
    fn recomputes_distance_from_current_position(start: Waypoint, destination: Waypoint) {
        // Radially B is nearer than C, but C is nearer to A than B is.
        let a = equator("A", 1.0);
        let b = equator("B", -1.5);
        let c = equator("C", 2.0);
        let stops = vec![a, b, c];

        let nearest = order_route(&start, &stops, &destination);
        assert_eq!(nearest.identifiers(), vec!["S", "A", "C", "B", "D"]);

        let radial = OrderingStrategy::Radial.order(&start, &stops, &destination);
        assert_eq!(radial.identifiers(), vec!["S", "A", "B", "C", "D"]);
    }

    #[rstest]
    fn does_not_mutate_caller_slice(start: Waypoint, destination: Waypoint) {
        let stops = vec![equator("P5", 5.0), equator("P1", 1.0)];
        let before = stops.clone();
        let _route = order_route(&start, &stops, &destination);
        assert_eq!(stops, before);
    }

    #[rstest]
    #[case(OrderingStrategy::NearestNeighbour)]
    #[case(OrderingStrategy::Radial)]
    fn strategies_are_deterministic(
        #[case] strategy: OrderingStrategy,
        start: Waypoint,
        destination: Waypoint,
    ) {
        let stops = vec![equator("P3", 3.0), equator("N3", -3.0), equator("P1", 1.0)];
        let first = strategy.order(&start, &stops, &destination);
        let second = strategy.order(&start, &stops, &destination);
        assert_eq!(first, second);
    }

    #[rstest]
    fn radial_skips_repeated_identifier(start: Waypoint, destination: Waypoint) {
        let stops = vec![equator("P1", 1.0), equator("P1", 1.0)];
        let route = OrderingStrategy::Radial.order(&start, &stops, &destination);
        assert_eq!(route.identifiers(), vec!["S", "P1", "D"]);
    }

    #[rstest]
    fn default_strategy_is_nearest_neighbour() {
        assert_eq!(OrderingStrategy::default(), OrderingStrategy::NearestNeighbour);
    }
}
