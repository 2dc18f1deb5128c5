//! Solution and violation types.

use std::collections::BTreeSet;

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Route has fewer than two stations.
    RouteTooShort {
        /// Route index in the solution.
        route_index: usize,
    },
    /// Two consecutive stations are not joined by the recorded connection.
    MissingConnection {
        /// Route index in the solution.
        route_index: usize,
        /// Hop position within the route.
        hop: usize,
    },
    /// Route duration exceeds the per-route limit.
    DurationExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Actual duration.
        minutes: u64,
        /// Maximum allowed duration.
        limit: u32,
    },
    /// Solution holds more routes than allowed.
    TooManyRoutes {
        /// Actual route count.
        routes: usize,
        /// Maximum route count.
        max_routes: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A line plan: an ordered set of routes.
///
/// Coverage and totals are always derived from the routes, never cached.
///
/// # Examples
///
/// ```
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::{Route, Solution};
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 10).unwrap();
/// let net = b.build();
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::from_stations(&net, &[0, 1], 120).unwrap());
/// sol.add_route(Route::from_stations(&net, &[2, 1, 0], 120).unwrap());
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.total_minutes(), 30);
/// assert_eq!(sol.coverage_set().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a solution from routes.
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the solution, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Sum of all route durations.
    pub fn total_minutes(&self) -> u64 {
        self.routes.iter().map(|r| u64::from(r.minutes())).sum()
    }

    /// Distinct connections touched by at least one route.
    pub fn coverage_set(&self) -> BTreeSet<usize> {
        self.routes
            .iter()
            .flat_map(|r| r.connections().iter().copied())
            .collect()
    }

    /// Returns a copy with route `index` replaced, or removed if `route` is `None`.
    pub fn with_route_replaced(&self, index: usize, route: Option<Route>) -> Self {
        let mut routes = self.routes.clone();
        match route {
            Some(r) => routes[index] = r,
            None => {
                routes.remove(index);
            }
        }
        Self { routes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Network, NetworkBuilder};

    fn square() -> Network {
        let mut b = NetworkBuilder::new();
        for name in ["1", "2", "3", "4"] {
            b.add_station(name, 0.0, 0.0).expect("unique");
        }
        b.add_connection("1", "2", 10).expect("valid");
        b.add_connection("2", "3", 10).expect("valid");
        b.add_connection("3", "4", 10).expect("valid");
        b.add_connection("4", "1", 10).expect("valid");
        b.build()
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert!(sol.is_empty());
        assert_eq!(sol.total_minutes(), 0);
        assert!(sol.coverage_set().is_empty());
    }

    #[test]
    fn test_shared_connections_counted_once() {
        let net = square();
        let sol = Solution::from_routes(vec![
            Route::from_stations(&net, &[0, 1, 2], 30).expect("valid"),
            Route::from_stations(&net, &[2, 1], 30).expect("valid"),
        ]);
        assert_eq!(sol.coverage_set().into_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(sol.total_minutes(), 30);
    }

    #[test]
    fn test_with_route_replaced_leaves_original() {
        let net = square();
        let sol = Solution::from_routes(vec![
            Route::from_stations(&net, &[0, 1], 30).expect("valid"),
            Route::from_stations(&net, &[2, 3], 30).expect("valid"),
        ]);
        let replaced = sol.with_route_replaced(
            0,
            Some(Route::from_stations(&net, &[3, 0], 30).expect("valid")),
        );
        let removed = sol.with_route_replaced(1, None);
        assert_eq!(sol.routes()[0].stations(), &[0, 1]);
        assert_eq!(replaced.routes()[0].stations(), &[3, 0]);
        assert_eq!(removed.num_routes(), 1);
        assert_eq!(sol.num_routes(), 2);
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::DurationExceeded {
            route_index: 0,
            minutes: 130,
            limit: 120,
        });
        assert_eq!(
            v.kind,
            ViolationType::DurationExceeded {
                route_index: 0,
                minutes: 130,
                limit: 120,
            }
        );
    }
}
