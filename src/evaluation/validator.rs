//! Feasibility checks for line plans.

use crate::graph::Network;
use crate::models::{Constraints, Route, Solution, Violation, ViolationType};

/// Checks a single route against the network and the per-route limit.
///
/// Recomputes the duration from the network rather than trusting the
/// route's recorded total.
pub fn validate_route(
    network: &Network,
    route: &Route,
    route_index: usize,
    limit: u32,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let stations = route.stations();

    if stations.len() < 2 || route.connections().len() != stations.len() - 1 {
        violations.push(Violation::new(ViolationType::RouteTooShort { route_index }));
        return violations;
    }

    let mut minutes = 0u64;
    for (hop, (pair, &conn)) in stations.windows(2).zip(route.connections()).enumerate() {
        match network.connection_between(pair[0], pair[1]) {
            Some(id) if id == conn => minutes += u64::from(network.connection(id).minutes()),
            _ => violations.push(Violation::new(ViolationType::MissingConnection {
                route_index,
                hop,
            })),
        }
    }

    if minutes > u64::from(limit) {
        violations.push(Violation::new(ViolationType::DurationExceeded {
            route_index,
            minutes,
            limit,
        }));
    }

    violations
}

/// Checks every route and the route count of a solution.
///
/// A feasible solution yields an empty list.
///
/// # Examples
///
/// ```
/// use u_lineplan::evaluation::validate_solution;
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::{Constraints, Route, Solution};
///
/// let mut b = NetworkBuilder::new();
/// b.add_station("A", 0.0, 0.0).unwrap();
/// b.add_station("B", 0.0, 0.0).unwrap();
/// b.add_connection("A", "B", 40).unwrap();
/// let net = b.build();
///
/// let sol = Solution::from_routes(vec![Route::from_stations(&net, &[0, 1, 0], 120).unwrap()]);
/// assert!(validate_solution(&net, &Constraints::new(120, 1), &sol).is_empty());
/// assert_eq!(validate_solution(&net, &Constraints::new(60, 1), &sol).len(), 1);
/// ```
pub fn validate_solution(
    network: &Network,
    constraints: &Constraints,
    solution: &Solution,
) -> Vec<Violation> {
    let mut violations: Vec<Violation> = solution
        .routes()
        .iter()
        .enumerate()
        .flat_map(|(idx, route)| {
            validate_route(network, route, idx, constraints.max_route_minutes)
        })
        .collect();

    if solution.num_routes() > constraints.max_routes {
        violations.push(Violation::new(ViolationType::TooManyRoutes {
            routes: solution.num_routes(),
            max_routes: constraints.max_routes,
        }));
    }

    violations
}
