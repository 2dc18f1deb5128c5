//! Greedy hardest-first construction.
//!
//! Each route starts at the station with the fewest unused connections
//! (ties: lowest station id), since those stations are the hardest to reach
//! from elsewhere. The route then always takes the unused connection to the
//! lowest-id neighbor. When none fits, it may cross one already covered
//! connection if that leads to a station with a fitting unused connection;
//! otherwise the route ends.
//!
//! Deterministic: the same network always yields the same plan.

use crate::error::Result;
use crate::graph::{Network, UsageOverlay};
use crate::models::{Constraints, Route, RouteBuilder, Solution};

/// Constructs a line plan with the greedy hardest-first heuristic.
///
/// # Examples
///
/// ```
/// use u_lineplan::constructive::greedy;
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::Constraints;
///
/// let mut b = NetworkBuilder::new();
/// for name in ["1", "2", "3", "4"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("1", "2", 10).unwrap();
/// b.add_connection("2", "3", 10).unwrap();
/// b.add_connection("3", "4", 10).unwrap();
/// b.add_connection("4", "1", 10).unwrap();
/// let net = b.build();
///
/// let sol = greedy(&net, &Constraints::new(30, 2)).unwrap();
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.coverage_set().len(), 4);
/// ```
pub fn greedy(network: &Network, constraints: &Constraints) -> Result<Solution> {
    constraints.check(network)?;
    let limit = constraints.max_route_minutes;
    let mut usage = UsageOverlay::new(network);
    let mut solution = Solution::new();

    while solution.num_routes() < constraints.max_routes && !usage.all_used() {
        let Some(start) = hardest_start(network, &usage, limit) else {
            break;
        };
        match greedy_route(network, &mut usage, start, limit) {
            Some(route) => solution.add_route(route),
            None => break,
        }
    }

    Ok(solution)
}

/// Station with the fewest unused connections among those that can still
/// start a route.
pub(crate) fn hardest_start(network: &Network, usage: &UsageOverlay, limit: u32) -> Option<usize> {
    (0..network.num_stations())
        .filter(|&s| usage.has_fitting_unused(network, s, limit))
        .min_by_key(|&s| (usage.unused_degree(network, s), s))
}

fn greedy_route(
    network: &Network,
    usage: &mut UsageOverlay,
    start: usize,
    limit: u32,
) -> Option<Route> {
    let mut builder = RouteBuilder::new(network, start, limit);

    loop {
        let current = builder.current();
        let budget = builder.remaining();
        let unused = usage
            .unused_neighbors(network, current)
            .find(|&(_, c)| network.connection(c).minutes() <= budget);
        let Some((next, conn)) = unused.or_else(|| bridge_hop(network, usage, current, budget))
        else {
            break;
        };
        if builder.extend(next).is_err() {
            break;
        }
        usage.mark(conn);
    }

    builder.finish()
}

/// A covered connection out of `current` whose far end still offers an
/// unused connection within the remaining budget.
fn bridge_hop(
    network: &Network,
    usage: &UsageOverlay,
    current: usize,
    budget: u32,
) -> Option<(usize, usize)> {
    network.neighbors(current).iter().copied().find(|&(next, c)| {
        let minutes = network.connection(c).minutes();
        usage.is_used(c)
            && minutes <= budget
            && usage.has_fitting_unused(network, next, budget - minutes)
    })
}
