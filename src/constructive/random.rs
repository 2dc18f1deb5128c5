//! Random-walk construction.
//!
//! Each route starts at a uniformly chosen station that still has an unused
//! connection fitting the limit, then repeatedly follows a uniformly chosen
//! unused connection that keeps it under the limit. Every hop consumes an
//! unused connection, so a walk ends after at most |E| hops.
//!
//! A single run has high variance; [`random_search`] repeats it and keeps
//! the best-scoring plan.

use rand::Rng;
use tracing::debug;

use crate::config::check_stop_probability;
use crate::error::Result;
use crate::evaluation::{compute_score, Score};
use crate::graph::{Network, UsageOverlay};
use crate::models::{Constraints, Route, RouteBuilder, Solution};

/// Walks randomly from `start` over connections unused in `usage`.
///
/// Connections taken are marked in `usage`. After the first hop, the walk
/// stops early with probability `stop_probability` before each further hop;
/// values of 1 or more stop after the first hop.
/// Returns `None` if no first hop fits.
pub fn random_route<R: Rng>(
    network: &Network,
    usage: &mut UsageOverlay,
    start: usize,
    limit: u32,
    stop_probability: f64,
    rng: &mut R,
) -> Option<Route> {
    let mut builder = RouteBuilder::new(network, start, limit);
    let mut options = Vec::new();

    loop {
        let budget = builder.remaining();
        options.clear();
        options.extend(
            usage
                .unused_neighbors(network, builder.current())
                .filter(|&(_, c)| network.connection(c).minutes() <= budget),
        );
        if options.is_empty() {
            break;
        }
        if builder.stations().len() > 1
            && stop_probability > 0.0
            && (stop_probability >= 1.0 || rng.random_bool(stop_probability))
        {
            break;
        }
        let (next, conn) = options[rng.random_range(0..options.len())];
        if builder.extend(next).is_err() {
            break;
        }
        usage.mark(conn);
    }

    builder.finish()
}

/// Builds one random line plan.
///
/// # Errors
///
/// Fails if `constraints` cannot admit any route (see [`Constraints::check`]),
/// or if `stop_probability` is outside `[0, 1)`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_lineplan::constructive::random_solution;
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::Constraints;
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 10).unwrap();
/// let net = b.build();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let sol = random_solution(&net, &Constraints::new(60, 3), 0.0, &mut rng).unwrap();
/// assert!(sol.num_routes() >= 1 && sol.num_routes() <= 3);
/// assert_eq!(sol.coverage_set().len(), 2);
/// ```
pub fn random_solution<R: Rng>(
    network: &Network,
    constraints: &Constraints,
    stop_probability: f64,
    rng: &mut R,
) -> Result<Solution> {
    check_stop_probability("stop_probability", stop_probability)?;
    constraints.check(network)?;
    let limit = constraints.max_route_minutes;
    let mut usage = UsageOverlay::new(network);
    let mut solution = Solution::new();
    let mut starts = Vec::new();

    while solution.num_routes() < constraints.max_routes && !usage.all_used() {
        starts.clear();
        starts.extend(
            (0..network.num_stations()).filter(|&s| usage.has_fitting_unused(network, s, limit)),
        );
        if starts.is_empty() {
            break;
        }
        let start = starts[rng.random_range(0..starts.len())];
        match random_route(network, &mut usage, start, limit, stop_probability, rng) {
            Some(route) => solution.add_route(route),
            None => break,
        }
    }

    Ok(solution)
}

/// Runs [`random_solution`] `iterations` times and keeps the highest K.
///
/// Ties keep the earlier plan.
pub fn random_search<R: Rng>(
    network: &Network,
    constraints: &Constraints,
    iterations: usize,
    stop_probability: f64,
    rng: &mut R,
) -> Result<(Solution, Score)> {
    let mut best = random_solution(network, constraints, stop_probability, rng)?;
    let mut best_score = compute_score(&best, network.num_connections())?;

    for iteration in 1..iterations {
        let candidate = random_solution(network, constraints, stop_probability, rng)?;
        let score = compute_score(&candidate, network.num_connections())?;
        if score.beats(&best_score) {
            debug!(event = "new_best", iteration, k = score.k, routes = score.routes);
            best = candidate;
            best_score = score;
        }
    }

    Ok((best, best_score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::LinePlanError;
    use crate::evaluation::validate_solution;
    use crate::graph::NetworkBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> Network {
        let mut b = NetworkBuilder::new();
        for name in ["A", "B", "C", "D", "E", "F"] {
            b.add_station(name, 0.0, 0.0).expect("unique");
        }
        for (x, y, m) in [
            ("A", "B", 10),
            ("B", "C", 12),
            ("A", "D", 8),
            ("B", "E", 9),
            ("C", "F", 15),
            ("D", "E", 11),
            ("E", "F", 7),
        ] {
            b.add_connection(x, y, m).expect("valid");
        }
        b.build()
    }

    #[test]
    fn test_random_route_marks_usage() {
        let net = grid();
        let mut usage = UsageOverlay::new(&net);
        let mut rng = StdRng::seed_from_u64(1);
        let route = random_route(&net, &mut usage, 0, 120, 0.0, &mut rng).expect("hop fits");
        assert_eq!(usage.used_count(), route.num_hops());
        for &c in route.connections() {
            assert!(usage.is_used(c));
        }
    }

    #[test]
    fn test_random_route_none_when_nothing_fits() {
        let net = grid();
        let mut usage = UsageOverlay::new(&net);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(random_route(&net, &mut usage, 0, 5, 0.0, &mut rng).is_none());
    }

    #[test]
    fn test_random_solution_respects_constraints() {
        let net = grid();
        let constraints = Constraints::new(30, 2);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let sol = random_solution(&net, &constraints, 0.2, &mut rng).expect("valid");
            assert!(validate_solution(&net, &constraints, &sol).is_empty());
        }
    }

    #[test]
    fn test_random_solution_rejects_stop_probability_out_of_range() {
        let net = grid();
        let constraints = Constraints::new(60, 2);
        for p in [1.0, 1.5, -0.1, f64::NAN] {
            let err = random_solution(&net, &constraints, p, &mut StdRng::seed_from_u64(0))
                .unwrap_err();
            assert!(matches!(err, LinePlanError::Config(ConfigError::Invalid(_))), "{p}");
        }
    }

    #[test]
    fn test_random_route_stops_after_first_hop_when_certain() {
        let net = grid();
        let mut usage = UsageOverlay::new(&net);
        let mut rng = StdRng::seed_from_u64(3);
        let route = random_route(&net, &mut usage, 0, 120, 1.5, &mut rng).expect("hop fits");
        assert_eq!(route.num_hops(), 1);
    }

    #[test]
    fn test_random_search_reproducible() {
        let net = grid();
        let constraints = Constraints::new(40, 3);
        let (a, sa) = random_search(&net, &constraints, 20, 0.0, &mut StdRng::seed_from_u64(5))
            .expect("valid");
        let (b, sb) = random_search(&net, &constraints, 20, 0.0, &mut StdRng::seed_from_u64(5))
            .expect("valid");
        assert_eq!(a, b);
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_random_search_not_worse_than_single_run() {
        let net = grid();
        let constraints = Constraints::new(40, 3);
        let mut rng = StdRng::seed_from_u64(11);
        let first = random_solution(&net, &constraints, 0.0, &mut rng).expect("valid");
        let first_k = compute_score(&first, net.num_connections()).expect("non-empty").k;
        let (_, best) = random_search(&net, &constraints, 30, 0.0, &mut StdRng::seed_from_u64(11))
            .expect("valid");
        assert!(best.k >= first_k);
    }
}
