//! Quality score K.

use serde::{Deserialize, Serialize};

use crate::error::{LinePlanError, Result};
use crate::models::Solution;

/// Weight of full coverage in K.
pub const COVERAGE_WEIGHT: f64 = 10_000.0;

/// Cost charged per route in K.
pub const ROUTE_COST: f64 = 100.0;

/// Score breakdown of a solution.
///
/// `k = coverage * 10000 - (routes * 100 + minutes)`; higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Fraction of network connections covered, in `[0, 1]`.
    pub coverage: f64,
    /// Number of routes (T).
    pub routes: usize,
    /// Sum of route durations (Min).
    pub minutes: u64,
    /// Quality score K.
    pub k: f64,
}

impl Score {
    /// Returns `true` if `self` is strictly better than `other`.
    pub fn beats(&self, other: &Score) -> bool {
        self.k > other.k
    }
}

/// Computes the quality score of `solution` against a network with
/// `total_connections` connections.
///
/// Pure: the same inputs always produce the same score.
///
/// # Errors
///
/// Returns [`LinePlanError::EmptyNetwork`] if `total_connections` is zero.
///
/// # Examples
///
/// ```
/// use u_lineplan::evaluation::compute_score;
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::{Route, Solution};
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 20).unwrap();
/// let net = b.build();
///
/// let sol = Solution::from_routes(vec![Route::from_stations(&net, &[0, 1], 120).unwrap()]);
/// let score = compute_score(&sol, net.num_connections()).unwrap();
/// assert_eq!(score.coverage, 0.5);
/// assert_eq!(score.k, 5000.0 - 110.0);
/// ```
pub fn compute_score(solution: &Solution, total_connections: usize) -> Result<Score> {
    if total_connections == 0 {
        return Err(LinePlanError::EmptyNetwork);
    }
    let covered = solution.coverage_set().len();
    let coverage = covered as f64 / total_connections as f64;
    let routes = solution.num_routes();
    let minutes = solution.total_minutes();
    let k = coverage * COVERAGE_WEIGHT - (routes as f64 * ROUTE_COST + minutes as f64);
    Ok(Score {
        coverage,
        routes,
        minutes,
        k,
    })
}
