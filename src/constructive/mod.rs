//! Constructive heuristics for building line plans.
//!
//! - [`random_solution`]: Random walks over unused connections, O(E) per plan
//! - [`greedy`]: Hardest-first walk to the lowest-id unused neighbor, O(R × V × d)
//! - [`beam_greedy`]: Beam search scored by reachable stations
//! - [`beam_greedy_random`]: Beam search with top-k random selection
//! - [`beam_heuristics_random`]: Beam search with the composite hop heuristic
//! - [`dijkstra`]: Farthest shortest path from the best-connected station
//! - [`dijkstra_heuristic`]: Farthest shortest path from the hardest station, then [`merge_routes`]
//!
//! [`Strategy`] selects one of them by tag.

mod beam;
mod dijkstra;
mod greedy;
mod random;

pub use beam::{beam_greedy, beam_greedy_random, beam_heuristics_random, BeamConfig, HeuristicWeights};
pub use dijkstra::{dijkstra, dijkstra_heuristic, merge_routes, shortest_paths, ShortestPaths};
pub use greedy::greedy;
pub use random::{random_route, random_search, random_solution};

use rand::Rng;

use crate::config::Algorithm;
use crate::error::Result;
use crate::graph::Network;
use crate::models::{Constraints, Solution};

/// A construction strategy together with its parameters.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_lineplan::constructive::Strategy;
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
/// let mut rng = StdRng::seed_from_u64(0);
/// let sol = Strategy::Greedy
///     .construct(&net, &Constraints::new(60, 2), &mut rng)
///     .unwrap();
/// assert_eq!(sol.num_routes(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Random walks; each further hop is skipped with `stop_probability`.
    Random {
        /// Chance of ending a route before each hop after the first.
        stop_probability: f64,
    },
    /// Deterministic hardest-first greedy walk.
    Greedy,
    /// Deterministic beam search.
    BeamGreedy {
        /// Beam width.
        width: usize,
    },
    /// Beam search with random top-k route selection.
    BeamGreedyRandom(BeamConfig),
    /// Heuristic-scored beam search with random top-k route selection.
    BeamHeuristicsRandom {
        /// Beam width and selection pool.
        beam: BeamConfig,
        /// Hop heuristic weights.
        weights: HeuristicWeights,
    },
    /// Farthest shortest path from the best-connected station.
    Dijkstra,
    /// Farthest shortest path from the hardest station, then merging.
    DijkstraHeuristic,
}

impl Strategy {
    /// Builds one line plan. Deterministic strategies ignore `rng`.
    ///
    /// # Errors
    ///
    /// Fails before construction if `constraints` cannot admit any route.
    pub fn construct<R: Rng>(
        &self,
        network: &Network,
        constraints: &Constraints,
        rng: &mut R,
    ) -> Result<Solution> {
        match self {
            Self::Random { stop_probability } => {
                random_solution(network, constraints, *stop_probability, rng)
            }
            Self::Greedy => greedy(network, constraints),
            Self::BeamGreedy { width } => beam_greedy(network, constraints, *width),
            Self::BeamGreedyRandom(beam) => beam_greedy_random(network, constraints, beam, rng),
            Self::BeamHeuristicsRandom { beam, weights } => {
                beam_heuristics_random(network, constraints, beam, weights, rng)
            }
            Self::Dijkstra => dijkstra(network, constraints),
            Self::DijkstraHeuristic => dijkstra_heuristic(network, constraints),
        }
    }

    /// Whether repeated runs can produce different plans.
    pub fn is_randomized(&self) -> bool {
        matches!(
            self,
            Self::Random { .. } | Self::BeamGreedyRandom(_) | Self::BeamHeuristicsRandom { .. }
        )
    }

    /// The configuration tag selecting this strategy.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Random { .. } => Algorithm::Random,
            Self::Greedy => Algorithm::Greedy,
            Self::BeamGreedy { .. } => Algorithm::BeamGreedy,
            Self::BeamGreedyRandom(_) => Algorithm::BeamGreedyRandom,
            Self::BeamHeuristicsRandom { .. } => Algorithm::BeamHeuristicsRandom,
            Self::Dijkstra => Algorithm::Dijkstra,
            Self::DijkstraHeuristic => Algorithm::DijkstraHeuristic,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        self.algorithm().name()
    }
}
