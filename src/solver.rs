//! Configured entry point.
//!
//! [`solve`] validates the configuration and limits, seeds a [`StdRng`] from
//! `config.seed`, runs the selected algorithm and returns the best plan with
//! its score.
//!
//! - Deterministic constructions run once.
//! - Randomized constructions run `iterations` times; the first plan with
//!   the highest K wins.
//! - The hill climber starts from one random plan and takes up to
//!   `iterations` steps, stopping early once converged.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::{Algorithm, SolverConfig};
use crate::error::Result;
use crate::evaluation::{compute_score, Score};
use crate::graph::Network;
use crate::interface::{NetworkSource, PlanReporter, SolutionSummary};
use crate::local_search::{HillClimber, Improver};
use crate::models::{Constraints, Solution};

/// Result of a configured run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Limits the plan was built under.
    pub constraints: Constraints,
    /// Best plan found.
    pub solution: Solution,
    /// Score of `solution`.
    pub score: Score,
    /// Constructions or hill-climber steps performed.
    pub attempts: usize,
}

impl PlanOutcome {
    /// Reporting view with station names resolved.
    pub fn summary(&self, network: &Network) -> SolutionSummary {
        SolutionSummary::new(
            self.algorithm.name(),
            network,
            &self.solution,
            &self.score,
        )
    }
}

/// Runs the configured algorithm with a generator seeded from `config.seed`.
///
/// # Errors
///
/// Invalid configuration and unsatisfiable limits are reported before any
/// construction starts.
///
/// # Examples
///
/// ```
/// use u_lineplan::config::{Algorithm, SolverConfig};
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::Constraints;
/// use u_lineplan::solver::solve;
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
/// let config = SolverConfig::new()
///     .with_algorithm(Algorithm::Greedy)
///     .with_constraints(Constraints::new(30, 2));
/// let outcome = solve(&net, &config).unwrap();
/// assert_eq!(outcome.score.coverage, 1.0);
/// assert_eq!(outcome.attempts, 1);
/// ```
pub fn solve(network: &Network, config: &SolverConfig) -> Result<PlanOutcome> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    solve_with_rng(network, config, &mut rng)
}

/// Like [`solve`], drawing randomness from `rng` instead of `config.seed`.
pub fn solve_with_rng<R: Rng>(
    network: &Network,
    config: &SolverConfig,
    rng: &mut R,
) -> Result<PlanOutcome> {
    config.validate()?;
    let constraints = config.constraints();
    constraints.check(network)?;

    let start = Instant::now();
    info!(
        event = "solve_start",
        algorithm = config.algorithm.name(),
        max_route_minutes = constraints.max_route_minutes,
        max_routes = constraints.max_routes,
        iterations = config.iterations,
        stations = network.num_stations(),
        connections = network.num_connections(),
    );

    let (solution, score, attempts) = match config.strategy() {
        Some(strategy) if strategy.is_randomized() => {
            let mut best = strategy.construct(network, &constraints, rng)?;
            let mut best_score = compute_score(&best, network.num_connections())?;
            for attempt in 1..config.iterations {
                let candidate = strategy.construct(network, &constraints, rng)?;
                let score = compute_score(&candidate, network.num_connections())?;
                if score.beats(&best_score) {
                    debug!(event = "new_best", attempt, k = score.k, routes = score.routes);
                    best = candidate;
                    best_score = score;
                }
            }
            (best, best_score, config.iterations)
        }
        Some(strategy) => {
            let solution = strategy.construct(network, &constraints, rng)?;
            let score = compute_score(&solution, network.num_connections())?;
            (solution, score, 1)
        }
        None => {
            let mut climber =
                HillClimber::from_random(network, constraints, config.hill_climber, rng)?;
            let steps = climber.run(rng, config.iterations)?;
            debug!(
                event = "hill_climber_done",
                steps,
                accepted = climber.accepted_scores().len() - 1,
                converged = climber.is_converged(),
                k = climber.current_score().k,
            );
            let (solution, score) = climber.into_best();
            (solution, score, steps)
        }
    };

    info!(
        event = "solve_end",
        algorithm = config.algorithm.name(),
        duration_ms = start.elapsed().as_millis() as u64,
        attempts,
        routes = score.routes,
        minutes = score.minutes,
        coverage = score.coverage,
        k = score.k,
    );

    Ok(PlanOutcome {
        algorithm: config.algorithm,
        constraints,
        solution,
        score,
        attempts,
    })
}

/// Loads a network from `source`, solves it, and reports the summary.
pub fn solve_and_report<S, P>(
    source: &S,
    config: &SolverConfig,
    reporter: &mut P,
) -> Result<PlanOutcome>
where
    S: NetworkSource + ?Sized,
    P: PlanReporter + ?Sized,
{
    let network = source.load_network()?;
    let outcome = solve(&network, config)?;
    reporter.report(&outcome.summary(&network));
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::LinePlanError;
    use crate::evaluation::validate_solution;
    use crate::graph::{ConnectionRecord, NetworkBuilder, NetworkData, StationRecord};
    use crate::interface::VecReporter;

    const ALL: [Algorithm; 8] = [
        Algorithm::Random,
        Algorithm::Greedy,
        Algorithm::BeamGreedy,
        Algorithm::BeamGreedyRandom,
        Algorithm::BeamHeuristicsRandom,
        Algorithm::Dijkstra,
        Algorithm::DijkstraHeuristic,
        Algorithm::HillClimber,
    ];

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
    fn test_every_algorithm_feasible() {
        let net = grid();
        let constraints = Constraints::new(35, 3);
        for algorithm in ALL {
            let config = SolverConfig::new()
                .with_algorithm(algorithm)
                .with_constraints(constraints)
                .with_iterations(30);
            let outcome = solve(&net, &config).expect("feasible");
            assert!(validate_solution(&net, &constraints, &outcome.solution).is_empty());
            assert_eq!(
                outcome.score,
                compute_score(&outcome.solution, net.num_connections()).expect("non-empty")
            );
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let net = grid();
        for algorithm in ALL {
            let config = SolverConfig::new()
                .with_algorithm(algorithm)
                .with_constraints(Constraints::new(35, 3))
                .with_iterations(20)
                .with_seed(11);
            assert_eq!(
                solve(&net, &config).expect("valid"),
                solve(&net, &config).expect("valid")
            );
        }
    }

    #[test]
    fn test_attempts_counted() {
        let net = grid();
        let base = SolverConfig::new()
            .with_constraints(Constraints::new(35, 3))
            .with_iterations(12);
        let random = solve(&net, &base.clone().with_algorithm(Algorithm::Random)).expect("valid");
        assert_eq!(random.attempts, 12);
        let greedy = solve(&net, &base.with_algorithm(Algorithm::Greedy)).expect("valid");
        assert_eq!(greedy.attempts, 1);
    }

    #[test]
    fn test_invalid_config_rejected_first() {
        let net = grid();
        let config = SolverConfig::new().with_iterations(0);
        assert!(matches!(
            solve(&net, &config),
            Err(LinePlanError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_zero_routes_rejected() {
        let net = grid();
        for algorithm in ALL {
            let config = SolverConfig::new()
                .with_algorithm(algorithm)
                .with_constraints(Constraints::new(60, 0));
            assert!(matches!(
                solve(&net, &config),
                Err(LinePlanError::UnreachableConstraint(_))
            ));
        }
    }

    #[test]
    fn test_solve_and_report() {
        let data = NetworkData {
            stations: ["A", "B", "C"]
                .iter()
                .map(|n| StationRecord {
                    name: n.to_string(),
                    x: 0.0,
                    y: 0.0,
                })
                .collect(),
            connections: vec![
                ConnectionRecord {
                    station1: "A".into(),
                    station2: "B".into(),
                    minutes: 10,
                },
                ConnectionRecord {
                    station1: "B".into(),
                    station2: "C".into(),
                    minutes: 10,
                },
            ],
        };
        let mut reporter = VecReporter::new();
        let config = SolverConfig::new().with_algorithm(Algorithm::Dijkstra);
        let outcome = solve_and_report(&data, &config, &mut reporter).expect("valid");
        assert_eq!(reporter.summaries().len(), 1);
        let summary = &reporter.summaries()[0];
        assert_eq!(summary.algorithm, "dijkstra");
        assert_eq!(summary.k, outcome.score.k);
        assert_eq!(summary.coverage, 1.0);
    }
}
