//! Randomized hill climbing over whole routes.
//!
//! # Algorithm
//!
//! Each step copies the current plan and applies one mutation, chosen
//! uniformly:
//!
//! - [`Mutation::ReplaceRoute`] swaps a random route for a fresh random walk
//!   from a random station.
//! - [`Mutation::RestartRoute`] regenerates the same route from a station
//!   other than its current first station.
//!
//! Fresh walks only use connections the other routes leave uncovered. When
//! no walk is possible the route is dropped instead. An empty plan mutates
//! by gaining a route.
//!
//! The candidate replaces the current plan only if its K is strictly
//! higher, so accepted scores form a strictly increasing sequence. The search
//! converges after `patience` consecutive rejections.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::check_stop_probability;
use crate::constructive::{random_route, random_solution};
use crate::error::{LinePlanError, Result};
use crate::evaluation::{compute_score, validate_solution, Score};
use crate::graph::{Network, UsageOverlay};
use crate::models::{Constraints, Route, Solution};

use super::Improver;

/// Hill climber settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimberConfig {
    /// Consecutive rejected steps before the search counts as converged.
    pub patience: usize,
    /// Stop probability of the random walks that generate fresh routes.
    pub stop_probability: f64,
}

impl Default for HillClimberConfig {
    fn default() -> Self {
        Self {
            patience: 500,
            stop_probability: 0.0,
        }
    }
}

/// Perturbation applied to one route of the current plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Replace the route with a walk from any viable station.
    ReplaceRoute,
    /// Regenerate the route from a different start station.
    RestartRoute,
}

/// Strictly improving local search over line plans.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::local_search::{HillClimber, HillClimberConfig, Improver};
/// use u_lineplan::models::Constraints;
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C", "D"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 10).unwrap();
/// b.add_connection("C", "D", 10).unwrap();
/// let net = b.build();
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let constraints = Constraints::new(30, 2);
/// let mut hc = HillClimber::from_random(&net, constraints, HillClimberConfig::default(), &mut rng).unwrap();
/// let start = hc.current_score().k;
/// hc.run(&mut rng, 200).unwrap();
/// assert!(hc.current_score().k >= start);
/// ```
#[derive(Debug, Clone)]
pub struct HillClimber<'a> {
    network: &'a Network,
    constraints: Constraints,
    config: HillClimberConfig,
    current: Solution,
    current_score: Score,
    accepted: Vec<f64>,
    stale: usize,
    improved: bool,
}

impl<'a> HillClimber<'a> {
    /// Starts from a caller-supplied plan.
    ///
    /// # Errors
    ///
    /// Fails if the constraints admit no route, if `seed` violates them, or
    /// if `config.stop_probability` is outside `[0, 1)`.
    pub fn new(
        network: &'a Network,
        constraints: Constraints,
        config: HillClimberConfig,
        seed: Solution,
    ) -> Result<Self> {
        check_stop_probability("hill_climber.stop_probability", config.stop_probability)?;
        constraints.check(network)?;
        let violations = validate_solution(network, &constraints, &seed);
        if let Some(first) = violations.first() {
            return Err(LinePlanError::InvalidRoute(format!(
                "seed plan is infeasible: {:?}",
                first.kind
            )));
        }
        let current_score = compute_score(&seed, network.num_connections())?;
        Ok(Self {
            network,
            constraints,
            config,
            current: seed,
            current_score,
            accepted: vec![current_score.k],
            stale: 0,
            improved: false,
        })
    }

    /// Starts from one random construction.
    pub fn from_random<R: Rng>(
        network: &'a Network,
        constraints: Constraints,
        config: HillClimberConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let seed = random_solution(network, &constraints, config.stop_probability, rng)?;
        Self::new(network, constraints, config, seed)
    }

    /// Builds a mutated copy of the current plan. The current plan is untouched.
    pub fn candidate<R: Rng>(&self, mutation: Mutation, rng: &mut R) -> Solution {
        if self.current.is_empty() {
            let mut grown = self.current.clone();
            if let Some(route) = self.fresh_route(None, None, rng) {
                grown.add_route(route);
            }
            return grown;
        }

        let index = rng.random_range(0..self.current.num_routes());
        let avoid = match mutation {
            Mutation::ReplaceRoute => None,
            Mutation::RestartRoute => Some(self.current.routes()[index].first()),
        };
        let route = self.fresh_route(Some(index), avoid, rng);
        self.current.with_route_replaced(index, route)
    }

    /// Random walk over connections not covered by routes other than `skip`.
    fn fresh_route<R: Rng>(
        &self,
        skip: Option<usize>,
        avoid: Option<usize>,
        rng: &mut R,
    ) -> Option<Route> {
        let limit = self.constraints.max_route_minutes;
        let mut usage = UsageOverlay::new(self.network);
        for (i, route) in self.current.routes().iter().enumerate() {
            if Some(i) != skip {
                usage.mark_all(route.connections());
            }
        }

        let starts: Vec<usize> = (0..self.network.num_stations())
            .filter(|&s| Some(s) != avoid && usage.has_fitting_unused(self.network, s, limit))
            .collect();
        if starts.is_empty() {
            return None;
        }
        let start = starts[rng.random_range(0..starts.len())];
        random_route(
            self.network,
            &mut usage,
            start,
            limit,
            self.config.stop_probability,
            rng,
        )
    }

    /// Whether `patience` consecutive steps were rejected.
    pub fn is_converged(&self) -> bool {
        self.stale >= self.config.patience
    }

    /// Steps until convergence or `max_steps`; returns the number of steps taken.
    pub fn run<R: Rng>(&mut self, rng: &mut R, max_steps: usize) -> Result<usize> {
        let mut steps = 0;
        while steps < max_steps && !self.is_converged() {
            self.step(rng)?;
            steps += 1;
        }
        Ok(steps)
    }

    /// K of the initial plan followed by every accepted candidate.
    pub fn accepted_scores(&self) -> &[f64] {
        &self.accepted
    }

    /// Consumes the climber, returning the best plan and its score.
    pub fn into_best(self) -> (Solution, Score) {
        (self.current, self.current_score)
    }
}

impl Improver for HillClimber<'_> {
    fn step<R: Rng>(&mut self, rng: &mut R) -> Result<bool> {
        let mutation = if rng.random_bool(0.5) {
            Mutation::ReplaceRoute
        } else {
            Mutation::RestartRoute
        };
        let candidate = self.candidate(mutation, rng);
        let score = compute_score(&candidate, self.network.num_connections())?;

        self.improved = score.beats(&self.current_score);
        if self.improved {
            trace!(
                event = "improved",
                k = score.k,
                routes = score.routes,
                minutes = score.minutes,
                stale = self.stale,
            );
            self.current = candidate;
            self.current_score = score;
            self.accepted.push(score.k);
            self.stale = 0;
        } else {
            self.stale += 1;
        }
        Ok(self.improved)
    }

    fn has_improved(&self) -> bool {
        self.improved
    }

    fn current(&self) -> &Solution {
        &self.current
    }

    fn current_score(&self) -> &Score {
        &self.current_score
    }
}
