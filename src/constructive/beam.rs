//! Beam-search route construction.
//!
//! # Algorithm
//!
//! Routes are built one at a time. For each route, a beam of partial routes
//! (simple paths, no station revisited) is seeded with every station that
//! can still start a route, then repeatedly expanded by every fitting
//! single-hop extension, rescored, and truncated back to the beam width.
//! Partials that cover at least one unused connection are kept in a small
//! candidate pool; the route is taken from that pool once the beam runs dry.
//!
//! Two objectives score partials:
//!
//! - **Reachable stations**: the number of distinct stations the partial
//!   reached over unused connections, plus those one more fitting unused
//!   hop away from its last station.
//! - **Heuristic**: per hop,
//!   `reach * newly_reachable - duration * minutes - new_route * penalty`,
//!   where the penalty applies when the hop leaves no fitting unused
//!   continuation, forcing a new route.
//!
//! Ties rank more unused connections covered first, then fewer minutes, then
//! the lexicographically smaller station sequence, so [`beam_greedy`] is
//! deterministic.
//!
//! # Complexity
//!
//! O(L × W × d log(W × d)) per route, where L is the longest path within the
//! limit, W the beam width and d the maximum station degree.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::{Network, UsageOverlay};
use crate::models::{Constraints, Route, Solution};

/// Beam width and randomized selection pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Partial routes kept between expansion steps.
    pub width: usize,
    /// Randomized variants pick uniformly among this many best candidates.
    pub top_k: usize,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self { width: 6, top_k: 3 }
    }
}

/// Weights of the composite hop heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Reward per newly reachable station with unused connections.
    pub reach: f64,
    /// Cost per minute of the hop.
    pub duration: f64,
    /// Cost of a hop that forces the route to end.
    pub new_route: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            reach: 1.0,
            duration: 1.0 / 180.0,
            new_route: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Objective {
    ReachableStations,
    Heuristic(HeuristicWeights),
}

#[derive(Debug, Clone)]
struct Partial {
    stations: Vec<usize>,
    connections: Vec<usize>,
    minutes: u32,
    fresh: usize,
    reached: BTreeSet<usize>,
    score: f64,
}

impl Partial {
    fn seed(
        network: &Network,
        usage: &UsageOverlay,
        start: usize,
        limit: u32,
        objective: Objective,
    ) -> Self {
        let mut p = Self {
            stations: vec![start],
            connections: Vec::new(),
            minutes: 0,
            fresh: 0,
            reached: BTreeSet::new(),
            score: 0.0,
        };
        match objective {
            Objective::ReachableStations => {
                p.score = p.reachable_count(network, usage, limit) as f64;
            }
            Objective::Heuristic(_) => {
                p.reached.insert(start);
            }
        }
        p
    }

    fn last(&self) -> usize {
        self.stations[self.stations.len() - 1]
    }

    /// Unused globally and not yet taken by this partial.
    fn is_open(&self, usage: &UsageOverlay, conn: usize) -> bool {
        !usage.is_used(conn) && !self.connections.contains(&conn)
    }

    /// Unvisited stations one fitting open hop from the last station.
    fn frontier<'a>(
        &'a self,
        network: &'a Network,
        usage: &'a UsageOverlay,
        limit: u32,
    ) -> impl Iterator<Item = usize> + 'a {
        network
            .neighbors(self.last())
            .iter()
            .filter(move |&&(next, conn)| {
                self.is_open(usage, conn)
                    && !self.stations.contains(&next)
                    && network.connection(conn).minutes() <= limit - self.minutes
            })
            .map(|&(next, _)| next)
    }

    fn reachable_count(&self, network: &Network, usage: &UsageOverlay, limit: u32) -> usize {
        let mut reach = self.reached.clone();
        reach.extend(self.frontier(network, usage, limit));
        reach.len()
    }

    fn child(
        &self,
        network: &Network,
        usage: &UsageOverlay,
        next: usize,
        conn: usize,
        limit: u32,
        objective: Objective,
    ) -> Self {
        let fresh_hop = self.is_open(usage, conn);
        let hop_minutes = network.connection(conn).minutes();
        let mut child = self.clone();
        child.stations.push(next);
        child.connections.push(conn);
        child.minutes += hop_minutes;
        if fresh_hop {
            child.fresh += 1;
        }

        match objective {
            Objective::ReachableStations => {
                if fresh_hop {
                    child.reached.insert(self.last());
                    child.reached.insert(next);
                }
                child.score = child.reachable_count(network, usage, limit) as f64;
            }
            Objective::Heuristic(w) => {
                let newly: Vec<usize> = network
                    .neighbors(next)
                    .iter()
                    .filter(|&&(s, c)| child.is_open(usage, c) && !child.reached.contains(&s))
                    .map(|&(s, _)| s)
                    .collect();
                let penalty = if child.frontier(network, usage, limit).next().is_none() {
                    1.0
                } else {
                    0.0
                };
                child.score += w.reach * newly.len() as f64
                    - w.duration * hop_minutes as f64
                    - w.new_route * penalty;
                child.reached.insert(next);
                child.reached.extend(newly);
            }
        }
        child
    }
}

fn rank(a: &Partial, b: &Partial) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(b.fresh.cmp(&a.fresh))
        .then(a.minutes.cmp(&b.minutes))
        .then_with(|| a.stations.cmp(&b.stations))
}

/// Builds one route by beam search; `pick` maps the pool size to the index
/// of the chosen candidate.
fn beam_route(
    network: &Network,
    usage: &UsageOverlay,
    limit: u32,
    width: usize,
    pool_size: usize,
    objective: Objective,
    pick: &mut impl FnMut(usize) -> usize,
) -> Option<Route> {
    let width = width.max(1);
    let pool_size = pool_size.max(1);

    let mut beam: Vec<Partial> = (0..network.num_stations())
        .filter(|&s| usage.has_fitting_unused(network, s, limit))
        .map(|s| Partial::seed(network, usage, s, limit, objective))
        .collect();
    beam.sort_by(rank);
    beam.truncate(width);

    let mut pool: Vec<Partial> = Vec::new();
    while !beam.is_empty() {
        let mut next = Vec::new();
        for p in &beam {
            for &(station, conn) in network.neighbors(p.last()) {
                if p.stations.contains(&station)
                    || network.connection(conn).minutes() > limit - p.minutes
                {
                    continue;
                }
                next.push(p.child(network, usage, station, conn, limit, objective));
            }
        }
        next.sort_by(rank);
        next.truncate(width);

        pool.extend(next.iter().filter(|p| p.fresh > 0).cloned());
        pool.sort_by(rank);
        pool.truncate(pool_size);

        beam = next;
    }

    if pool.is_empty() {
        return None;
    }
    let chosen = pick(pool.len()).min(pool.len() - 1);
    Route::from_stations(network, &pool[chosen].stations, limit).ok()
}

fn beam_solution(
    network: &Network,
    constraints: &Constraints,
    width: usize,
    pool_size: usize,
    objective: Objective,
    mut pick: impl FnMut(usize) -> usize,
) -> Result<Solution> {
    constraints.check(network)?;
    let limit = constraints.max_route_minutes;
    let mut usage = UsageOverlay::new(network);
    let mut solution = Solution::new();

    while solution.num_routes() < constraints.max_routes && !usage.all_used() {
        match beam_route(network, &usage, limit, width, pool_size, objective, &mut pick) {
            Some(route) => {
                usage.mark_all(route.connections());
                solution.add_route(route);
            }
            None => break,
        }
    }

    Ok(solution)
}

/// Deterministic beam search scored by reachable unused stations.
///
/// # Examples
///
/// ```
/// use u_lineplan::constructive::beam_greedy;
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
/// let sol = beam_greedy(&net, &Constraints::new(30, 2), 6).unwrap();
/// assert_eq!(sol.coverage_set().len(), 4);
/// ```
pub fn beam_greedy(network: &Network, constraints: &Constraints, width: usize) -> Result<Solution> {
    beam_solution(
        network,
        constraints,
        width,
        1,
        Objective::ReachableStations,
        |_| 0,
    )
}

/// Beam search scored like [`beam_greedy`], but each route is drawn
/// uniformly from the `top_k` best candidates.
pub fn beam_greedy_random<R: Rng>(
    network: &Network,
    constraints: &Constraints,
    beam: &BeamConfig,
    rng: &mut R,
) -> Result<Solution> {
    beam_solution(
        network,
        constraints,
        beam.width,
        beam.top_k,
        Objective::ReachableStations,
        |len| rng.random_range(0..len),
    )
}

/// Beam search scored by the composite hop heuristic, with each route drawn
/// uniformly from the `top_k` best candidates.
pub fn beam_heuristics_random<R: Rng>(
    network: &Network,
    constraints: &Constraints,
    beam: &BeamConfig,
    weights: &HeuristicWeights,
    rng: &mut R,
) -> Result<Solution> {
    beam_solution(
        network,
        constraints,
        beam.width,
        beam.top_k,
        Objective::Heuristic(*weights),
        |len| rng.random_range(0..len),
    )
}
