//! Shortest-path route construction.
//!
//! # Algorithm
//!
//! Each route runs single-source Dijkstra from a start station over
//! connections not yet covered, ignoring anything farther than the route
//! limit. The route ends at the farthest reachable station (ties: lowest
//! id) and follows the shortest path there.
//!
//! - [`dijkstra`] starts every route at the station with the most unused
//!   connections.
//! - [`dijkstra_heuristic`] starts at the station with the fewest, then
//!   joins routes end-to-start with [`merge_routes`].
//!
//! # Complexity
//!
//! O(R × (E + V) log V) for R routes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::constructive::greedy::hardest_start;
use crate::error::Result;
use crate::graph::{Network, UsageOverlay};
use crate::models::{Constraints, Route, Solution};

/// Single-source shortest paths over unused connections.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: usize,
    dist: Vec<Option<u32>>,
    pred: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Station the search started from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance to `station`, if reachable within the limit.
    pub fn distance(&self, station: usize) -> Option<u32> {
        self.dist.get(station).copied().flatten()
    }

    /// Reachable station with the largest distance, excluding the source.
    ///
    /// Ties go to the lowest station id.
    pub fn farthest(&self) -> Option<usize> {
        self.dist
            .iter()
            .enumerate()
            .filter(|&(s, _)| s != self.source)
            .filter_map(|(s, d)| d.map(|d| (d, Reverse(s))))
            .max()
            .map(|(_, Reverse(s))| s)
    }

    /// Station sequence from the source to `target`.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;
        let mut path = vec![target];
        let mut current = target;
        while let Some(prev) = self.pred[current] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Runs Dijkstra from `source` over connections unused in `usage`.
///
/// Stations whose shortest distance exceeds `limit` are left unreachable.
///
/// # Examples
///
/// ```
/// use u_lineplan::constructive::shortest_paths;
/// use u_lineplan::graph::{NetworkBuilder, UsageOverlay};
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 15).unwrap();
/// b.add_connection("A", "C", 40).unwrap();
/// let net = b.build();
///
/// let sp = shortest_paths(&net, &UsageOverlay::new(&net), 0, 120);
/// assert_eq!(sp.distance(2), Some(25));
/// assert_eq!(sp.path_to(2), Some(vec![0, 1, 2]));
/// ```
pub fn shortest_paths(
    network: &Network,
    usage: &UsageOverlay,
    source: usize,
    limit: u32,
) -> ShortestPaths {
    let n = network.num_stations();
    let mut dist: Vec<Option<u32>> = vec![None; n];
    let mut pred = vec![None; n];
    let mut done = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = Some(0);
    heap.push(Reverse((0u32, source)));

    while let Some(Reverse((d, station))) = heap.pop() {
        if done[station] {
            continue;
        }
        done[station] = true;

        for (next, conn) in usage.unused_neighbors(network, station) {
            let nd = match d.checked_add(network.connection(conn).minutes()) {
                Some(nd) if nd <= limit && !done[next] => nd,
                _ => continue,
            };
            if dist[next].map_or(true, |old| nd < old) {
                dist[next] = Some(nd);
                pred[next] = Some(station);
                heap.push(Reverse((nd, next)));
            }
        }
    }

    ShortestPaths { source, dist, pred }
}

/// Builds routes along farthest shortest paths until the route budget or
/// the network is exhausted. `pick_start` chooses each route's start.
fn farthest_path_routes(
    network: &Network,
    constraints: &Constraints,
    pick_start: impl Fn(&UsageOverlay) -> Option<usize>,
) -> Result<Vec<Route>> {
    constraints.check(network)?;
    let limit = constraints.max_route_minutes;
    let mut usage = UsageOverlay::new(network);
    let mut routes = Vec::new();

    while routes.len() < constraints.max_routes && !usage.all_used() {
        let Some(start) = pick_start(&usage) else {
            break;
        };
        let paths = shortest_paths(network, &usage, start, limit);
        let Some(path) = paths.farthest().and_then(|end| paths.path_to(end)) else {
            break;
        };
        let route = Route::from_stations(network, &path, limit)?;
        usage.mark_all(route.connections());
        routes.push(route);
    }

    Ok(routes)
}

/// Constructs a line plan along farthest shortest paths, starting each route
/// at the station with the most unused connections (ties: lowest id).
///
/// # Examples
///
/// ```
/// use u_lineplan::constructive::dijkstra;
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
/// let sol = dijkstra(&net, &Constraints::new(60, 3)).unwrap();
/// assert_eq!(sol.coverage_set().len(), 2);
/// ```
pub fn dijkstra(network: &Network, constraints: &Constraints) -> Result<Solution> {
    let limit = constraints.max_route_minutes;
    let routes = farthest_path_routes(network, constraints, |usage| {
        (0..network.num_stations())
            .filter(|&s| usage.has_fitting_unused(network, s, limit))
            .max_by_key(|&s| (usage.unused_degree(network, s), Reverse(s)))
    })?;
    Ok(Solution::from_routes(routes))
}

/// Like [`dijkstra`], but starts each route at the hardest-to-serve station
/// and merges routes afterwards.
pub fn dijkstra_heuristic(network: &Network, constraints: &Constraints) -> Result<Solution> {
    let limit = constraints.max_route_minutes;
    let routes = farthest_path_routes(network, constraints, |usage| {
        hardest_start(network, usage, limit)
    })?;
    Ok(Solution::from_routes(merge_routes(network, routes, limit)))
}

/// Joins routes end-to-start while the result fits `limit`.
///
/// Ordered pairs `(i, j)` are tried in ascending order. Route `i` absorbs
/// route `j` if `i` ends where `j` starts, or if a connection links the two
/// ends. After every merge the scan restarts; it stops after a pass with no
/// merge. Coverage never shrinks.
///
/// # Examples
///
/// ```
/// use u_lineplan::constructive::merge_routes;
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::Route;
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 10).unwrap();
/// let net = b.build();
///
/// let routes = vec![
///     Route::from_stations(&net, &[0, 1], 60).unwrap(),
///     Route::from_stations(&net, &[1, 2], 60).unwrap(),
/// ];
/// let merged = merge_routes(&net, routes, 60);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].stations(), &[0, 1, 2]);
/// ```
pub fn merge_routes(network: &Network, mut routes: Vec<Route>, limit: u32) -> Vec<Route> {
    'scan: loop {
        for i in 0..routes.len() {
            for j in 0..routes.len() {
                if i == j {
                    continue;
                }
                if let Some(merged) = try_join(network, &routes[i], &routes[j], limit) {
                    routes[i] = merged;
                    routes.remove(j);
                    continue 'scan;
                }
            }
        }
        return routes;
    }
}

fn try_join(network: &Network, a: &Route, b: &Route, limit: u32) -> Option<Route> {
    let via = if a.last() == b.first() {
        None
    } else {
        let conn = network.connection_between(a.last(), b.first())?;
        Some((conn, network.connection(conn).minutes()))
    };
    let total = u64::from(a.minutes())
        + u64::from(b.minutes())
        + via.map_or(0, |(_, m)| u64::from(m));
    (total <= u64::from(limit)).then(|| a.joined(b, via))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::validate_solution;
    use crate::graph::NetworkBuilder;

    // 3 - 2 - 1 - 0 with a chord 0 - 2.
    fn kite() -> Network {
        let mut b = NetworkBuilder::new();
        for name in ["s0", "s1", "s2", "s3"] {
            b.add_station(name, 0.0, 0.0).expect("unique");
        }
        b.add_connection("s0", "s1", 3).expect("valid");
        b.add_connection("s1", "s2", 3).expect("valid");
        b.add_connection("s0", "s2", 4).expect("valid");
        b.add_connection("s2", "s3", 3).expect("valid");
        b.build()
    }

    #[test]
    fn test_shortest_paths_distances() {
        let net = kite();
        let sp = shortest_paths(&net, &UsageOverlay::new(&net), 3, 100);
        assert_eq!(sp.distance(3), Some(0));
        assert_eq!(sp.distance(2), Some(3));
        assert_eq!(sp.distance(1), Some(6));
        assert_eq!(sp.distance(0), Some(7));
        assert_eq!(sp.farthest(), Some(0));
        assert_eq!(sp.path_to(0), Some(vec![3, 2, 0]));
    }

    #[test]
    fn test_shortest_paths_skip_used_and_far() {
        let net = kite();
        let mut usage = UsageOverlay::new(&net);
        let chord = net.connection_between(0, 2).expect("chord");
        usage.mark(chord);
        let sp = shortest_paths(&net, &usage, 3, 8);
        assert_eq!(sp.distance(1), Some(6));
        assert_eq!(sp.distance(0), None);
        assert_eq!(sp.path_to(0), None);
    }

    #[test]
    fn test_shortest_paths_near_u32_max() {
        let mut b = NetworkBuilder::new();
        for name in ["A", "B", "C"] {
            b.add_station(name, 0.0, 0.0).expect("unique");
        }
        b.add_connection("A", "B", 3_000_000_000).expect("valid");
        b.add_connection("B", "C", 3_000_000_000).expect("valid");
        let net = b.build();
        let usage = UsageOverlay::new(&net);
        let sp = shortest_paths(&net, &usage, 0, u32::MAX);
        assert_eq!(sp.distance(1), Some(3_000_000_000));
        assert_eq!(sp.distance(2), None);
        assert_eq!(sp.farthest(), Some(1));
    }

    #[test]
    fn test_farthest_tie_lowest_id() {
        let mut b = NetworkBuilder::new();
        for name in ["hub", "x", "y"] {
            b.add_station(name, 0.0, 0.0).expect("unique");
        }
        b.add_connection("hub", "y", 5).expect("valid");
        b.add_connection("hub", "x", 5).expect("valid");
        let net = b.build();
        let sp = shortest_paths(&net, &UsageOverlay::new(&net), 0, 10);
        assert_eq!(sp.farthest(), Some(1));
    }

    #[test]
    fn test_farthest_is_never_closer() {
        let net = kite();
        let usage = UsageOverlay::new(&net);
        for source in 0..net.num_stations() {
            let sp = shortest_paths(&net, &usage, source, 100);
            let end = sp.farthest().expect("connected");
            let end_dist = sp.distance(end).expect("reachable");
            for s in 0..net.num_stations() {
                if let Some(d) = sp.distance(s) {
                    assert!(d <= end_dist);
                }
            }
        }
    }

    #[test]
    fn test_dijkstra_most_connected_start() {
        let net = kite();
        let sol = dijkstra(&net, &Constraints::new(20, 5)).expect("valid");
        assert_eq!(sol.routes()[0].stations(), &[2, 0]);
        assert_eq!(sol.routes()[1].stations(), &[1, 2, 3]);
        assert_eq!(sol.routes()[2].stations(), &[0, 1]);
        assert_eq!(sol.coverage_set().len(), 4);
    }

    #[test]
    fn test_dijkstra_heuristic_merges_shared_end() {
        let net = kite();
        let c = Constraints::new(13, 5);
        let unmerged =
            farthest_path_routes(&net, &c, |u| hardest_start(&net, u, 13)).expect("valid");
        assert_eq!(unmerged.len(), 2);
        assert_eq!(unmerged[0].last(), unmerged[1].first());

        let before = Solution::from_routes(unmerged);
        let after = dijkstra_heuristic(&net, &c).expect("valid");
        assert_eq!(after.num_routes(), before.num_routes() - 1);
        assert_eq!(after.coverage_set(), before.coverage_set());
        assert_eq!(after.routes()[0].stations(), &[3, 2, 0, 1, 2]);
        assert!(validate_solution(&net, &c, &after).is_empty());
    }

    #[test]
    fn test_merge_respects_limit() {
        let net = kite();
        let routes = vec![
            Route::from_stations(&net, &[3, 2, 0], 13).expect("valid"),
            Route::from_stations(&net, &[0, 1, 2], 13).expect("valid"),
        ];
        assert_eq!(merge_routes(&net, routes, 12).len(), 2);
    }

    #[test]
    fn test_merge_through_connection() {
        let net = kite();
        let routes = vec![
            Route::from_stations(&net, &[3, 2], 20).expect("valid"),
            Route::from_stations(&net, &[1, 0], 20).expect("valid"),
        ];
        let merged = merge_routes(&net, routes, 20);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].stations(), &[3, 2, 1, 0]);
        assert_eq!(merged[0].minutes(), 9);
    }
}
