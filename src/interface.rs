//! Contracts with the collaborators around the planner.
//!
//! Loading networks from files and rendering results live outside this
//! crate. [`NetworkSource`] supplies a parsed network, [`PlanReporter`]
//! receives a serializable [`SolutionSummary`] of the outcome.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::evaluation::Score;
use crate::graph::{Network, NetworkData};
use crate::models::Solution;

/// Supplies the network to plan over.
pub trait NetworkSource {
    /// Builds the network, validating stations and connections.
    fn load_network(&self) -> Result<Network>;
}

impl NetworkSource for NetworkData {
    fn load_network(&self) -> Result<Network> {
        self.to_network()
    }
}

/// Receives finished plans.
pub trait PlanReporter {
    fn report(&mut self, summary: &SolutionSummary);
}

/// Collects every reported summary in memory.
#[derive(Debug, Clone, Default)]
pub struct VecReporter {
    summaries: Vec<SolutionSummary>,
}

impl VecReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summaries(&self) -> &[SolutionSummary] {
        &self.summaries
    }

    /// Highest-K summary reported so far.
    pub fn best(&self) -> Option<&SolutionSummary> {
        self.summaries.iter().max_by(|a, b| a.k.total_cmp(&b.k))
    }
}

impl PlanReporter for VecReporter {
    fn report(&mut self, summary: &SolutionSummary) {
        self.summaries.push(summary.clone());
    }
}

/// One route by station name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Station names in travel order.
    pub stations: Vec<String>,
    /// Route duration.
    pub minutes: u32,
}

/// Reporting view of a scored plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionSummary {
    /// Algorithm that produced the plan.
    pub algorithm: String,
    /// Routes in plan order.
    pub routes: Vec<RouteSummary>,
    /// Fraction of connections covered.
    pub coverage: f64,
    /// Total minutes over all routes.
    pub minutes: u64,
    /// Quality score K.
    pub k: f64,
}

impl SolutionSummary {
    /// Resolves station ids in `solution` to names from `network`.
    pub fn new(
        algorithm: impl Into<String>,
        network: &Network,
        solution: &Solution,
        score: &Score,
    ) -> Self {
        let routes = solution
            .routes()
            .iter()
            .map(|route| RouteSummary {
                stations: route
                    .stations()
                    .iter()
                    .map(|&s| network.station(s).name().to_string())
                    .collect(),
                minutes: route.minutes(),
            })
            .collect();
        Self {
            algorithm: algorithm.into(),
            routes,
            coverage: score.coverage,
            minutes: score.minutes,
            k: score.k,
        }
    }

    /// Number of routes (T).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::compute_score;
    use crate::graph::{ConnectionRecord, StationRecord};
    use crate::models::Route;

    fn data() -> NetworkData {
        NetworkData {
            stations: vec![
                StationRecord {
                    name: "Alkmaar".into(),
                    x: 52.63,
                    y: 4.74,
                },
                StationRecord {
                    name: "Castricum".into(),
                    x: 52.54,
                    y: 4.66,
                },
                StationRecord {
                    name: "Zaandam".into(),
                    x: 52.43,
                    y: 4.81,
                },
            ],
            connections: vec![
                ConnectionRecord {
                    station1: "Alkmaar".into(),
                    station2: "Castricum".into(),
                    minutes: 9,
                },
                ConnectionRecord {
                    station1: "Castricum".into(),
                    station2: "Zaandam".into(),
                    minutes: 13,
                },
            ],
        }
    }

    #[test]
    fn test_network_source_for_data() {
        let net = data().load_network().expect("valid");
        assert_eq!(net.num_stations(), 3);
        assert_eq!(net.num_connections(), 2);
    }

    #[test]
    fn test_summary_uses_names() {
        let net = data().load_network().expect("valid");
        let sol = Solution::from_routes(vec![
            Route::from_stations(&net, &[0, 1, 2], 120).expect("valid"),
        ]);
        let score = compute_score(&sol, net.num_connections()).expect("non-empty");
        let summary = SolutionSummary::new("greedy", &net, &sol, &score);
        assert_eq!(summary.num_routes(), 1);
        assert_eq!(
            summary.routes[0].stations,
            vec!["Alkmaar", "Castricum", "Zaandam"]
        );
        assert_eq!(summary.routes[0].minutes, 22);
        assert_eq!(summary.coverage, 1.0);
    }

    #[test]
    fn test_summary_serializes() {
        let net = data().load_network().expect("valid");
        let sol = Solution::from_routes(vec![
            Route::from_stations(&net, &[2, 1], 120).expect("valid"),
        ]);
        let score = compute_score(&sol, net.num_connections()).expect("non-empty");
        let summary = SolutionSummary::new("random", &net, &sol, &score);

        let json = serde_json::to_value(&summary).expect("serializable");
        assert_eq!(json["algorithm"], "random");
        assert_eq!(json["routes"][0]["stations"][0], "Zaandam");
        assert_eq!(json["coverage"], 0.5);

        let back: SolutionSummary = serde_json::from_value(json).expect("round-trips");
        assert_eq!(back, summary);
    }

    #[test]
    fn test_vec_reporter_best() {
        let net = data().load_network().expect("valid");
        let mut reporter = VecReporter::new();
        for stations in [&[0usize, 1][..], &[0, 1, 2][..]] {
            let sol = Solution::from_routes(vec![
                Route::from_stations(&net, stations, 120).expect("valid"),
            ]);
            let score = compute_score(&sol, net.num_connections()).expect("non-empty");
            reporter.report(&SolutionSummary::new("greedy", &net, &sol, &score));
        }
        assert_eq!(reporter.summaries().len(), 2);
        assert_eq!(reporter.best().map(|s| s.num_routes()), Some(1));
        assert_eq!(reporter.best().map(|s| s.minutes), Some(22));
    }
}
