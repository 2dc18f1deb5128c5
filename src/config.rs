//! Solver configuration.
//!
//! Load settings from TOML to choose the dataset limits, the algorithm and
//! its tuning without code changes.
//!
//! # Examples
//!
//! ```
//! use u_lineplan::config::{Algorithm, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     dataset = "national"
//!     algorithm = "beam_greedy_random"
//!     iterations = 50
//!     seed = 7
//!
//!     [beam]
//!     width = 10
//! "#).unwrap();
//!
//! assert_eq!(config.algorithm, Algorithm::BeamGreedyRandom);
//! assert_eq!(config.constraints().max_routes, 20);
//! assert_eq!(config.beam.width, 10);
//! assert_eq!(config.beam.top_k, 3);
//! ```
//!
//! Fall back to defaults when the file is missing:
//!
//! ```
//! use u_lineplan::config::SolverConfig;
//!
//! let config = SolverConfig::load("lineplan.toml").unwrap_or_default();
//! assert_eq!(config.iterations, 1000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constructive::Strategy;
use crate::models::{Constraints, Dataset};

pub use crate::constructive::{BeamConfig, HeuristicWeights};
pub use crate::local_search::HillClimberConfig;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Random,
    Greedy,
    BeamGreedy,
    BeamGreedyRandom,
    BeamHeuristicsRandom,
    Dijkstra,
    DijkstraHeuristic,
    HillClimber,
}

impl Algorithm {
    /// Name used in config files and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
            Self::BeamGreedy => "beam_greedy",
            Self::BeamGreedyRandom => "beam_greedy_random",
            Self::BeamHeuristicsRandom => "beam_heuristics_random",
            Self::Dijkstra => "dijkstra",
            Self::DijkstraHeuristic => "dijkstra_heuristic",
            Self::HillClimber => "hill_climber",
        }
    }
}

/// Random-walk settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Chance of ending a walk before each hop after the first.
    pub stop_probability: f64,
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Network the limits come from.
    pub dataset: Dataset,

    /// Explicit limits; overrides `dataset` when set.
    pub constraints: Option<Constraints>,

    /// Algorithm to run.
    pub algorithm: Algorithm,

    /// Restarts for randomized constructions, steps for the hill climber.
    pub iterations: usize,

    /// Random seed for reproducible results.
    pub seed: u64,

    /// Beam width and top-k pool for the beam algorithms.
    pub beam: BeamConfig,

    /// Hop weights for `beam_heuristics_random`.
    pub heuristic: HeuristicWeights,

    /// Hill climber settings.
    pub hill_climber: HillClimberConfig,

    /// Random-walk settings for `random`.
    pub random: RandomConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            dataset: Dataset::default(),
            constraints: None,
            algorithm: Algorithm::default(),
            iterations: 1000,
            seed: 42,
            beam: BeamConfig::default(),
            heuristic: HeuristicWeights::default(),
            hill_climber: HillClimberConfig::default(),
            random: RandomConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the dataset limits.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Route limits in effect.
    pub fn constraints(&self) -> Constraints {
        self.constraints.unwrap_or_else(|| self.dataset.into())
    }

    /// Construction strategy for the selected algorithm, or `None` for the
    /// hill climber.
    pub fn strategy(&self) -> Option<Strategy> {
        let strategy = match self.algorithm {
            Algorithm::Random => Strategy::Random {
                stop_probability: self.random.stop_probability,
            },
            Algorithm::Greedy => Strategy::Greedy,
            Algorithm::BeamGreedy => Strategy::BeamGreedy {
                width: self.beam.width,
            },
            Algorithm::BeamGreedyRandom => Strategy::BeamGreedyRandom(self.beam),
            Algorithm::BeamHeuristicsRandom => Strategy::BeamHeuristicsRandom {
                beam: self.beam,
                weights: self.heuristic,
            },
            Algorithm::Dijkstra => Strategy::Dijkstra,
            Algorithm::DijkstraHeuristic => Strategy::DijkstraHeuristic,
            Algorithm::HillClimber => return None,
        };
        Some(strategy)
    }

    /// Checks value ranges that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::Invalid("iterations must be positive".into()));
        }
        if self.beam.width == 0 {
            return Err(ConfigError::Invalid("beam.width must be positive".into()));
        }
        if self.beam.top_k == 0 {
            return Err(ConfigError::Invalid("beam.top_k must be positive".into()));
        }
        check_stop_probability("random.stop_probability", self.random.stop_probability)?;
        check_stop_probability(
            "hill_climber.stop_probability",
            self.hill_climber.stop_probability,
        )?;
        Ok(())
    }
}

/// Rejects a walk stop probability outside `[0, 1)`.
pub(crate) fn check_stop_probability(key: &str, p: f64) -> Result<(), ConfigError> {
    if (0.0..1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{key} must be in [0, 1), got {p}")))
    }
}
