//! # u-lineplan
//!
//! Railway line planning library: builds sets of train routes that cover
//! as many direct connections as possible with few routes and little total
//! travel time, scored by `K = p * 10000 - (T * 100 + Min)`.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Station, Connection, Route, Solution, Constraints)
//! - [`graph`]: Network graph, builder, plain-data records and per-run usage overlay
//! - [`evaluation`]: Quality score K and feasibility checking
//! - [`constructive`]: Construction strategies (Random, Greedy, Beam search, Dijkstra)
//! - [`local_search`]: Hill climbing behind the `Improver` trait
//! - [`config`]: TOML solver configuration
//! - [`solver`]: Configured entry point
//! - [`interface`]: Network source and plan reporter contracts

pub mod config;
pub mod constructive;
pub mod error;
pub mod evaluation;
pub mod graph;
pub mod interface;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{LinePlanError, Result};
