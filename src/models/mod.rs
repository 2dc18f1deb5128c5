//! Domain model types for line planning.
//!
//! Provides stations and connections, routes as ordered walks over
//! connections, solutions as sets of routes, and the per-run constraints
//! that bound them.

mod constraints;
mod route;
mod solution;
mod station;

pub use constraints::{Constraints, Dataset};
pub use route::{Route, RouteBuilder};
pub use solution::{Solution, Violation, ViolationType};
pub use station::{Connection, Station};
