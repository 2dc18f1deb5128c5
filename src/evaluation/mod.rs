//! Solution scoring and feasibility checking.
//!
//! - [`compute_score`]: quality score K from coverage, route count, minutes
//! - [`validate_solution`]: route connectivity, duration and count checks

mod scorer;
mod validator;

pub use scorer::{compute_score, Score, COVERAGE_WEIGHT, ROUTE_COST};
pub use validator::{validate_route, validate_solution};
