//! Per-run planning constraints and dataset presets.

use serde::{Deserialize, Serialize};

use crate::error::{LinePlanError, Result};
use crate::graph::Network;

/// Budget a line plan must respect.
///
/// # Examples
///
/// ```
/// use u_lineplan::models::{Constraints, Dataset};
///
/// let c = Constraints::from(Dataset::Regional);
/// assert_eq!(c.max_route_minutes, 120);
/// assert_eq!(c.max_routes, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// Maximum cumulative duration of a single route, in minutes.
    pub max_route_minutes: u32,
    /// Maximum number of routes in a solution.
    pub max_routes: usize,
}

impl Constraints {
    /// Creates a constraint pair.
    pub fn new(max_route_minutes: u32, max_routes: usize) -> Self {
        Self {
            max_route_minutes,
            max_routes,
        }
    }

    /// Checks that a search under these constraints can produce anything.
    ///
    /// # Errors
    ///
    /// - [`LinePlanError::EmptyNetwork`] if the network has no connections.
    /// - [`LinePlanError::UnreachableConstraint`] if `max_routes` is zero or
    ///   the route limit is shorter than every connection.
    pub fn check(&self, network: &Network) -> Result<()> {
        if self.max_routes == 0 {
            return Err(LinePlanError::UnreachableConstraint(
                "max_routes must be at least 1".into(),
            ));
        }
        let shortest = network
            .shortest_connection()
            .ok_or(LinePlanError::EmptyNetwork)?;
        if self.max_route_minutes < shortest {
            return Err(LinePlanError::UnreachableConstraint(format!(
                "route limit of {} min is below the shortest connection ({} min)",
                self.max_route_minutes, shortest
            )));
        }
        Ok(())
    }
}

/// Named network presets with their budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    /// Regional network (22 stations): 120 min per route, 7 routes.
    #[default]
    Regional,
    /// National network: 180 min per route, 20 routes.
    National,
}

impl From<Dataset> for Constraints {
    fn from(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Regional => Constraints::new(120, 7),
            Dataset::National => Constraints::new(180, 20),
        }
    }
}
