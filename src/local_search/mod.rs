//! Local search for improving line plans.
//!
//! - [`HillClimber`]: Strictly improving route replacement and restart
//!
//! Searches expose single steps through [`Improver`] so callers can loop or
//! time-box them externally.

mod hill_climber;

pub use hill_climber::{HillClimber, HillClimberConfig, Mutation};

use rand::Rng;

use crate::error::Result;
use crate::evaluation::Score;
use crate::models::Solution;

/// An iterative improvement search over line plans.
pub trait Improver {
    /// Tries one candidate; returns `true` if it was accepted.
    fn step<R: Rng>(&mut self, rng: &mut R) -> Result<bool>;

    /// Whether the most recent step was accepted.
    fn has_improved(&self) -> bool;

    /// The best plan found so far.
    fn current(&self) -> &Solution;

    /// Score of [`Improver::current`].
    fn current_score(&self) -> &Score;
}
