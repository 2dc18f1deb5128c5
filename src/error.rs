//! Error types for line planning.

use thiserror::Error;

use crate::config::ConfigError;

/// Why a route could not be extended to the requested station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionFailure {
    /// No connection joins the route's last station and the next station.
    NoConnection,
    /// Appending the connection would push the route past its limit.
    DurationExceeded {
        /// Route duration after the extension.
        duration: u64,
        /// Per-route limit in minutes.
        limit: u32,
    },
}

impl std::fmt::Display for ExtensionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConnection => write!(f, "no connection"),
            Self::DurationExceeded { duration, limit } => {
                write!(f, "duration {duration} exceeds limit {limit}")
            }
        }
    }
}

/// Main error type for line planning operations.
#[derive(Debug, Error)]
pub enum LinePlanError {
    /// A route extension has no matching connection or breaks the duration limit.
    ///
    /// Strategies recover from this locally; it only reaches callers that
    /// build routes by hand.
    #[error("invalid extension from station {from} to station {to}: {reason}")]
    InvalidExtension {
        /// Station the route currently ends at.
        from: usize,
        /// Station the caller tried to append.
        to: usize,
        /// Failure cause.
        reason: ExtensionFailure,
    },

    /// A caller-supplied route is malformed (for example, a single station).
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// The network has no connections, so coverage is undefined.
    #[error("network has no connections")]
    EmptyNetwork,

    /// The constraints can never admit a route.
    #[error("unreachable constraint: {0}")]
    UnreachableConstraint(String),

    /// A connection or lookup named a station that does not exist.
    #[error("unknown station `{0}`")]
    UnknownStation(String),

    /// Two stations share a name.
    #[error("duplicate station `{0}`")]
    DuplicateStation(String),

    /// A connection was rejected while building the network.
    #[error("invalid connection {from} - {to}: {reason}")]
    InvalidConnection {
        /// First endpoint name.
        from: String,
        /// Second endpoint name.
        to: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Solver configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for line planning operations.
pub type Result<T> = std::result::Result<T, LinePlanError>;
