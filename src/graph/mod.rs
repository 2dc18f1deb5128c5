//! Railway network graph and per-run connection usage.
//!
//! The [`Network`] is built once and shared read-only; each algorithm run
//! tracks covered connections in its own [`UsageOverlay`].

mod data;
mod network;
mod usage;

pub use data::{ConnectionRecord, NetworkData, StationRecord};
pub use network::{Network, NetworkBuilder};
pub use usage::UsageOverlay;
