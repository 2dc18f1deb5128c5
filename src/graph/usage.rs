//! Per-run "used connection" bookkeeping.

use super::Network;

/// A run-scoped overlay recording which connections are already covered.
///
/// The network itself stays read-only; every strategy run owns its own
/// overlay, so concurrent runs over one `Network` never interfere.
///
/// # Examples
///
/// ```
/// use u_lineplan::graph::{NetworkBuilder, UsageOverlay};
///
/// let mut b = NetworkBuilder::new();
/// b.add_station("A", 0.0, 0.0).unwrap();
/// b.add_station("B", 1.0, 0.0).unwrap();
/// let ab = b.add_connection("A", "B", 10).unwrap();
/// let net = b.build();
///
/// let mut usage = UsageOverlay::new(&net);
/// assert!(!usage.all_used());
/// assert!(usage.mark(ab));
/// assert!(usage.all_used());
/// assert_eq!(usage.unused_degree(&net, 0), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageOverlay {
    used: Vec<bool>,
    used_count: usize,
}

impl UsageOverlay {
    /// Creates an overlay with no connection marked.
    pub fn new(network: &Network) -> Self {
        Self {
            used: vec![false; network.num_connections()],
            used_count: 0,
        }
    }

    /// Marks a connection as used. Returns `true` if it was unused before.
    pub fn mark(&mut self, connection: usize) -> bool {
        if self.used[connection] {
            return false;
        }
        self.used[connection] = true;
        self.used_count += 1;
        true
    }

    /// Marks every connection in `connections`.
    pub fn mark_all(&mut self, connections: &[usize]) {
        for &c in connections {
            self.mark(c);
        }
    }

    /// Clears the mark on a connection. Returns `true` if it was used before.
    pub fn unmark(&mut self, connection: usize) -> bool {
        if !self.used[connection] {
            return false;
        }
        self.used[connection] = false;
        self.used_count -= 1;
        true
    }

    /// Returns `true` if the connection is marked.
    pub fn is_used(&self, connection: usize) -> bool {
        self.used[connection]
    }

    /// Returns `true` once every connection is marked.
    pub fn all_used(&self) -> bool {
        self.used_count == self.used.len()
    }

    /// Number of marked connections.
    pub fn used_count(&self) -> usize {
        self.used_count
    }

    /// Number of unused connections touching `station`.
    pub fn unused_degree(&self, network: &Network, station: usize) -> usize {
        network
            .neighbors(station)
            .iter()
            .filter(|&&(_, c)| !self.used[c])
            .count()
    }

    /// Unused `(neighbor, connection_id)` pairs of `station`, sorted by neighbor.
    pub fn unused_neighbors<'a>(
        &'a self,
        network: &'a Network,
        station: usize,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        network
            .neighbors(station)
            .iter()
            .copied()
            .filter(move |&(_, c)| !self.used[c])
    }

    /// Returns `true` if `station` has an unused connection of at most
    /// `budget` minutes.
    pub fn has_fitting_unused(&self, network: &Network, station: usize, budget: u32) -> bool {
        self.unused_neighbors(network, station)
            .any(|(_, c)| network.connection(c).minutes() <= budget)
    }
}
