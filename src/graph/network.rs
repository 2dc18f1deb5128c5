//! Read-only railway network with dense connection lookup.

use std::collections::{HashMap, HashSet};

use crate::error::{LinePlanError, Result};
use crate::models::{Connection, Station};

/// An immutable railway network: stations, connections, and adjacency.
///
/// Connection lookup between two stations is a dense n×n table stored in
/// row-major order, so hop validation during route construction is O(1).
/// Adjacency lists are sorted by neighbor index, which makes every
/// "lowest identity" tie-break a first-match scan.
///
/// Build one with [`NetworkBuilder`].
///
/// # Examples
///
/// ```
/// use u_lineplan::graph::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new();
/// let a = b.add_station("A", 0.0, 0.0).unwrap();
/// let c = b.add_station("C", 2.0, 0.0).unwrap();
/// b.add_connection("A", "C", 12).unwrap();
/// let net = b.build();
///
/// assert_eq!(net.num_stations(), 2);
/// assert_eq!(net.degree(a), 1);
/// assert!(net.connection_between(a, c).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Network {
    stations: Vec<Station>,
    connections: Vec<Connection>,
    adjacency: Vec<Vec<(usize, usize)>>,
    lookup: Vec<Option<usize>>,
    names: HashMap<String, usize>,
}

impl Network {
    /// Number of stations.
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    /// Number of connections.
    pub fn num_connections(&self) -> usize {
        self.connections.len()
    }

    /// All stations, indexed by station id.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Returns the station with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn station(&self, id: usize) -> &Station {
        &self.stations[id]
    }

    /// All connections, indexed by connection id.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the connection with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn connection(&self, id: usize) -> &Connection {
        &self.connections[id]
    }

    /// Neighbors of `station` as `(neighbor, connection_id)`, sorted by neighbor.
    pub fn neighbors(&self, station: usize) -> &[(usize, usize)] {
        &self.adjacency[station]
    }

    /// Number of connections touching `station`.
    pub fn degree(&self, station: usize) -> usize {
        self.adjacency[station].len()
    }

    /// Id of the connection between `a` and `b`, if any.
    pub fn connection_between(&self, a: usize, b: usize) -> Option<usize> {
        let n = self.stations.len();
        if a >= n || b >= n {
            return None;
        }
        self.lookup[a * n + b]
    }

    /// Duration of the shortest connection, or `None` for an edgeless network.
    pub fn shortest_connection(&self) -> Option<u32> {
        self.connections.iter().map(|c| c.minutes()).min()
    }

    /// Looks up a station id by name.
    pub fn station_by_name(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Station ids that have at least one connection.
    pub fn connected_stations(&self) -> Vec<usize> {
        (0..self.stations.len())
            .filter(|&s| !self.adjacency[s].is_empty())
            .collect()
    }
}

/// Incremental builder that validates stations and connections.
///
/// Rejects duplicate names, self-loops, zero-minute connections, and a
/// second connection between the same pair of stations.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    stations: Vec<Station>,
    connections: Vec<Connection>,
    names: HashMap<String, usize>,
    pairs: HashSet<(usize, usize)>,
}

impl NetworkBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a station and returns its id.
    pub fn add_station(&mut self, name: impl Into<String>, x: f64, y: f64) -> Result<usize> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(LinePlanError::DuplicateStation(name));
        }
        let id = self.stations.len();
        self.names.insert(name.clone(), id);
        self.stations.push(Station::new(name, x, y));
        Ok(id)
    }

    /// Adds a connection between two named stations and returns its id.
    pub fn add_connection(&mut self, from: &str, to: &str, minutes: u32) -> Result<usize> {
        let a = self.lookup(from)?;
        let b = self.lookup(to)?;
        self.connect(a, b, minutes)
    }

    /// Adds a connection between two station ids and returns its id.
    pub fn connect(&mut self, a: usize, b: usize, minutes: u32) -> Result<usize> {
        let n = self.stations.len();
        if a >= n {
            return Err(LinePlanError::UnknownStation(format!("#{a}")));
        }
        if b >= n {
            return Err(LinePlanError::UnknownStation(format!("#{b}")));
        }
        let reject = |reason: &str| LinePlanError::InvalidConnection {
            from: self.stations[a].name().to_string(),
            to: self.stations[b].name().to_string(),
            reason: reason.to_string(),
        };
        if a == b {
            return Err(reject("self-loop"));
        }
        if minutes == 0 {
            return Err(reject("duration must be positive"));
        }
        if !self.pairs.insert((a.min(b), a.max(b))) {
            return Err(reject("duplicate connection"));
        }
        let id = self.connections.len();
        self.connections.push(Connection::new(a, b, minutes));
        Ok(id)
    }

    /// Freezes the builder into a [`Network`].
    pub fn build(self) -> Network {
        let n = self.stations.len();
        let mut adjacency = vec![Vec::new(); n];
        let mut lookup = vec![None; n * n];
        for (id, conn) in self.connections.iter().enumerate() {
            let (a, b) = conn.endpoints();
            adjacency[a].push((b, id));
            adjacency[b].push((a, id));
            lookup[a * n + b] = Some(id);
            lookup[b * n + a] = Some(id);
        }
        for list in &mut adjacency {
            list.sort_unstable();
        }
        Network {
            stations: self.stations,
            connections: self.connections,
            adjacency,
            lookup,
            names: self.names,
        }
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LinePlanError::UnknownStation(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Network {
        let mut b = NetworkBuilder::new();
        for name in ["A", "B", "C", "D"] {
            b.add_station(name, 0.0, 0.0).expect("unique");
        }
        b.add_connection("A", "B", 10).expect("valid");
        b.add_connection("B", "C", 20).expect("valid");
        b.add_connection("C", "A", 5).expect("valid");
        b.build()
    }

    #[test]
    fn test_counts_and_degree() {
        let net = triangle();
        assert_eq!(net.num_stations(), 4);
        assert_eq!(net.num_connections(), 3);
        assert_eq!(net.degree(0), 2);
        assert_eq!(net.degree(3), 0);
        assert_eq!(net.connected_stations(), vec![0, 1, 2]);
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let net = triangle();
        assert_eq!(net.connection_between(0, 1), Some(0));
        assert_eq!(net.connection_between(1, 0), Some(0));
        assert_eq!(net.connection_between(0, 3), None);
        assert_eq!(net.connection_between(0, 99), None);
    }

    #[test]
    fn test_neighbors_sorted() {
        let net = triangle();
        assert_eq!(net.neighbors(0), &[(1, 0), (2, 2)]);
        assert_eq!(net.neighbors(2), &[(0, 2), (1, 1)]);
    }

    #[test]
    fn test_shortest_connection() {
        assert_eq!(triangle().shortest_connection(), Some(5));
        assert_eq!(NetworkBuilder::new().build().shortest_connection(), None);
    }

    #[test]
    fn test_station_by_name() {
        let net = triangle();
        assert_eq!(net.station_by_name("C"), Some(2));
        assert_eq!(net.station_by_name("Z"), None);
        assert_eq!(net.station(2).name(), "C");
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut b = NetworkBuilder::new();
        b.add_station("A", 0.0, 0.0).expect("unique");
        b.add_station("B", 0.0, 0.0).expect("unique");
        assert!(matches!(
            b.add_station("A", 1.0, 1.0),
            Err(LinePlanError::DuplicateStation(_))
        ));
        assert!(matches!(
            b.add_connection("A", "Q", 3),
            Err(LinePlanError::UnknownStation(_))
        ));
        assert!(matches!(
            b.add_connection("A", "A", 3),
            Err(LinePlanError::InvalidConnection { .. })
        ));
        assert!(matches!(
            b.add_connection("A", "B", 0),
            Err(LinePlanError::InvalidConnection { .. })
        ));
        b.add_connection("A", "B", 3).expect("valid");
        assert!(matches!(
            b.add_connection("B", "A", 4),
            Err(LinePlanError::InvalidConnection { .. })
        ));
    }
}
