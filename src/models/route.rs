//! Route and route builder types.

use crate::error::{ExtensionFailure, LinePlanError, Result};
use crate::graph::Network;

/// An ordered walk over connections that fits a duration budget.
///
/// A route always holds at least two stations and exactly one connection id
/// per hop. Stations may repeat; connections may be shared with other
/// routes.
///
/// # Examples
///
/// ```
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::Route;
///
/// let mut b = NetworkBuilder::new();
/// for name in ["A", "B", "C"] {
///     b.add_station(name, 0.0, 0.0).unwrap();
/// }
/// b.add_connection("A", "B", 10).unwrap();
/// b.add_connection("B", "C", 15).unwrap();
/// let net = b.build();
///
/// let route = Route::from_stations(&net, &[0, 1, 2], 120).unwrap();
/// assert_eq!(route.minutes(), 25);
/// assert_eq!(route.connections(), &[0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stations: Vec<usize>,
    connections: Vec<usize>,
    minutes: u32,
}

impl Route {
    /// Builds a route from an explicit station sequence.
    ///
    /// # Errors
    ///
    /// - [`LinePlanError::InvalidRoute`] if fewer than two stations are given.
    /// - [`LinePlanError::InvalidExtension`] if a hop has no connection or
    ///   the total exceeds `limit`.
    pub fn from_stations(network: &Network, stations: &[usize], limit: u32) -> Result<Self> {
        let (&first, rest) = stations
            .split_first()
            .ok_or_else(|| LinePlanError::InvalidRoute("empty station sequence".into()))?;
        if first >= network.num_stations() {
            return Err(LinePlanError::UnknownStation(format!("#{first}")));
        }
        let mut builder = RouteBuilder::new(network, first, limit);
        for &next in rest {
            builder.extend(next)?;
        }
        builder.finish().ok_or_else(|| {
            LinePlanError::InvalidRoute("a route needs at least two stations".into())
        })
    }

    /// Stations in visiting order.
    pub fn stations(&self) -> &[usize] {
        &self.stations
    }

    /// Connection ids in traversal order (one per hop).
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }

    /// Cumulative duration in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// First station.
    pub fn first(&self) -> usize {
        self.stations[0]
    }

    /// Last station.
    pub fn last(&self) -> usize {
        self.stations[self.stations.len() - 1]
    }

    /// Number of hops.
    pub fn num_hops(&self) -> usize {
        self.connections.len()
    }

    /// Joins `self` and `other` into one route.
    ///
    /// If `self` ends where `other` starts, the shared station appears once.
    /// Otherwise `via` holds the id and minutes of the connection from
    /// `self.last()` to `other.first()`.
    pub(crate) fn joined(&self, other: &Route, via: Option<(usize, u32)>) -> Route {
        let mut stations = self.stations.clone();
        let mut connections = self.connections.clone();
        let mut minutes = self.minutes + other.minutes;
        match via {
            Some((conn, conn_minutes)) => {
                connections.push(conn);
                minutes += conn_minutes;
                stations.extend_from_slice(&other.stations);
            }
            None => stations.extend_from_slice(&other.stations[1..]),
        }
        connections.extend_from_slice(&other.connections);
        Route {
            stations,
            connections,
            minutes,
        }
    }
}

/// Incrementally extends a route while enforcing connectivity and the limit.
///
/// # Examples
///
/// ```
/// use u_lineplan::graph::NetworkBuilder;
/// use u_lineplan::models::RouteBuilder;
///
/// let mut b = NetworkBuilder::new();
/// b.add_station("A", 0.0, 0.0).unwrap();
/// b.add_station("B", 0.0, 0.0).unwrap();
/// b.add_connection("A", "B", 50).unwrap();
/// let net = b.build();
///
/// let mut rb = RouteBuilder::new(&net, 0, 60);
/// assert!(rb.extend(1).is_ok());
/// assert!(rb.extend(0).is_err()); // 100 > 60
/// let route = rb.finish().unwrap();
/// assert_eq!(route.minutes(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct RouteBuilder<'a> {
    network: &'a Network,
    limit: u32,
    stations: Vec<usize>,
    connections: Vec<usize>,
    minutes: u32,
}

impl<'a> RouteBuilder<'a> {
    /// Starts a route at `start` with a per-route limit of `limit` minutes.
    pub fn new(network: &'a Network, start: usize, limit: u32) -> Self {
        Self {
            network,
            limit,
            stations: vec![start],
            connections: Vec::new(),
            minutes: 0,
        }
    }

    /// Station the route currently ends at.
    pub fn current(&self) -> usize {
        self.stations[self.stations.len() - 1]
    }

    /// Minutes spent so far.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Minutes still available under the limit.
    pub fn remaining(&self) -> u32 {
        self.limit - self.minutes
    }

    /// Stations visited so far.
    pub fn stations(&self) -> &[usize] {
        &self.stations
    }

    /// Appends `next` to the route.
    ///
    /// # Errors
    ///
    /// Returns [`LinePlanError::InvalidExtension`] if no connection joins the
    /// current station and `next`, or the limit would be exceeded. The
    /// builder is unchanged on error.
    pub fn extend(&mut self, next: usize) -> Result<usize> {
        let from = self.current();
        let conn = self
            .network
            .connection_between(from, next)
            .ok_or(LinePlanError::InvalidExtension {
                from,
                to: next,
                reason: ExtensionFailure::NoConnection,
            })?;
        let hop = self.network.connection(conn).minutes();
        let duration = u64::from(self.minutes) + u64::from(hop);
        if duration > u64::from(self.limit) {
            return Err(LinePlanError::InvalidExtension {
                from,
                to: next,
                reason: ExtensionFailure::DurationExceeded {
                    duration,
                    limit: self.limit,
                },
            });
        }
        self.stations.push(next);
        self.connections.push(conn);
        self.minutes += hop;
        Ok(conn)
    }

    /// Finalizes the route, or returns `None` if it never left its start.
    pub fn finish(self) -> Option<Route> {
        if self.connections.is_empty() {
            return None;
        }
        Some(Route {
            stations: self.stations,
            connections: self.connections,
            minutes: self.minutes,
        })
    }
}
