//! Station and connection types.

/// A station in the railway network.
///
/// The station's identity is its index in the [`Network`](crate::graph::Network)
/// it was added to. Coordinates are carried for external map rendering and
/// play no role in scoring.
///
/// # Examples
///
/// ```
/// use u_lineplan::models::Station;
///
/// let s = Station::new("Alkmaar", 52.63, 4.74);
/// assert_eq!(s.name(), "Alkmaar");
/// assert_eq!(s.position(), (52.63, 4.74));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    name: String,
    x: f64,
    y: f64,
}

impl Station {
    /// Creates a new station.
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Unique station name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geographic position `(x, y)`.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// An undirected, timed connection between two stations.
///
/// # Examples
///
/// ```
/// use u_lineplan::models::Connection;
///
/// let c = Connection::new(0, 3, 15);
/// assert_eq!(c.minutes(), 15);
/// assert_eq!(c.other(0), Some(3));
/// assert_eq!(c.other(3), Some(0));
/// assert_eq!(c.other(1), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    a: usize,
    b: usize,
    minutes: u32,
}

impl Connection {
    /// Creates a connection between stations `a` and `b`.
    pub fn new(a: usize, b: usize, minutes: u32) -> Self {
        Self { a, b, minutes }
    }

    /// Both endpoints, in the order given at construction.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Travel time in minutes.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns `true` if `station` is one of the endpoints.
    pub fn touches(&self, station: usize) -> bool {
        self.a == station || self.b == station
    }

    /// Returns the endpoint opposite `station`, or `None` if `station` is
    /// not an endpoint.
    pub fn other(&self, station: usize) -> Option<usize> {
        if station == self.a {
            Some(self.b)
        } else if station == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_accessors() {
        let s = Station::new("Den Helder", 52.96, 4.76);
        assert_eq!(s.name(), "Den Helder");
        assert_eq!(s.position(), (52.96, 4.76));
    }

    #[test]
    fn test_connection_symmetry() {
        let c = Connection::new(2, 5, 9);
        assert!(c.touches(2));
        assert!(c.touches(5));
        assert!(!c.touches(1));
        assert_eq!(c.other(2), Some(5));
        assert_eq!(c.other(5), Some(2));
        assert_eq!(c.endpoints(), (2, 5));
    }
}
