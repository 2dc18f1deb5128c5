//! Plain-data network records, as handed over by a loading collaborator.

use serde::{Deserialize, Serialize};

use super::{Network, NetworkBuilder};
use crate::error::Result;

/// One station record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Unique name.
    pub name: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// One connection record, naming its endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// First station name.
    pub station1: String,
    /// Second station name.
    pub station2: String,
    /// Travel time in minutes.
    pub minutes: u32,
}

/// An already-parsed network description.
///
/// # Examples
///
/// ```
/// use u_lineplan::graph::{ConnectionRecord, NetworkData, StationRecord};
///
/// let data = NetworkData {
///     stations: vec![
///         StationRecord { name: "A".into(), x: 0.0, y: 0.0 },
///         StationRecord { name: "B".into(), x: 1.0, y: 0.0 },
///     ],
///     connections: vec![ConnectionRecord {
///         station1: "A".into(),
///         station2: "B".into(),
///         minutes: 7,
///     }],
/// };
/// let net = data.to_network().unwrap();
/// assert_eq!(net.num_connections(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkData {
    /// Station records; a station's id is its position here.
    pub stations: Vec<StationRecord>,
    /// Connection records.
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl NetworkData {
    /// Validates the records and builds a [`Network`].
    pub fn to_network(&self) -> Result<Network> {
        let mut builder = NetworkBuilder::new();
        for s in &self.stations {
            builder.add_station(s.name.clone(), s.x, s.y)?;
        }
        for c in &self.connections {
            builder.add_connection(&c.station1, &c.station2, c.minutes)?;
        }
        Ok(builder.build())
    }
}
