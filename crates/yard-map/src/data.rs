//! Static map data: stations and the connections between them.
//!
//! Both lists arrive once from the map endpoints and never change
//! afterwards. [`MapData`] owns them and keeps an id index so the
//! renderer and hit-tester can look stations up in O(1).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::MapError;

/// Identifier of a station on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub u8);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A way of travelling between stations.
///
/// Stations only ever offer the first three; `Water` exists on
/// connections only (the river route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitMode {
    Taxi,
    Bus,
    Underground,
    Water,
}

impl TransitMode {
    /// Every mode, in declaration order.
    pub const ALL: [TransitMode; 4] = [Self::Taxi, Self::Bus, Self::Underground, Self::Water];
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Taxi => "taxi",
            Self::Bus => "bus",
            Self::Underground => "underground",
            Self::Water => "water",
        };
        f.write_str(name)
    }
}

/// A station marker in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub pos_x: f64,
    pub pos_y: f64,
    /// Modes served at this station. Never empty.
    pub types: Vec<TransitMode>,
}

impl Station {
    /// World position as an `(x, y)` pair.
    pub fn position(&self) -> (f64, f64) {
        (self.pos_x, self.pos_y)
    }
}

/// An undirected link between two stations for one mode.
///
/// The same pair may be linked several times, once per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: StationId,
    pub to: StationId,
    pub mode: TransitMode,
}

impl Connection {
    /// Returns the station on the other end, or `None` if `station` is
    /// not an endpoint.
    pub fn other_end(&self, station: StationId) -> Option<StationId> {
        if self.from == station {
            Some(self.to)
        } else if self.to == station {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Immutable snapshot of the board.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    stations: Vec<Station>,
    connections: Vec<Connection>,
    index: HashMap<StationId, usize>,
}

impl MapData {
    /// Builds the snapshot and its id index.
    ///
    /// Connections are not checked against the station list here; a
    /// dangling reference is tolerated and reported when rendering.
    ///
    /// # Errors
    /// - [`MapError::DuplicateStation`] if two stations share an id.
    /// - [`MapError::NoTransitModes`] if a station has an empty `types` list.
    pub fn new(stations: Vec<Station>, connections: Vec<Connection>) -> Result<Self, MapError> {
        let mut index = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            if station.types.is_empty() {
                return Err(MapError::NoTransitModes(station.id));
            }
            if index.insert(station.id, i).is_some() {
                return Err(MapError::DuplicateStation(station.id));
            }
        }

        tracing::debug!(
            stations = stations.len(),
            connections = connections.len(),
            "map data loaded"
        );

        Ok(Self {
            stations,
            connections,
            index,
        })
    }

    /// Parses the bodies of the `/map/stations` and `/map/connections`
    /// endpoints.
    pub fn from_json(stations: &str, connections: &str) -> Result<Self, MapError> {
        let stations: Vec<Station> = serde_json::from_str(stations)?;
        let connections: Vec<Connection> = serde_json::from_str(connections)?;
        Self::new(stations, connections)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Looks a station up by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.index.get(&id).map(|&i| &self.stations[i])
    }

    /// Stations one hop away from `station`, optionally limited to one
    /// mode. Sorted, without duplicates.
    pub fn neighbors(&self, station: StationId, mode: Option<TransitMode>) -> Vec<StationId> {
        let mut out: Vec<StationId> = self
            .connections
            .iter()
            .filter(|c| mode.is_none_or(|m| c.mode == m))
            .filter_map(|c| c.other_end(station))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Returns `true` if there are no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: u8, x: f64, y: f64, types: &[TransitMode]) -> Station {
        Station {
            id: StationId(id),
            pos_x: x,
            pos_y: y,
            types: types.to_vec(),
        }
    }

    fn conn(from: u8, to: u8, mode: TransitMode) -> Connection {
        Connection {
            from: StationId(from),
            to: StationId(to),
            mode,
        }
    }

    #[test]
    fn test_station_json_shape() {
        let json = r#"{"id":1,"pos_x":10,"pos_y":20,"types":["taxi","underground"]}"#;
        let s: Station = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, StationId(1));
        assert_eq!(s.position(), (10.0, 20.0));
        assert_eq!(s.types, vec![TransitMode::Taxi, TransitMode::Underground]);
    }

    #[test]
    fn test_connection_json_shape() {
        let json = r#"{"from":108,"to":115,"mode":"water"}"#;
        let c: Connection = serde_json::from_str(json).unwrap();
        assert_eq!(c, conn(108, 115, TransitMode::Water));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let json = r#"{"from":1,"to":2,"mode":"ferry"}"#;
        assert!(serde_json::from_str::<Connection>(json).is_err());
    }

    #[test]
    fn test_from_json_builds_index() {
        let map = MapData::from_json(
            r#"[{"id":1,"pos_x":0,"pos_y":0,"types":["taxi"]},
                {"id":2,"pos_x":100,"pos_y":0,"types":["bus"]}]"#,
            r#"[{"from":1,"to":2,"mode":"taxi"}]"#,
        )
        .unwrap();

        assert_eq!(map.stations().len(), 2);
        assert_eq!(map.connections().len(), 1);
        assert_eq!(map.station(StationId(2)).unwrap().pos_x, 100.0);
        assert!(map.station(StationId(3)).is_none());
    }

    #[test]
    fn test_from_json_reports_bad_json() {
        let err = MapData::from_json("[", "[]").unwrap_err();
        assert!(matches!(err, MapError::Data(_)));
    }

    #[test]
    fn test_duplicate_station_rejected() {
        let err = MapData::new(
            vec![
                station(1, 0.0, 0.0, &[TransitMode::Taxi]),
                station(1, 5.0, 5.0, &[TransitMode::Bus]),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, MapError::DuplicateStation(StationId(1))));
    }

    #[test]
    fn test_station_without_modes_rejected() {
        let err = MapData::new(vec![station(7, 0.0, 0.0, &[])], vec![]).unwrap_err();
        assert_eq!(err.to_string(), "station 7 has no transit modes");
    }

    #[test]
    fn test_neighbors_by_mode() {
        let map = MapData::new(
            vec![
                station(1, 0.0, 0.0, &[TransitMode::Taxi, TransitMode::Bus]),
                station(2, 1.0, 0.0, &[TransitMode::Taxi]),
                station(3, 2.0, 0.0, &[TransitMode::Bus]),
            ],
            vec![
                conn(1, 2, TransitMode::Taxi),
                conn(3, 1, TransitMode::Bus),
                conn(1, 3, TransitMode::Taxi),
                conn(2, 3, TransitMode::Taxi),
            ],
        )
        .unwrap();

        assert_eq!(map.neighbors(StationId(1), None), vec![StationId(2), StationId(3)]);
        assert_eq!(
            map.neighbors(StationId(1), Some(TransitMode::Bus)),
            vec![StationId(3)]
        );
        assert!(map.neighbors(StationId(1), Some(TransitMode::Water)).is_empty());
    }

    #[test]
    fn test_other_end() {
        let c = conn(4, 9, TransitMode::Bus);
        assert_eq!(c.other_end(StationId(4)), Some(StationId(9)));
        assert_eq!(c.other_end(StationId(9)), Some(StationId(4)));
        assert_eq!(c.other_end(StationId(5)), None);
    }

    #[test]
    fn test_mode_display_matches_wire_name() {
        for mode in TransitMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }
}
