//! Directed, weighted rail graph.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::domain::{Coordinates, Station, StationCode};

use super::error::{MalformedInput, Table};
use super::records::{EdgeRecord, StationRecord};

/// An outgoing connection from a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: StationCode,
    pub distance_km: f64,
}

/// The rail network as a directed graph.
///
/// Built once from the station and edge tables and read-only afterwards.
/// Invariants, established by [`RailGraph::build`]:
/// - every edge endpoint is a known station;
/// - every weight is finite and non-negative;
/// - there is at most one edge per (from, to) pair, carrying the minimum
///   weight seen for that pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RailGraph {
    stations: HashMap<StationCode, Station>,
    /// Outgoing edges per station, in first-seen input order.
    adjacency: HashMap<StationCode, Vec<Edge>>,
    edge_count: usize,
}

impl RailGraph {
    /// Build a graph from raw records.
    ///
    /// Stations are inserted first, then edges. Any bad row fails the whole
    /// build; there is no partially constructed graph.
    pub fn build<S, E>(stations: S, edges: E) -> Result<Self, MalformedInput>
    where
        S: IntoIterator<Item = StationRecord>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let mut graph = RailGraph::default();

        for (idx, record) in stations.into_iter().enumerate() {
            let station = validate_station(record, idx + 1)?;
            match graph.stations.get(&station.code) {
                Some(existing) if *existing == station => continue,
                Some(_) => return Err(MalformedInput::ConflictingStation(station.code)),
                None => {
                    graph.stations.insert(station.code.clone(), station);
                }
            }
        }

        // Position of each (from, to) edge in its adjacency list, so that
        // duplicates resolve in O(1).
        let mut positions: HashMap<(StationCode, StationCode), usize> = HashMap::new();

        for (idx, record) in edges.into_iter().enumerate() {
            let row = idx + 1;
            let from = parse_code(&record.source, Table::Edges, row, "source")?;
            let to = parse_code(&record.target, Table::Edges, row, "target")?;

            let distance_km = graph.resolve_weight(&from, &to, record.distance)?;

            let outgoing = graph.adjacency.entry(from.clone()).or_default();
            match positions.entry((from, to)) {
                Entry::Occupied(slot) => {
                    let edge = &mut outgoing[*slot.get()];
                    if distance_km < edge.distance_km {
                        edge.distance_km = distance_km;
                    }
                }
                Entry::Vacant(slot) => {
                    let to = slot.key().1.clone();
                    slot.insert(outgoing.len());
                    outgoing.push(Edge { to, distance_km });
                }
            }
        }

        graph.edge_count = positions.len();

        debug!(
            stations = graph.stations.len(),
            edges = graph.edge_count,
            "Rail graph built"
        );

        Ok(graph)
    }

    /// Check both endpoints exist and produce the edge weight, deriving it
    /// from coordinates when the record has none.
    fn resolve_weight(
        &self,
        from: &StationCode,
        to: &StationCode,
        weight: Option<f64>,
    ) -> Result<f64, MalformedInput> {
        let dangling = |missing: &StationCode| MalformedInput::DanglingEdge {
            from: from.clone(),
            to: to.clone(),
            missing: missing.clone(),
        };
        let from_station = self.stations.get(from).ok_or_else(|| dangling(from))?;
        let to_station = self.stations.get(to).ok_or_else(|| dangling(to))?;

        let distance_km =
            weight.unwrap_or_else(|| from_station.location.distance_km(&to_station.location));

        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(MalformedInput::InvalidWeight {
                from: from.clone(),
                to: to.clone(),
                weight: distance_km,
            });
        }

        Ok(distance_km)
    }

    /// Look up a station by code.
    pub fn station(&self, code: &StationCode) -> Option<&Station> {
        self.stations.get(code)
    }

    /// Check whether a station exists.
    pub fn contains(&self, code: &StationCode) -> bool {
        self.stations.contains_key(code)
    }

    /// All stations, in no particular order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    /// Outgoing edges of a station, in input order. Empty for unknown
    /// stations and for stations with no departures.
    pub fn outgoing(&self, code: &StationCode) -> &[Edge] {
        self.adjacency.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the direct edge `from -> to`, if there is one.
    pub fn edge_weight(&self, from: &StationCode, to: &StationCode) -> Option<f64> {
        self.outgoing(from)
            .iter()
            .find(|e| &e.to == to)
            .map(|e| e.distance_km)
    }

    /// Coordinates of a station.
    pub fn coordinates(&self, code: &StationCode) -> Option<Coordinates> {
        self.stations.get(code).map(|s| s.location)
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

fn parse_code(
    raw: &str,
    table: Table,
    row: usize,
    field: &'static str,
) -> Result<StationCode, MalformedInput> {
    if raw.trim().is_empty() {
        return Err(MalformedInput::MissingField { table, row, field });
    }
    StationCode::parse(raw).map_err(|source| MalformedInput::InvalidCode { table, row, source })
}

fn validate_station(record: StationRecord, row: usize) -> Result<Station, MalformedInput> {
    let missing = |field| MalformedInput::MissingField {
        table: Table::Stations,
        row,
        field,
    };

    let code = parse_code(&record.code, Table::Stations, row, "code")?;

    let city = record
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| missing("city"))?
        .to_string();

    let lat = record.lat.ok_or_else(|| missing("lat"))?;
    let lon = record.lon.ok_or_else(|| missing("long"))?;
    let location = Coordinates::new(lat, lon).map_err(|source| {
        MalformedInput::InvalidCoordinates {
            code: code.clone(),
            source,
        }
    })?;

    // A nameless station is still routable; show its code instead.
    let name = match record.name.trim() {
        "" => code.as_str().to_string(),
        name => name.to_string(),
    };

    Ok(Station {
        code,
        name,
        city,
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn stations() -> Vec<StationRecord> {
        vec![
            StationRecord::new("X", "Xton", "Alpha", 51.0, -1.0),
            StationRecord::new("Y", "Yford", "Beta", 51.1, -1.1),
            StationRecord::new("Z", "Zbury", "Gamma", 51.2, -1.2),
        ]
    }

    #[test]
    fn builds_adjacency() {
        let graph = RailGraph::build(
            stations(),
            vec![EdgeRecord::new("X", "Y", 10.0), EdgeRecord::new("Y", "Z", 5.0)],
        )
        .unwrap();

        assert_eq!(graph.station_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.outgoing(&code("X")),
            &[Edge {
                to: code("Y"),
                distance_km: 10.0
            }]
        );
        assert!(graph.outgoing(&code("Z")).is_empty());
        assert_eq!(graph.edge_weight(&code("Y"), &code("Z")), Some(5.0));
    }

    #[test]
    fn edges_are_directed() {
        let graph = RailGraph::build(stations(), vec![EdgeRecord::new("X", "Y", 10.0)]).unwrap();

        assert_eq!(graph.edge_weight(&code("X"), &code("Y")), Some(10.0));
        assert_eq!(graph.edge_weight(&code("Y"), &code("X")), None);
    }

    #[test]
    fn duplicate_edges_keep_minimum() {
        let graph = RailGraph::build(
            stations(),
            vec![
                EdgeRecord::new("X", "Y", 12.0),
                EdgeRecord::new("X", "Z", 30.0),
                EdgeRecord::new("X", "Y", 9.5),
                EdgeRecord::new("X", "Y", 11.0),
            ],
        )
        .unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight(&code("X"), &code("Y")), Some(9.5));
        // First-seen order is preserved
        let order: Vec<_> = graph.outgoing(&code("X")).iter().map(|e| e.to.as_str()).collect();
        assert_eq!(order, vec!["Y", "Z"]);
    }

    #[test]
    fn reingesting_edges_is_idempotent() {
        let edges = vec![EdgeRecord::new("X", "Y", 10.0), EdgeRecord::new("Y", "Z", 5.0)];
        let once = RailGraph::build(stations(), edges.clone()).unwrap();
        let twice =
            RailGraph::build(stations(), edges.iter().cloned().chain(edges.clone())).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn identical_station_rows_accepted() {
        let mut rows = stations();
        rows.push(rows[0].clone());
        let graph = RailGraph::build(rows, vec![]).unwrap();
        assert_eq!(graph.station_count(), 3);
    }

    #[test]
    fn conflicting_station_rows_rejected() {
        let mut rows = stations();
        rows.push(StationRecord::new("X", "Other", "Alpha", 51.0, -1.0));
        let err = RailGraph::build(rows, vec![]).unwrap_err();
        assert_eq!(err, MalformedInput::ConflictingStation(code("X")));
    }

    #[test]
    fn dangling_edge_rejected() {
        let err =
            RailGraph::build(stations(), vec![EdgeRecord::new("X", "Q", 1.0)]).unwrap_err();
        assert_eq!(
            err,
            MalformedInput::DanglingEdge {
                from: code("X"),
                to: code("Q"),
                missing: code("Q"),
            }
        );
    }

    #[test]
    fn negative_weight_rejected() {
        let err =
            RailGraph::build(stations(), vec![EdgeRecord::new("X", "Y", -0.1)]).unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidWeight { weight, .. } if weight == -0.1));
    }

    #[test]
    fn non_finite_weight_rejected() {
        let err = RailGraph::build(stations(), vec![EdgeRecord::new("X", "Y", f64::NAN)])
            .unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidWeight { .. }));

        let err = RailGraph::build(stations(), vec![EdgeRecord::new("X", "Y", f64::INFINITY)])
            .unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidWeight { .. }));
    }

    #[test]
    fn zero_weight_accepted() {
        let graph = RailGraph::build(stations(), vec![EdgeRecord::new("X", "Y", 0.0)]).unwrap();
        assert_eq!(graph.edge_weight(&code("X"), &code("Y")), Some(0.0));
    }

    #[test]
    fn missing_weight_uses_great_circle() {
        let graph = RailGraph::build(stations(), vec![EdgeRecord::unweighted("X", "Y")]).unwrap();
        let expected = crate::geo::haversine_km(51.0, -1.0, 51.1, -1.1);
        assert_eq!(graph.edge_weight(&code("X"), &code("Y")), Some(expected));
    }

    #[test]
    fn missing_city_rejected() {
        let mut row = StationRecord::new("W", "Wick", "  ", 58.4, -3.1);
        let err = RailGraph::build(vec![row.clone()], vec![]).unwrap_err();
        assert_eq!(
            err,
            MalformedInput::MissingField {
                table: Table::Stations,
                row: 1,
                field: "city"
            }
        );

        row.city = None;
        assert!(RailGraph::build(vec![row], vec![]).is_err());
    }

    #[test]
    fn missing_coordinates_rejected() {
        let mut row = StationRecord::new("W", "Wick", "Wick", 58.4, -3.1);
        row.lon = None;
        let err = RailGraph::build(vec![row], vec![]).unwrap_err();
        assert!(matches!(err, MalformedInput::MissingField { field: "long", .. }));
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        let row = StationRecord::new("W", "Wick", "Wick", 98.4, -3.1);
        let err = RailGraph::build(vec![row], vec![]).unwrap_err();
        assert!(matches!(err, MalformedInput::InvalidCoordinates { .. }));
    }

    #[test]
    fn blank_code_rejected() {
        let row = StationRecord::new(" ", "Nowhere", "Nowhere", 0.0, 0.0);
        let err = RailGraph::build(vec![row], vec![]).unwrap_err();
        assert!(matches!(err, MalformedInput::MissingField { field: "code", .. }));

        let err = RailGraph::build(stations(), vec![EdgeRecord::new("X", "", 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            MalformedInput::MissingField {
                table: Table::Edges,
                row: 1,
                field: "target"
            }
        ));
    }

    #[test]
    fn codes_with_spaces_load() {
        let rows = vec![
            StationRecord::new("KING X", "Kings Cross", "London", 51.5308, -0.1238),
            StationRecord::new("EDB", "Edinburgh", "Edinburgh", 55.9521, -3.1890),
        ];
        let edges = vec![EdgeRecord::new(" KING X ", "EDB", 632.0)];
        let graph = RailGraph::build(rows, edges).unwrap();

        assert!(graph.contains(&code("KING X")));
        assert_eq!(graph.edge_weight(&code("KING X"), &code("EDB")), Some(632.0));
    }

    #[test]
    fn blank_name_falls_back_to_code() {
        let row = StationRecord::new("W", "", "Wick", 58.4, -3.1);
        let graph = RailGraph::build(vec![row], vec![]).unwrap();
        assert_eq!(graph.station(&code("W")).unwrap().name, "W");
    }

    #[test]
    fn coordinates_lookup() {
        let graph = RailGraph::build(stations(), vec![]).unwrap();
        let c = graph.coordinates(&code("Y")).unwrap();
        assert_eq!((c.lat(), c.lon()), (51.1, -1.1));
        assert!(graph.coordinates(&code("Q")).is_none());
    }
}
