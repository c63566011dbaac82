//! The rail network dataset: stations, directed edges and the city index.
//!
//! A [`Network`] is built once per dataset load and never mutated
//! afterwards. Queries borrow it; the web layer shares it behind an `Arc`.

mod city_index;
mod error;
mod graph;
mod load;
mod records;

use std::path::Path;

use serde::Serialize;
use tracing::info;

pub use city_index::{City, CityIndex};
pub use error::{LoadError, MalformedInput, Table};
pub use graph::{Edge, RailGraph};
pub use load::{parse_edges, parse_stations, read_edges, read_stations};
pub use records::{EdgeRecord, StationRecord};

/// A loaded, validated rail network.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    graph: RailGraph,
    cities: CityIndex,
}

/// Summary counts for a network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub total_stations: usize,
    pub total_connections: usize,
    pub total_cities: usize,
    /// Mean out-degree, rounded to 2 decimal places.
    pub avg_connections_per_station: f64,
}

impl Network {
    /// Build the graph and the city index from raw records.
    pub fn build<S, E>(stations: S, edges: E) -> Result<Self, MalformedInput>
    where
        S: IntoIterator<Item = StationRecord>,
        E: IntoIterator<Item = EdgeRecord>,
    {
        let graph = RailGraph::build(stations, edges)?;
        let cities = CityIndex::build(&graph);
        Ok(Self { graph, cities })
    }

    /// Read both CSV tables from disk and build the network.
    pub fn load(stations_path: &Path, edges_path: &Path) -> Result<Self, LoadError> {
        let stations = read_stations(stations_path)?;
        let edges = read_edges(edges_path)?;
        let network = Self::build(stations, edges)?;

        info!(
            stations = network.graph.station_count(),
            edges = network.graph.edge_count(),
            cities = network.cities.len(),
            "Loaded rail network"
        );

        Ok(network)
    }

    pub fn graph(&self) -> &RailGraph {
        &self.graph
    }

    pub fn cities(&self) -> &CityIndex {
        &self.cities
    }

    /// Station, connection and city counts.
    pub fn statistics(&self) -> NetworkStats {
        let stations = self.graph.station_count();
        let connections = self.graph.edge_count();
        let avg = if stations == 0 {
            0.0
        } else {
            (connections as f64 / stations as f64 * 100.0).round() / 100.0
        };

        NetworkStats {
            total_stations: stations,
            total_connections: connections,
            total_cities: self.cities.len(),
            avg_connections_per_station: avg,
        }
    }
}
