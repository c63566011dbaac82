//! Path reconstruction and itinerary assembly.

use crate::domain::{Coordinates, StationCode};
use crate::network::RailGraph;

use super::engine::{CostMode, SearchResult};
use super::estimate::TripEstimate;

/// Errors from turning a search result into an itinerary.
///
/// These indicate a caller bug (asking for a path that the search did not
/// produce), not a user-facing condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItineraryError {
    /// The station is absent from the search result
    #[error("station {0} is not reachable in this search result")]
    Unreachable(StationCode),

    /// A path station is not in the graph
    #[error("station {0} is not in the network")]
    UnknownStation(StationCode),

    /// Consecutive path stations have no direct edge
    #[error("no direct connection from {from} to {to}")]
    MissingLeg { from: StationCode, to: StationCode },

    /// A path must contain at least one station
    #[error("path is empty")]
    EmptyPath,
}

/// Walk predecessor links from `destination` back to the search source and
/// return the path origin-first.
pub fn reconstruct(
    result: &SearchResult,
    destination: &StationCode,
) -> Result<Vec<StationCode>, ItineraryError> {
    let mut path = Vec::new();
    let mut current = Some(destination.clone());

    while let Some(station) = current {
        let reached = result
            .get(&station)
            .ok_or_else(|| ItineraryError::Unreachable(station.clone()))?;
        current = reached.predecessor.clone();
        path.push(station);
    }

    path.reverse();
    Ok(path)
}

/// One stop of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryStop {
    pub station_id: StationCode,
    pub station_name: String,
    pub city: String,
    pub location: Coordinates,
    /// Kilometres travelled from the origin when arriving here.
    pub cumulative_distance_km: f64,
    /// Length of the next leg; `None` at the destination.
    pub distance_to_next_km: Option<f64>,
}

/// A complete route, origin first.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub origin_station_id: StationCode,
    pub dest_station_id: StationCode,
    pub mode: CostMode,
    pub stops: Vec<ItineraryStop>,
    pub total_distance_km: f64,
    /// Number of legs travelled.
    pub total_stops: usize,
    /// The minimized cost: equals `total_distance_km` in distance mode and
    /// `total_stops` in stops mode.
    pub total_cost: f64,
    pub estimate: Option<TripEstimate>,
}

impl Itinerary {
    /// Assemble an itinerary along `path`, using the weight of each edge
    /// actually stored in the graph for the leg distances.
    pub fn from_path(
        graph: &RailGraph,
        path: &[StationCode],
        mode: CostMode,
        total_cost: f64,
    ) -> Result<Self, ItineraryError> {
        let (Some(origin), Some(destination)) = (path.first(), path.last()) else {
            return Err(ItineraryError::EmptyPath);
        };

        let mut stops = Vec::with_capacity(path.len());
        let mut cumulative = 0.0;

        for (idx, code) in path.iter().enumerate() {
            let station = graph
                .station(code)
                .ok_or_else(|| ItineraryError::UnknownStation(code.clone()))?;

            let distance_to_next = match path.get(idx + 1) {
                Some(next) => Some(graph.edge_weight(code, next).ok_or_else(|| {
                    ItineraryError::MissingLeg {
                        from: code.clone(),
                        to: next.clone(),
                    }
                })?),
                None => None,
            };

            stops.push(ItineraryStop {
                station_id: code.clone(),
                station_name: station.name.clone(),
                city: station.city.clone(),
                location: station.location,
                cumulative_distance_km: cumulative,
                distance_to_next_km: distance_to_next,
            });

            // Same summation order as the search, so totals match exactly
            if let Some(leg) = distance_to_next {
                cumulative += leg;
            }
        }

        Ok(Self {
            origin_station_id: origin.clone(),
            dest_station_id: destination.clone(),
            mode,
            stops,
            total_distance_km: cumulative,
            total_stops: path.len() - 1,
            total_cost,
            estimate: None,
        })
    }

    /// Station codes in travel order.
    pub fn station_ids(&self) -> Vec<&StationCode> {
        self.stops.iter().map(|s| &s.station_id).collect()
    }
}
