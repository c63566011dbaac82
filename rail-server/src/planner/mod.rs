//! Route planning over a loaded rail network.
//!
//! This module answers: "what is the best way from city A to city B?",
//! where "best" is either the shortest distance or the fewest legs. The
//! [`RoutePlanner`] facade borrows an immutable [`Network`], so concurrent
//! queries share nothing mutable.

mod config;
mod engine;
mod estimate;
mod itinerary;
mod select;

pub use config::EstimateConfig;
pub use engine::{CostMode, InvalidCostMode, Reached, SearchResult, UnknownStation, shortest_paths};
pub use estimate::{TripEstimate, estimate_trip};
pub use itinerary::{Itinerary, ItineraryError, ItineraryStop, reconstruct};
pub use select::{RouteCandidate, RouteError, best_between, select_route};

use std::collections::BTreeSet;

use crate::domain::{Station, StationCode};
use crate::network::{Network, NetworkStats};

/// Query interface over a loaded network.
pub struct RoutePlanner<'a> {
    network: &'a Network,
    estimates: &'a EstimateConfig,
}

impl<'a> RoutePlanner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a Network, estimates: &'a EstimateConfig) -> Self {
        Self { network, estimates }
    }

    /// Best route between two cities, as a full itinerary.
    pub fn find_best_route(
        &self,
        origin_city: &str,
        dest_city: &str,
        mode: CostMode,
    ) -> Result<Itinerary, RouteError> {
        let candidate = select_route(self.network, origin_city, dest_city, mode)?;
        self.itinerary(&candidate, mode)
    }

    /// Best route between two specific stations.
    pub fn find_station_route(
        &self,
        from: &str,
        to: &str,
        mode: CostMode,
    ) -> Result<Itinerary, RouteError> {
        let from_code = self.known_station(from)?;
        let to_code = self.known_station(to)?;

        let candidate = best_between(
            self.network.graph(),
            &BTreeSet::from([from_code.clone()]),
            &BTreeSet::from([to_code.clone()]),
            mode,
        )?
        .ok_or_else(|| RouteError::NoRoute {
            origin: from_code.to_string(),
            destination: to_code.to_string(),
            mode,
        })?;

        self.itinerary(&candidate, mode)
    }

    /// All city names, sorted.
    pub fn list_cities(&self) -> Vec<&'a str> {
        self.network.cities().names()
    }

    /// Stations of a city, sorted by name then code.
    pub fn list_stations_for_city(&self, city: &str) -> Result<Vec<&'a Station>, RouteError> {
        let codes = self
            .network
            .cities()
            .stations_for(city)
            .ok_or_else(|| RouteError::UnknownCity(city.trim().to_string()))?;

        let mut stations: Vec<&Station> = codes
            .iter()
            .filter_map(|code| self.network.graph().station(code))
            .collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.code.cmp(&b.code)));
        Ok(stations)
    }

    /// Great-circle distance between two stations, in kilometres.
    pub fn distance_km(&self, a: &StationCode, b: &StationCode) -> Option<f64> {
        let graph = self.network.graph();
        Some(graph.coordinates(a)?.distance_km(&graph.coordinates(b)?))
    }

    /// Summary counts for the loaded network.
    pub fn statistics(&self) -> NetworkStats {
        self.network.statistics()
    }

    fn known_station(&self, raw: &str) -> Result<StationCode, RouteError> {
        StationCode::parse(raw)
            .ok()
            .filter(|code| self.network.graph().contains(code))
            .ok_or_else(|| RouteError::UnknownStation(raw.trim().to_string()))
    }

    fn itinerary(
        &self,
        candidate: &RouteCandidate,
        mode: CostMode,
    ) -> Result<Itinerary, RouteError> {
        let mut itinerary = Itinerary::from_path(
            self.network.graph(),
            &candidate.path,
            mode,
            candidate.total_cost,
        )?;
        itinerary.estimate = Some(estimate_trip(
            self.estimates,
            itinerary.total_distance_km,
            itinerary.total_stops,
        ));
        Ok(itinerary)
    }
}
