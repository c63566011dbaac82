//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::planner::{Itinerary, ItineraryStop, TripEstimate};

/// Request for the best route between two cities.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Origin city name (case-insensitive)
    pub origin: String,

    /// Destination city name (case-insensitive)
    pub destination: String,

    /// "distance" (default) or "stops"
    pub mode: Option<String>,
}

/// Request for the best route between two stations.
#[derive(Debug, Deserialize)]
pub struct StationRouteRequest {
    /// Origin station code
    pub from: String,

    /// Destination station code
    pub to: String,

    /// "distance" (default) or "stops"
    pub mode: Option<String>,
}

/// A route, origin first.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub origin_station_id: String,
    pub dest_station_id: String,

    /// The cost the route minimizes
    pub mode: String,

    pub stops: Vec<StopResult>,

    /// Total distance in kilometres, whichever mode was used
    pub total_distance_km: f64,

    /// Number of legs
    pub total_stops: usize,

    /// Fare and duration estimate
    pub estimate: Option<EstimateResult>,
}

/// One stop on a route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub station_id: String,
    pub station_name: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,

    /// Kilometres from the origin on arrival
    pub cumulative_distance_km: f64,

    /// Length of the next leg; absent at the destination
    pub distance_to_next_km: Option<f64>,
}

/// Estimated fare and travel time.
#[derive(Debug, Serialize)]
pub struct EstimateResult {
    pub fare_gbp: f64,
    pub duration_mins: i64,
}

/// All known cities.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

/// A station in a listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub code: String,
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

/// Stations of one city.
#[derive(Debug, Serialize)]
pub struct CityStationsResponse {
    pub city: String,
    pub stations: Vec<StationResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ItineraryResult {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            origin_station_id: itinerary.origin_station_id.to_string(),
            dest_station_id: itinerary.dest_station_id.to_string(),
            mode: itinerary.mode.to_string(),
            stops: itinerary.stops.iter().map(StopResult::from_stop).collect(),
            total_distance_km: itinerary.total_distance_km,
            total_stops: itinerary.total_stops,
            estimate: itinerary.estimate.as_ref().map(EstimateResult::from_estimate),
        }
    }
}

impl StopResult {
    pub fn from_stop(stop: &ItineraryStop) -> Self {
        Self {
            station_id: stop.station_id.to_string(),
            station_name: stop.station_name.clone(),
            city: stop.city.clone(),
            lat: stop.location.lat(),
            lon: stop.location.lon(),
            cumulative_distance_km: stop.cumulative_distance_km,
            distance_to_next_km: stop.distance_to_next_km,
        }
    }
}

impl EstimateResult {
    pub fn from_estimate(estimate: &TripEstimate) -> Self {
        Self {
            fare_gbp: estimate.fare_gbp,
            duration_mins: estimate.duration.num_minutes(),
        }
    }
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            code: station.code.to_string(),
            name: station.name.clone(),
            city: station.city.clone(),
            lat: station.location.lat(),
            lon: station.location.lon(),
        }
    }
}
