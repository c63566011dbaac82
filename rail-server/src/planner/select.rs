//! City-to-city best route selection.
//!
//! A city may have several stations. The selector runs one full search per
//! origin-city station and compares every reachable destination-city
//! station, so the winner is the best pair overall rather than the best
//! route between two arbitrarily chosen stations.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::StationCode;
use crate::network::{Network, RailGraph};

use super::engine::{CostMode, UnknownStation, shortest_paths};
use super::itinerary::{ItineraryError, reconstruct};

/// Error from route queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// City name not in the index
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// Station code not in the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// Both ends exist but nothing connects them
    #[error("no route from {origin} to {destination} (by {mode})")]
    NoRoute {
        origin: String,
        destination: String,
        mode: CostMode,
    },

    /// Internal path reconstruction failure
    #[error(transparent)]
    Itinerary(#[from] ItineraryError),
}

impl From<UnknownStation> for RouteError {
    fn from(e: UnknownStation) -> Self {
        RouteError::UnknownStation(e.0.to_string())
    }
}

/// The best path found between one origin and one destination station.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    pub origin: StationCode,
    pub destination: StationCode,
    pub total_cost: f64,
    /// Station codes, origin first.
    pub path: Vec<StationCode>,
}

impl RouteCandidate {
    /// Total order used to pick the winner: lower cost first, then the
    /// lexicographically smaller (origin, destination) pair.
    fn rank(&self, other: &RouteCandidate) -> Ordering {
        self.total_cost
            .total_cmp(&other.total_cost)
            .then_with(|| self.origin.cmp(&other.origin))
            .then_with(|| self.destination.cmp(&other.destination))
    }
}

fn better(a: Option<RouteCandidate>, b: Option<RouteCandidate>) -> Option<RouteCandidate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.rank(&a) == Ordering::Less { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// Select the best route between two cities.
///
/// City names match case-insensitively. Fails with
/// [`RouteError::UnknownCity`] if either city is unknown and with
/// [`RouteError::NoRoute`] if no origin station reaches any destination
/// station.
pub fn select_route(
    network: &Network,
    origin_city: &str,
    dest_city: &str,
    mode: CostMode,
) -> Result<RouteCandidate, RouteError> {
    let cities = network.cities();
    let origins = cities
        .stations_for(origin_city)
        .ok_or_else(|| RouteError::UnknownCity(origin_city.trim().to_string()))?;
    let destinations = cities
        .stations_for(dest_city)
        .ok_or_else(|| RouteError::UnknownCity(dest_city.trim().to_string()))?;

    let best = best_between(network.graph(), origins, destinations, mode)?;

    match best {
        Some(candidate) => {
            debug!(
                origin_city,
                dest_city,
                mode = %mode,
                origin = %candidate.origin,
                destination = %candidate.destination,
                cost = candidate.total_cost,
                "Selected city route"
            );
            Ok(candidate)
        }
        None => Err(RouteError::NoRoute {
            origin: origin_city.trim().to_string(),
            destination: dest_city.trim().to_string(),
            mode,
        }),
    }
}

/// Best candidate over all (origin × destination) station pairs, or `None`
/// when no pair is connected.
#[cfg(not(feature = "parallel"))]
pub fn best_between(
    graph: &RailGraph,
    origins: &BTreeSet<StationCode>,
    destinations: &BTreeSet<StationCode>,
    mode: CostMode,
) -> Result<Option<RouteCandidate>, RouteError> {
    let mut best = None;
    for origin in origins {
        best = better(best, best_from(graph, origin, destinations, mode)?);
    }
    Ok(best)
}

/// Best candidate over all (origin × destination) station pairs, or `None`
/// when no pair is connected. Origins are searched on the rayon pool; the
/// reduction uses the same total order as the sequential version.
#[cfg(feature = "parallel")]
pub fn best_between(
    graph: &RailGraph,
    origins: &BTreeSet<StationCode>,
    destinations: &BTreeSet<StationCode>,
    mode: CostMode,
) -> Result<Option<RouteCandidate>, RouteError> {
    use rayon::prelude::*;

    let per_origin: Vec<Option<RouteCandidate>> = origins
        .par_iter()
        .map(|origin| best_from(graph, origin, destinations, mode))
        .collect::<Result<_, _>>()?;
    Ok(per_origin.into_iter().fold(None, better))
}

/// Best candidate from one origin station: a single search, then a scan of
/// the destination stations it reached.
fn best_from(
    graph: &RailGraph,
    origin: &StationCode,
    destinations: &BTreeSet<StationCode>,
    mode: CostMode,
) -> Result<Option<RouteCandidate>, RouteError> {
    let result = shortest_paths(graph, origin, mode)?;

    let mut best: Option<(&StationCode, f64)> = None;
    for destination in destinations {
        let Some(cost) = result.cost(destination) else {
            continue;
        };
        // Destinations are visited in order, so strict < keeps the
        // smallest code among equal costs.
        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((destination, cost));
        }
    }

    let Some((destination, total_cost)) = best else {
        return Ok(None);
    };

    Ok(Some(RouteCandidate {
        origin: origin.clone(),
        destination: destination.clone(),
        total_cost,
        path: reconstruct(&result, destination)?,
    }))
}
