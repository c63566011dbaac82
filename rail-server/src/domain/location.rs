//! Geographic coordinates.

use serde::Serialize;

use crate::geo;

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinates ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinates {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite. Construction is the only way in, so the ranges always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        let reject = |reason: &'static str| -> Result<Self, InvalidCoordinates> {
            Err(InvalidCoordinates { lat, lon, reason })
        };

        if !lat.is_finite() || !lon.is_finite() {
            return reject("must be finite");
        }
        if !(-90.0..=90.0).contains(&lat) {
            return reject("latitude must be within [-90, 90]");
        }
        if !(-180.0..=180.0).contains(&lon) {
            return reject("longitude must be within [-180, 180]");
        }

        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to another point, in kilometres.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        geo::haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}
