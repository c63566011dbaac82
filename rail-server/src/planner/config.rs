//! Trip estimate configuration.

use chrono::Duration;

/// Parameters of the fare and travel-time estimate.
///
/// Fares follow average UK rail pricing: a flat base plus a per-kilometre
/// rate. Travel time assumes a constant average speed plus a fixed dwell at
/// every station after the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateConfig {
    /// Flat fare component (GBP).
    pub base_fare_gbp: f64,

    /// Fare per kilometre (GBP).
    pub rate_per_km_gbp: f64,

    /// Average train speed (km/h).
    pub avg_speed_kmh: f64,

    /// Dwell time per stop (minutes).
    pub dwell_mins: i64,
}

impl EstimateConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        base_fare_gbp: f64,
        rate_per_km_gbp: f64,
        avg_speed_kmh: f64,
        dwell_mins: i64,
    ) -> Self {
        Self {
            base_fare_gbp,
            rate_per_km_gbp,
            avg_speed_kmh,
            dwell_mins,
        }
    }

    /// Returns the dwell time as a Duration.
    pub fn dwell(&self) -> Duration {
        Duration::minutes(self.dwell_mins)
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            base_fare_gbp: 5.0,
            rate_per_km_gbp: 0.15,
            avg_speed_kmh: 80.0,
            dwell_mins: 3,
        }
    }
}
