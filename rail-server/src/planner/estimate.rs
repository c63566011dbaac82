//! Fare and travel-time estimates.

use chrono::Duration;

use super::config::EstimateConfig;

/// Estimated cost and duration of a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripEstimate {
    /// Fare in pounds, rounded to pennies.
    pub fare_gbp: f64,
    pub duration: Duration,
}

/// Estimate a trip of `distance_km` kilometres over `legs` legs.
pub fn estimate_trip(config: &EstimateConfig, distance_km: f64, legs: usize) -> TripEstimate {
    let fare = config.base_fare_gbp + distance_km * config.rate_per_km_gbp;
    let fare_gbp = (fare * 100.0).round() / 100.0;

    let running_secs = if config.avg_speed_kmh > 0.0 {
        (distance_km / config.avg_speed_kmh * 3600.0).round() as i64
    } else {
        0
    };
    let dwell = config.dwell() * i32::try_from(legs).unwrap_or(i32::MAX);

    TripEstimate {
        fare_gbp,
        duration: Duration::seconds(running_secs) + dwell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fare_is_base_plus_rate() {
        let estimate = estimate_trip(&EstimateConfig::default(), 100.0, 1);
        assert_eq!(estimate.fare_gbp, 20.0);
    }

    #[test]
    fn fare_rounds_to_pennies() {
        let estimate = estimate_trip(&EstimateConfig::default(), 12.345, 1);
        // 5 + 1.85175
        assert_eq!(estimate.fare_gbp, 6.85);
    }

    #[test]
    fn duration_adds_dwell_per_leg() {
        // 80 km at 80 km/h = 1h, plus 3 legs * 3 min
        let estimate = estimate_trip(&EstimateConfig::default(), 80.0, 3);
        assert_eq!(estimate.duration, Duration::minutes(69));
    }

    #[test]
    fn zero_trip() {
        let estimate = estimate_trip(&EstimateConfig::default(), 0.0, 0);
        assert_eq!(estimate.fare_gbp, 5.0);
        assert_eq!(estimate.duration, Duration::zero());
    }

    #[test]
    fn zero_speed_means_dwell_only() {
        let config = EstimateConfig::new(5.0, 0.15, 0.0, 3);
        let estimate = estimate_trip(&config, 50.0, 2);
        assert_eq!(estimate.duration, Duration::minutes(6));
    }
}
