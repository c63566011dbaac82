//! Great-circle distance.

/// Mean Earth radius in kilometres (spherical approximation).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points given in decimal degrees, in km.
///
/// Total for any latitude in [-90, 90] and any longitude; identical points
/// give exactly 0.
///
/// ```
/// use rail_server::geo::haversine_km;
///
/// assert_eq!(haversine_km(53.48, -2.23, 53.48, -2.23), 0.0);
/// let london_edinburgh = haversine_km(51.5308, -0.1238, 55.9521, -3.1890);
/// assert!((london_edinburgh - 532.0).abs() < 5.0);
/// ```
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}
