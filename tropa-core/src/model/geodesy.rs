//! Geodesic distances and admissible search heuristics.
//!
//! Edge weights use the Haversine great-circle distance on a sphere sized
//! for the mapped latitude band. The heuristics replace the trigonometry
//! with fixed per-radian kilometre factors, deflated so every estimate
//! stays below the true metric; A* relies on that (admissibility).

use serde::{Deserialize, Serialize};

use crate::model::network::GeoPosition;

/// Geocentric Earth radius (km) for the mapped latitude band.
pub const EARTH_RADIUS_KM: f64 = 6364.0;

/// Kilometres per radian of latitude difference in the heuristic scale.
const KM_PER_RAD_LAT: f64 = 3540.0;
/// Kilometres per radian of longitude difference in the heuristic scale.
const KM_PER_RAD_LON: f64 = 6364.0;
/// Deflation keeping every heuristic under the Haversine metric.
const ADMISSIBLE_SCALE: f64 = 0.55;

/// Haversine great-circle distance in kilometres between two positions
/// given in radians.
pub fn haversine_km(a: &GeoPosition, b: &GeoPosition) -> f64 {
    let dlat = b.lat - a.lat;
    let dlon = b.lon - a.lon;
    let h = (dlat / 2.0).sin().powi(2) + a.lat.cos() * b.lat.cos() * (dlon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Cost-to-go estimators for heuristic-guided search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    Chebyshev,
}

impl Heuristic {
    /// Estimated remaining distance in kilometres; never above
    /// [`haversine_km`] for the same pair.
    pub fn estimate(self, from: &GeoPosition, to: &GeoPosition) -> f64 {
        let dlat = (from.lat - to.lat).abs() * KM_PER_RAD_LAT;
        let dlon = (from.lon - to.lon).abs() * KM_PER_RAD_LON;
        let raw = match self {
            Heuristic::Manhattan => dlat + dlon,
            Heuristic::Euclidean => (dlat * dlat + dlon * dlon).sqrt(),
            Heuristic::Chebyshev => dlat.max(dlon),
        };
        ADMISSIBLE_SCALE * raw
    }
}
