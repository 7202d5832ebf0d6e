//! Great-circle distance and a straight-line routing fallback.
//!
//! `HaversineRouter` estimates a route by summing great-circle legs and
//! assuming a constant speed. Less accurate than OSRM (ignores roads) but
//! always available.

use crate::error::RoutingError;
use crate::point::GeoPoint;
use crate::polyline::Polyline;
use crate::traits::{RoutePlan, RouteSummary, RoutingService};

/// Average travel speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Inputs are not validated; NaN in, NaN out.
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lng = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Straight-line routing service.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct HaversineRouter {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in km to travel time in seconds.
    fn km_to_seconds(&self, km: f64) -> f64 {
        km / self.speed_kmh * 3600.0
    }
}

impl RoutingService for HaversineRouter {
    fn route(&self, points: &[GeoPoint]) -> Result<RoutePlan, RoutingError> {
        if points.len() < 2 || self.speed_kmh <= 0.0 {
            return Err(RoutingError::RouteNotFound);
        }

        let km: f64 = points
            .windows(2)
            .map(|leg| distance_km(leg[0], leg[1]))
            .sum();

        Ok(RoutePlan {
            summary: RouteSummary {
                distance_m: km * 1000.0,
                duration_s: self.km_to_seconds(km),
            },
            geometry: Polyline::new(points.to_vec()),
        })
    }
}
