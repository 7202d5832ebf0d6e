//! Collaborator seams for the tracker.
//!
//! The core talks to routers, geocoders and map renderers only through these
//! traits. Concrete adapters live in [`crate::osrm`], [`crate::nominatim`]
//! and [`crate::haversine`].

use serde::{Deserialize, Serialize};

use crate::error::{GeocodeError, RoutingError};
use crate::point::GeoPoint;
use crate::polyline::Polyline;
use crate::session::MapView;

/// Anything with a position on the map.
pub trait Located {
    fn position(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn position(&self) -> GeoPoint {
        *self
    }
}

/// Travel totals for an ordered point list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total distance in meters.
    pub distance_m: f64,
    /// Total duration in seconds.
    pub duration_s: f64,
}

/// A routed path: totals plus the geometry to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub summary: RouteSummary,
    pub geometry: Polyline,
}

/// Computes a route through points visited in the given order.
pub trait RoutingService {
    fn route(&self, points: &[GeoPoint]) -> Result<RoutePlan, RoutingError>;
}

/// Resolves free text into a coordinate.
pub trait Geocoder {
    fn geocode(&self, text: &str) -> Result<GeoPoint, GeocodeError>;
}

/// Draws a session snapshot.
///
/// Renderers own their own diffing; they receive immutable views and never
/// hold references into the session.
pub trait MapRenderer {
    fn render(&mut self, view: &MapView);
}

impl<T: RoutingService + ?Sized> RoutingService for &T {
    fn route(&self, points: &[GeoPoint]) -> Result<RoutePlan, RoutingError> {
        (**self).route(points)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn geocode(&self, text: &str) -> Result<GeoPoint, GeocodeError> {
        (**self).geocode(text)
    }
}
