//! Geographic point value type.

use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
///
/// Equality is exact coordinate equality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a point from a `(lat, lng)` tuple.
    pub const fn from_lat_lng((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }

    /// Returns the point as a `(lat, lng)` tuple.
    pub const fn lat_lng(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// True when both coordinates are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from(lat_lng: (f64, f64)) -> Self {
        Self::from_lat_lng(lat_lng)
    }
}
