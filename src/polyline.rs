//! Polyline representation for route geometries.
//!
//! Routes are kept as decoded coordinate sequences. Decoding of the compact
//! encoded-polyline format happens at the boundary, when a router response
//! is parsed.

use serde::{Deserialize, Serialize};

use crate::point::GeoPoint;

/// Coordinate scale for precision-5 encoded polylines (OSRM default).
const PRECISION_5: f64 = 1e5;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Decodes a precision-5 encoded polyline string.
    ///
    /// Returns `None` when the input is truncated or contains bytes outside
    /// the encoding alphabet.
    pub fn decode(encoded: &str) -> Option<Self> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat += next_delta(bytes, &mut index)?;
            lng += next_delta(bytes, &mut index)?;
            points.push(GeoPoint::new(
                lat as f64 / PRECISION_5,
                lng as f64 / PRECISION_5,
            ));
        }

        Some(Self { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reads one zigzag-encoded varint starting at `index`.
fn next_delta(bytes: &[u8], index: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index)?;
        if !(63..=126).contains(&byte) || shift > 30 {
            return None;
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Some(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
