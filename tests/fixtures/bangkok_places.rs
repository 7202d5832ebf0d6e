//! Central Bangkok landmarks for realistic waypoint fixtures.
//!
//! Coordinates are approximate OpenStreetMap positions.

use waypoint_tracker::point::GeoPoint;

/// A named place with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

// ============================================================================
// Old Town (Rattanakosin)
// ============================================================================

pub const OLD_TOWN: &[Place] = &[
    Place::new("Grand Palace", 13.7500, 100.4913),
    Place::new("Wat Pho", 13.7465, 100.4930),
    Place::new("Wat Arun", 13.7437, 100.4889),
    Place::new("Khao San Road", 13.7589, 100.4974),
    Place::new("Democracy Monument", 13.7567, 100.5018),
    Place::new("Yaowarat", 13.7410, 100.5090),
];

// ============================================================================
// Downtown
// ============================================================================

pub const DOWNTOWN: &[Place] = &[
    Place::new("MBK Center", 13.7447, 100.5300),
    Place::new("Siam Paragon", 13.7462, 100.5347),
    Place::new("Victory Monument", 13.7650, 100.5383),
    Place::new("Lumphini Park", 13.7308, 100.5418),
    Place::new("Benjakitti Park", 13.7290, 100.5590),
    Place::new("Chatuchak Market", 13.7999, 100.5505),
];

/// Old Town followed by Downtown.
pub fn all_places() -> Vec<Place> {
    OLD_TOWN.iter().chain(DOWNTOWN).cloned().collect()
}

/// Interleaves the two districts so insertion order zig-zags across town.
pub fn zig_zag_places(count: usize) -> Vec<Place> {
    OLD_TOWN
        .iter()
        .zip(DOWNTOWN)
        .flat_map(|(old, down)| [old.clone(), down.clone()])
        .take(count)
        .collect()
}
