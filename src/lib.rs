//! waypoint-tracker core
//!
//! Live position tracking plus multi-waypoint route planning: a bounded
//! waypoint store, a nearest-neighbour visiting-order optimizer, and a
//! route session that keeps distance/duration/ETA in step with the tracked
//! position. Routers, geocoders, location feeds and map renderers plug in
//! through the traits in [`traits`] and [`tracking`].

pub mod error;
pub mod format;
pub mod haversine;
pub mod nominatim;
pub mod optimizer;
pub mod osrm;
pub mod point;
pub mod polyline;
pub mod session;
pub mod tracking;
pub mod traits;
pub mod waypoints;
