//! Test fixtures for waypoint-tracker.
//!
//! Provides:
//! - Real Bangkok landmarks
//! - Mock collaborators: tracking feed, router, geocoder, renderer

#![allow(dead_code)]

pub mod bangkok_places;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use waypoint_tracker::error::{GeocodeError, RoutingError, TrackingError};
use waypoint_tracker::point::GeoPoint;
use waypoint_tracker::polyline::Polyline;
use waypoint_tracker::session::MapView;
use waypoint_tracker::tracking::{SubscriptionHandle, TrackingFeed, TrackingOptions};
use waypoint_tracker::traits::{Geocoder, MapRenderer, RoutePlan, RouteSummary, RoutingService};

pub use bangkok_places::*;

// ============================================================================
// Tracking feed
// ============================================================================

/// What the feed saw. Shared so it survives the session being dropped.
#[derive(Debug, Default)]
pub struct FeedLog {
    pub subscribed: Vec<SubscriptionHandle>,
    pub unsubscribed: Vec<SubscriptionHandle>,
    pub last_options: Option<TrackingOptions>,
}

#[derive(Debug, Clone, Default)]
pub struct MockFeed {
    log: Rc<RefCell<FeedLog>>,
    unavailable: bool,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// A feed on a device without geolocation.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> Rc<RefCell<FeedLog>> {
        Rc::clone(&self.log)
    }
}

impl TrackingFeed for MockFeed {
    fn subscribe(
        &mut self,
        options: &TrackingOptions,
    ) -> Result<SubscriptionHandle, TrackingError> {
        if self.unavailable {
            return Err(TrackingError::Unavailable);
        }
        let mut log = self.log.borrow_mut();
        let handle = SubscriptionHandle(log.subscribed.len() as u64 + 1);
        log.subscribed.push(handle);
        log.last_options = Some(options.clone());
        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: SubscriptionHandle) {
        self.log.borrow_mut().unsubscribed.push(handle);
    }
}

// ============================================================================
// Router
// ============================================================================

/// Router returning a canned answer and recording every call.
pub struct MockRouter {
    response: Result<RouteSummary, RoutingError>,
    pub calls: RefCell<Vec<Vec<GeoPoint>>>,
}

impl MockRouter {
    pub fn returning(distance_m: f64, duration_s: f64) -> Self {
        Self {
            response: Ok(RouteSummary {
                distance_m,
                duration_s,
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(err: RoutingError) -> Self {
        Self {
            response: Err(err),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl RoutingService for MockRouter {
    fn route(&self, points: &[GeoPoint]) -> Result<RoutePlan, RoutingError> {
        self.calls.borrow_mut().push(points.to_vec());
        self.response.clone().map(|summary| RoutePlan {
            summary,
            geometry: Polyline::new(points.to_vec()),
        })
    }
}

pub fn plan(distance_m: f64, duration_s: f64) -> RoutePlan {
    RoutePlan {
        summary: RouteSummary {
            distance_m,
            duration_s,
        },
        geometry: Polyline::default(),
    }
}

// ============================================================================
// Geocoder / renderer
// ============================================================================

#[derive(Default)]
pub struct MockGeocoder {
    places: HashMap<String, GeoPoint>,
}

impl MockGeocoder {
    pub fn with_place(mut self, name: &str, point: GeoPoint) -> Self {
        self.places.insert(name.to_string(), point);
        self
    }
}

impl Geocoder for MockGeocoder {
    fn geocode(&self, text: &str) -> Result<GeoPoint, GeocodeError> {
        self.places.get(text).copied().ok_or(GeocodeError::NotFound)
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub frames: Vec<MapView>,
}

impl MapRenderer for RecordingRenderer {
    fn render(&mut self, view: &MapView) {
        self.frames.push(view.clone());
    }
}
