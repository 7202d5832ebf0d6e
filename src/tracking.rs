//! Geolocation feed adapter seam.
//!
//! A `TrackingFeed` wraps the device's location source. Subscribing yields a
//! handle that must be released with `unsubscribe`; samples and failures are
//! delivered to the session as [`TrackingEvent`]s by whoever drives the feed.

use std::time::{Duration, SystemTime};

use serde::Deserialize;

use crate::error::TrackingError;
use crate::point::GeoPoint;

/// Watch options passed to the feed on subscribe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingOptions {
    /// Ask the device for its most accurate fix (GPS over network).
    pub high_accuracy: bool,
    /// Oldest cached fix the feed may hand out.
    pub maximum_age_secs: u64,
    /// How long to wait for a fix before reporting a failure.
    pub timeout_secs: u64,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age_secs: 10,
            timeout_secs: 10,
        }
    }
}

impl TrackingOptions {
    pub fn maximum_age(&self) -> Duration {
        Duration::from_secs(self.maximum_age_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Latest observed device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentPosition {
    pub position: GeoPoint,
    /// Radius of the 95% confidence circle, in meters.
    pub accuracy_m: f64,
    pub observed_at: SystemTime,
}

impl CurrentPosition {
    pub fn new(position: GeoPoint, accuracy_m: f64, observed_at: SystemTime) -> Self {
        Self {
            position,
            accuracy_m: accuracy_m.max(0.0),
            observed_at,
        }
    }

    /// A sample observed right now.
    pub fn now(position: GeoPoint, accuracy_m: f64) -> Self {
        Self::new(position, accuracy_m, SystemTime::now())
    }
}

/// Registration token returned by [`TrackingFeed::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// One delivery from the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingEvent {
    Sample(CurrentPosition),
    Error(TrackingError),
}

pub trait TrackingFeed {
    /// Starts watching the device position.
    ///
    /// Returns [`TrackingError::Unavailable`] when the device has no
    /// geolocation support.
    fn subscribe(&mut self, options: &TrackingOptions) -> Result<SubscriptionHandle, TrackingError>;

    /// Stops a watch. Unknown or already-released handles are ignored.
    fn unsubscribe(&mut self, handle: SubscriptionHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_match_watch_defaults() {
        let options = TrackingOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.maximum_age(), Duration::from_secs(10));
        assert_eq!(options.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_negative_accuracy_clamped() {
        let sample = CurrentPosition::now(GeoPoint::new(0.0, 0.0), -3.0);
        assert_eq!(sample.accuracy_m, 0.0);
    }
}
