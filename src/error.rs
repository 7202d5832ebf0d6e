//! Error types shared across the tracker.

use thiserror::Error;

/// Failures from a [`crate::traits::RoutingService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The router found no path through the requested points.
    #[error("no route found")]
    RouteNotFound,
    /// Transport failure talking to the router.
    #[error("network error: {0}")]
    Network(String),
    /// The router answered with something we could not interpret.
    #[error("invalid routing response: {0}")]
    InvalidResponse(String),
}

/// Failures from a [`crate::traits::Geocoder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("place not found")]
    NotFound,
    #[error("network error: {0}")]
    Network(String),
}

/// Failures from a [`crate::tracking::TrackingFeed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// The device has no geolocation support.
    #[error("geolocation is not supported")]
    Unavailable,
    #[error("tracking failed: {0}")]
    Failed(String),
}

/// Failures from [`crate::waypoints::WaypointStore`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("waypoint capacity of {capacity} reached")]
    CapacityExceeded { capacity: usize },
    #[error("index {index} out of range for {len} waypoints")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures from [`crate::optimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    #[error("at least two points are required, got {available}")]
    InsufficientPoints { available: usize },
}

/// Session-level error, recorded as the session's last error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("geolocation is not supported")]
    GeolocationUnavailable,
    #[error("tracking failed: {0}")]
    TrackingFailed(String),
    #[error("destination not found")]
    GeocodeNotFound,
    #[error("routing failed: {0}")]
    RoutingFailed(String),
    #[error("waypoint capacity reached")]
    CapacityExceeded,
    #[error("waypoint index out of range")]
    IndexOutOfRange,
    #[error("at least two points are required")]
    InsufficientPoints,
}

impl From<RoutingError> for SessionError {
    fn from(err: RoutingError) -> Self {
        SessionError::RoutingFailed(err.to_string())
    }
}

impl From<GeocodeError> for SessionError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound => SessionError::GeocodeNotFound,
            // The original widget reports any lookup failure the same way.
            GeocodeError::Network(_) => SessionError::GeocodeNotFound,
        }
    }
}

impl From<TrackingError> for SessionError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::Unavailable => SessionError::GeolocationUnavailable,
            TrackingError::Failed(reason) => SessionError::TrackingFailed(reason),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CapacityExceeded { .. } => SessionError::CapacityExceeded,
            StoreError::IndexOutOfRange { .. } => SessionError::IndexOutOfRange,
        }
    }
}

impl From<OptimizeError> for SessionError {
    fn from(err: OptimizeError) -> Self {
        match err {
            OptimizeError::InsufficientPoints { .. } => SessionError::InsufficientPoints,
        }
    }
}
