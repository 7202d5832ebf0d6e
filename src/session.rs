//! Route session state machine.
//!
//! The session owns the waypoint store, the latest tracked position, the
//! tracking subscription and the cached route. Every event is handled to
//! completion; an effect that needs the router is parked as a single
//! [`SummaryRequest`] and answered later through
//! [`RouteSession::on_route_response`]. A newer request replaces any
//! unsent one.
//!
//! Each change to the effective point list bumps a generation counter.
//! A routing response is applied only if it was issued for the current
//! generation, so a slow answer to an old point list can never overwrite a
//! newer one.

use std::time::{Duration, SystemTime};

use tracing::{debug, info, warn};

use crate::error::{RoutingError, SessionError, TrackingError};
use crate::optimizer::optimize;
use crate::point::GeoPoint;
use crate::polyline::Polyline;
use crate::tracking::{
    CurrentPosition, SubscriptionHandle, TrackingEvent, TrackingFeed, TrackingOptions,
};
use crate::traits::{Geocoder, MapRenderer, RoutePlan, RouteSummary, RoutingService};
use crate::waypoints::{Waypoint, WaypointId, WaypointStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteState {
    /// Fewer than two effective points; no route.
    Idle,
    /// Two or more effective points; summary present or pending.
    RouteActive,
    /// Optimizer running.
    Optimizing,
}

/// A pending request for the routing service.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub generation: u64,
    pub points: Vec<GeoPoint>,
    pub requested_at: SystemTime,
}

/// What happened to a routing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    Applied,
    /// Issued for an older point list; dropped.
    Stale,
    /// Router failed; previous route kept.
    Failed,
}

#[derive(Debug, Clone)]
struct ActiveRoute {
    summary: RouteSummary,
    geometry: Polyline,
    requested_at: SystemTime,
}

/// Immutable snapshot handed to a [`MapRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub state: RouteState,
    pub current: Option<CurrentPosition>,
    pub waypoints: Vec<Waypoint>,
    pub summary: Option<RouteSummary>,
    pub eta: Option<SystemTime>,
    pub geometry: Option<Polyline>,
    pub last_error: Option<SessionError>,
}

pub struct RouteSession<F: TrackingFeed> {
    feed: F,
    options: TrackingOptions,
    subscription: Option<SubscriptionHandle>,
    waypoints: WaypointStore,
    current: Option<CurrentPosition>,
    state: RouteState,
    generation: u64,
    pending: Option<SummaryRequest>,
    route: Option<ActiveRoute>,
    last_error: Option<SessionError>,
}

impl<F: TrackingFeed> RouteSession<F> {
    pub fn new(feed: F, options: TrackingOptions) -> Self {
        Self {
            feed,
            options,
            subscription: None,
            waypoints: WaypointStore::new(),
            current: None,
            state: RouteState::Idle,
            generation: 0,
            pending: None,
            route: None,
            last_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> RouteState {
        self.state
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        self.waypoints.all()
    }

    pub fn current_position(&self) -> Option<&CurrentPosition> {
        self.current.as_ref()
    }

    pub fn summary(&self) -> Option<RouteSummary> {
        self.route.as_ref().map(|route| route.summary)
    }

    pub fn geometry(&self) -> Option<&Polyline> {
        self.route.as_ref().map(|route| &route.geometry)
    }

    /// Request time plus routed duration. Not stored; derived on read.
    pub fn eta(&self) -> Option<SystemTime> {
        let route = self.route.as_ref()?;
        let travel = Duration::try_from_secs_f64(route.summary.duration_s).ok()?;
        route.requested_at.checked_add(travel)
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Current position (when known) followed by the waypoints in order.
    pub fn effective_points(&self) -> Vec<GeoPoint> {
        self.current
            .iter()
            .map(|current| current.position)
            .chain(self.waypoints.positions())
            .collect()
    }

    /// The routing request waiting to be sent, if any.
    pub fn pending_request(&self) -> Option<&SummaryRequest> {
        self.pending.as_ref()
    }

    /// Hands the pending request to the caller, who must answer it through
    /// [`RouteSession::on_route_response`].
    pub fn take_request(&mut self) -> Option<SummaryRequest> {
        self.pending.take()
    }

    pub fn snapshot(&self) -> MapView {
        MapView {
            state: self.state,
            current: self.current,
            waypoints: self.waypoints.all().to_vec(),
            summary: self.summary(),
            eta: self.eta(),
            geometry: self.geometry().cloned(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn render(&self, renderer: &mut impl MapRenderer) {
        renderer.render(&self.snapshot());
    }

    // ------------------------------------------------------------------
    // Tracking
    // ------------------------------------------------------------------

    pub fn start_tracking(&mut self) -> Result<(), SessionError> {
        if self.subscription.is_some() {
            return Ok(());
        }

        let result = self
            .feed
            .subscribe(&self.options)
            .map_err(SessionError::from);
        match self.record(result) {
            Ok(handle) => {
                info!(handle = handle.0, "tracking started");
                self.subscription = Some(handle);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "could not start tracking");
                Err(err)
            }
        }
    }

    /// Releases the subscription and forgets the tracked position.
    ///
    /// Idempotent. Waypoints are kept; the route is re-requested from the
    /// first waypoint, or dropped when fewer than two remain.
    pub fn stop_tracking(&mut self) {
        self.release_subscription();
        if self.current.take().is_some() {
            self.refresh_state();
        }
    }

    pub fn handle_tracking_event(&mut self, event: TrackingEvent) {
        match event {
            TrackingEvent::Sample(sample) => self.on_position_update(sample),
            TrackingEvent::Error(err) => self.on_tracking_error(err),
        }
    }

    pub fn on_position_update(&mut self, sample: CurrentPosition) {
        debug!(
            lat = sample.position.latitude,
            lng = sample.position.longitude,
            accuracy_m = sample.accuracy_m,
            "position update"
        );
        self.current = Some(sample);
        self.last_error = None;

        match self.state {
            // Start point moved; waypoint order is left alone.
            RouteState::RouteActive => self.request_summary(),
            RouteState::Idle => self.refresh_state(),
            RouteState::Optimizing => {}
        }
    }

    /// Records a feed failure and drops the subscription.
    pub fn on_tracking_error(&mut self, err: TrackingError) {
        warn!(error = %err, "tracking failed");
        self.release_subscription();
        self.last_error = Some(err.into());
    }

    fn release_subscription(&mut self) {
        if let Some(handle) = self.subscription.take() {
            self.feed.unsubscribe(handle);
            info!(handle = handle.0, "tracking stopped");
        }
    }

    // ------------------------------------------------------------------
    // Waypoint edits
    // ------------------------------------------------------------------

    pub fn add_waypoint(
        &mut self,
        label: impl Into<String>,
        position: GeoPoint,
    ) -> Result<WaypointId, SessionError> {
        let result = self
            .waypoints
            .add(label, position)
            .map(|waypoint| waypoint.id)
            .map_err(SessionError::from);
        let id = self.record(result)?;
        self.refresh_state();
        Ok(id)
    }

    /// Adds a waypoint for a map click, labelled with its coordinates.
    pub fn add_waypoint_at(&mut self, position: GeoPoint) -> Result<WaypointId, SessionError> {
        let label = format!("{:.6}, {:.6}", position.latitude, position.longitude);
        self.add_waypoint(label, position)
    }

    /// Geocodes `text` and adds the hit as a waypoint labelled `text`.
    pub fn add_place(
        &mut self,
        text: &str,
        geocoder: &impl Geocoder,
    ) -> Result<WaypointId, SessionError> {
        let result = geocoder.geocode(text).map_err(SessionError::from);
        match self.record(result) {
            Ok(position) => self.add_waypoint(text, position),
            Err(err) => {
                warn!(query = text, error = %err, "geocoding failed");
                Err(err)
            }
        }
    }

    /// Replaces every waypoint with a single destination.
    pub fn set_destination(
        &mut self,
        label: impl Into<String>,
        position: GeoPoint,
    ) -> Result<WaypointId, SessionError> {
        self.waypoints.clear();
        self.add_waypoint(label, position)
    }

    /// Removes a waypoint. Unknown ids are a no-op and return `false`.
    pub fn remove_waypoint(&mut self, id: WaypointId) -> bool {
        self.last_error = None;
        let removed = self.waypoints.remove(id);
        if removed {
            self.refresh_state();
        }
        removed
    }

    pub fn swap_waypoints(&mut self, a: usize, b: usize) -> Result<(), SessionError> {
        let result = self.waypoints.swap(a, b).map_err(SessionError::from);
        self.record(result)?;
        self.refresh_state();
        Ok(())
    }

    pub fn move_up(&mut self, index: usize) -> Result<(), SessionError> {
        let result = self.waypoints.move_up(index).map_err(SessionError::from);
        self.record(result)?;
        self.refresh_state();
        Ok(())
    }

    pub fn move_down(&mut self, index: usize) -> Result<(), SessionError> {
        let result = self.waypoints.move_down(index).map_err(SessionError::from);
        self.record(result)?;
        self.refresh_state();
        Ok(())
    }

    pub fn clear_waypoints(&mut self) {
        self.last_error = None;
        self.waypoints.clear();
        self.refresh_state();
    }

    // ------------------------------------------------------------------
    // Optimization and routing
    // ------------------------------------------------------------------

    /// Reorders waypoints by nearest neighbour from the current position
    /// (or from the first waypoint when no position is known).
    pub fn request_optimize(&mut self) -> Result<(), SessionError> {
        if self.state != RouteState::RouteActive {
            return self.record(Err(SessionError::InsufficientPoints));
        }

        self.state = RouteState::Optimizing;
        let start = self.current.map(|current| current.position);
        let result = optimize(start, self.waypoints.all())
            .map(|order| order.into_iter().map(|wp| wp.id).collect::<Vec<_>>())
            .map_err(SessionError::from);

        match self.record(result) {
            Ok(ids) => {
                if self.waypoints.reorder(&ids) {
                    debug!(order = ?ids, "waypoints optimized");
                } else {
                    warn!(order = ?ids, "optimizer order rejected by store");
                }
                self.state = RouteState::RouteActive;
                self.request_summary();
                Ok(())
            }
            Err(err) => {
                self.state = RouteState::RouteActive;
                Err(err)
            }
        }
    }

    /// Applies a routing answer for `request`.
    pub fn on_route_response(
        &mut self,
        request: &SummaryRequest,
        response: Result<RoutePlan, RoutingError>,
    ) -> ResponseOutcome {
        if request.generation != self.generation || self.state == RouteState::Idle {
            warn!(
                request = request.generation,
                current = self.generation,
                "discarding stale route response"
            );
            return ResponseOutcome::Stale;
        }

        match response {
            Ok(plan) => {
                debug!(
                    distance_m = plan.summary.distance_m,
                    duration_s = plan.summary.duration_s,
                    "route summary updated"
                );
                self.route = Some(ActiveRoute {
                    summary: plan.summary,
                    geometry: plan.geometry,
                    requested_at: request.requested_at,
                });
                self.last_error = None;
                ResponseOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "routing failed");
                self.last_error = Some(err.into());
                ResponseOutcome::Failed
            }
        }
    }

    /// Sends the pending request to `router` and applies the answer.
    ///
    /// Returns `None` when nothing was pending.
    pub fn dispatch(&mut self, router: &impl RoutingService) -> Option<ResponseOutcome> {
        let request = self.take_request()?;
        let response = router.route(&request.points);
        Some(self.on_route_response(&request, response))
    }

    /// Moves between `Idle` and `RouteActive` after the point list changed.
    fn refresh_state(&mut self) {
        self.generation += 1;

        if self.effective_point_count() >= 2 {
            if self.state == RouteState::Idle {
                debug!("route active");
            }
            self.state = RouteState::RouteActive;
            self.request_summary();
        } else {
            if self.state != RouteState::Idle {
                debug!("route cleared");
            }
            self.state = RouteState::Idle;
            self.route = None;
            self.pending = None;
        }
    }

    fn request_summary(&mut self) {
        self.generation += 1;
        let request = SummaryRequest {
            generation: self.generation,
            points: self.effective_points(),
            requested_at: SystemTime::now(),
        };
        debug!(
            generation = request.generation,
            points = request.points.len(),
            "route summary requested"
        );
        if let Some(replaced) = self.pending.replace(request) {
            debug!(generation = replaced.generation, "unsent route request replaced");
        }
    }

    fn effective_point_count(&self) -> usize {
        self.waypoints.len() + usize::from(self.current.is_some())
    }

    /// Stores a failure as the last error, or clears it on success.
    fn record<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => self.last_error = Some(err.clone()),
        }
        result
    }
}

impl<F: TrackingFeed> Drop for RouteSession<F> {
    fn drop(&mut self) {
        self.release_subscription();
    }
}
