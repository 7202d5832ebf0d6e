//! OSRM HTTP adapter for routed summaries.

use serde::Deserialize;
use tracing::debug;

use crate::error::RoutingError;
use crate::point::GeoPoint;
use crate::polyline::Polyline;
use crate::traits::{RoutePlan, RouteSummary, RoutingService};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Route API URL for `points`, visited in order.
    fn route_url(&self, points: &[GeoPoint]) -> String {
        let coords = points
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.longitude, point.latitude))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=polyline",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl RoutingService for OsrmClient {
    fn route(&self, points: &[GeoPoint]) -> Result<RoutePlan, RoutingError> {
        if points.len() < 2 {
            return Err(RoutingError::RouteNotFound);
        }

        let url = self.route_url(points);
        debug!(%url, "requesting OSRM route");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| RoutingError::Network(err.to_string()))?;

        // OSRM answers NoRoute/InvalidQuery with 400 plus a JSON body, so
        // the body is parsed before looking at the status.
        let status = response.status();
        let body = response
            .json::<OsrmRouteResponse>()
            .map_err(|err| RoutingError::InvalidResponse(format!("HTTP {}: {}", status, err)))?;

        plan_from_response(body)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: Option<String>,
}

/// Takes the first (best) route of an OSRM answer.
fn plan_from_response(body: OsrmRouteResponse) -> Result<RoutePlan, RoutingError> {
    match body.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Err(RoutingError::RouteNotFound),
        other => {
            return Err(RoutingError::InvalidResponse(
                body.message.unwrap_or_else(|| other.to_string()),
            ));
        }
    }

    let route = body
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::RouteNotFound)?;

    let geometry = match route.geometry.as_deref() {
        Some(encoded) => Polyline::decode(encoded).ok_or_else(|| {
            RoutingError::InvalidResponse("malformed route geometry".to_string())
        })?,
        None => Polyline::default(),
    };

    Ok(RoutePlan {
        summary: RouteSummary {
            distance_m: route.distance,
            duration_s: route.duration,
        },
        geometry,
    })
}
