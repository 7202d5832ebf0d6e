//! Nominatim HTTP adapter for place-name lookup.

use serde::Deserialize;
use tracing::debug;

use crate::error::GeocodeError;
use crate::point::GeoPoint;
use crate::traits::Geocoder;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("waypoint-tracker/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, text: &str) -> Result<GeoPoint, GeocodeError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(GeocodeError::NotFound);
        }

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        debug!(%url, query, "geocoding");

        let places = self
            .client
            .get(url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>())
            .map_err(|err| GeocodeError::Network(err.to_string()))?;

        first_hit(places)
    }
}

/// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn first_hit(places: Vec<NominatimPlace>) -> Result<GeoPoint, GeocodeError> {
    let place = places.into_iter().next().ok_or(GeocodeError::NotFound)?;
    let latitude = place.lat.parse::<f64>();
    let longitude = place.lon.parse::<f64>();

    match (latitude, longitude) {
        (Ok(latitude), Ok(longitude)) => {
            let point = GeoPoint::new(latitude, longitude);
            if point.is_valid() {
                Ok(point)
            } else {
                Err(GeocodeError::NotFound)
            }
        }
        _ => Err(GeocodeError::NotFound),
    }
}
