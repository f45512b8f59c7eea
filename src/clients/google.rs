use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Geocoder, get_json};
use crate::config::ProviderConfig;

pub const GOOGLE_GEOCODE_API: &str = "https://maps.googleapis.com/maps/api";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    status: String,
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone)]
pub struct GoogleGeocodeClient {
    client: Client,
    config: ProviderConfig,
}

impl GoogleGeocodeClient {
    #[must_use]
    pub const fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocodeClient {
    fn service(&self) -> &'static str {
        "Google Geocoding"
    }

    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>> {
        let url = format!("{}/geocode/json", self.config.base_url);

        debug!("Geocoding query: {}", query);

        let request = self
            .client
            .get(&url)
            .query(&[("address", query), ("key", self.config.api_key.as_str())]);
        let response: GeocodeResponse = get_json("Google Geocoding", request).await?;

        // The API answers 200 even when it refuses the request.
        match response.status.as_str() {
            "" | "OK" | "ZERO_RESULTS" => Ok(response.results),
            status => Err(anyhow::anyhow!(
                "Google Geocoding API error: {} - {}",
                status,
                response.error_message.unwrap_or_default()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_geocode_payload() {
        let body = r#"{
            "results": [{
                "formatted_address": "Seattle, WA, USA",
                "geometry": { "location": { "lat": 47.6062095, "lng": -122.3320708 } }
            }],
            "status": "OK"
        }"#;

        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.status, "OK");
        assert_eq!(response.results[0].formatted_address, "Seattle, WA, USA");
        assert!((response.results[0].geometry.location.lng + 122.332_070_8).abs() < 1e-9);
    }

    #[test]
    fn zero_results_has_no_entries() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"results": [], "status": "ZERO_RESULTS"}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
