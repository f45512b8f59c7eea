use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamProvider, get_json};
use crate::config::ProviderConfig;
use crate::models::location::Location;
use crate::models::trail::Trail;

pub const HIKING_PROJECT_API: &str = "https://www.hikingproject.com/data";

#[derive(Debug, Deserialize)]
struct TrailsResponse {
    #[serde(default)]
    trails: Vec<HikingTrail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HikingTrail {
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub length: f64,
    /// `"YYYY-MM-DD HH:MM:SS"`, or a placeholder date when never reported.
    pub condition_date: Option<String>,
    pub condition_details: Option<String>,
    #[serde(default)]
    pub stars: f64,
    #[serde(default)]
    pub star_votes: i64,
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone)]
pub struct HikingProjectClient {
    client: Client,
    config: ProviderConfig,
}

impl HikingProjectClient {
    #[must_use]
    pub const fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl UpstreamProvider<Trail> for HikingProjectClient {
    fn service(&self) -> &'static str {
        "Hiking Project"
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<HikingTrail>> {
        let url = format!("{}/get-trails", self.config.base_url);

        let request = self.client.get(&url).query(&[
            ("lat", location.latitude.to_string()),
            ("lon", location.longitude.to_string()),
            ("key", self.config.api_key.clone()),
        ]);

        let response: TrailsResponse = get_json("Hiking Project", request).await?;
        Ok(response.trails)
    }
}
