use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamProvider, get_json};
use crate::config::ProviderConfig;
use crate::models::food::Food;
use crate::models::location::Location;

pub const YELP_API: &str = "https://api.yelp.com/v3";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Business {
    pub name: String,
    #[serde(default)]
    pub url: String,
    pub rating: Option<f64>,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone)]
pub struct YelpClient {
    client: Client,
    config: ProviderConfig,
}

impl YelpClient {
    #[must_use]
    pub const fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl UpstreamProvider<Food> for YelpClient {
    fn service(&self) -> &'static str {
        "Yelp"
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<Business>> {
        let url = format!("{}/businesses/search", self.config.base_url);

        let request = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .query(&[
                ("term", "restaurants".to_string()),
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
            ]);

        let response: SearchResponse = get_json("Yelp", request).await?;
        Ok(response.businesses)
    }
}
