use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamProvider, get_json};
use crate::config::ProviderConfig;
use crate::models::location::Location;
use crate::models::weather::Weather;

pub const DARKSKY_API: &str = "https://api.darksky.net";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct Daily {
    #[serde(default)]
    data: Vec<DailyForecast>,
}

/// One day of the daily forecast block.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    /// Unix seconds at the start of the day.
    pub time: i64,
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    config: ProviderConfig,
}

impl DarkSkyClient {
    #[must_use]
    pub const fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl UpstreamProvider<Weather> for DarkSkyClient {
    fn service(&self) -> &'static str {
        "Dark Sky"
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<DailyForecast>> {
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.config.base_url, self.config.api_key, location.latitude, location.longitude
        );

        let response: ForecastResponse = get_json("Dark Sky", self.client.get(&url)).await?;
        Ok(response.daily.data)
    }
}
