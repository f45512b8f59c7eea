use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamProvider, get_json};
use crate::config::ProviderConfig;
use crate::models::location::Location;
use crate::models::meetup::Meetup;

pub const MEETUP_API: &str = "https://api.meetup.com";

const PAGE_SIZE: &str = "20";

#[derive(Debug, Deserialize)]
struct UpcomingEventsResponse {
    #[serde(default)]
    events: Vec<MeetupEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeetupEvent {
    pub name: String,
    pub link: Option<String>,
    pub event_url: Option<String>,
    /// Epoch milliseconds at which the event was created.
    pub created: i64,
    pub group: MeetupGroup,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeetupGroup {
    pub name: String,
}

#[derive(Clone)]
pub struct MeetupClient {
    client: Client,
    config: ProviderConfig,
}

impl MeetupClient {
    #[must_use]
    pub const fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl UpstreamProvider<Meetup> for MeetupClient {
    fn service(&self) -> &'static str {
        "Meetup"
    }

    async fn fetch(&self, location: &Location) -> Result<Vec<MeetupEvent>> {
        let url = format!("{}/find/upcoming_events", self.config.base_url);

        let request = self.client.get(&url).query(&[
            ("lon", location.longitude.to_string()),
            ("lat", location.latitude.to_string()),
            ("page", PAGE_SIZE.to_string()),
            ("key", self.config.api_key.clone()),
        ]);

        let response: UpcomingEventsResponse = get_json("Meetup", request).await?;
        Ok(response.events)
    }
}
