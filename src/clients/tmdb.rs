use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{UpstreamProvider, get_json};
use crate::config::ProviderConfig;
use crate::models::location::Location;
use crate::models::movie::Movie;

pub const TMDB_API: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub title: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: ProviderConfig,
}

impl TmdbClient {
    #[must_use]
    pub const fn new(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl UpstreamProvider<Movie> for TmdbClient {
    fn service(&self) -> &'static str {
        "TMDB"
    }

    /// Movies are matched on the location's original search text, not its coordinates.
    async fn fetch(&self, location: &Location) -> Result<Vec<TmdbMovie>> {
        let url = format!("{}/search/movie", self.config.base_url);

        let request = self.client.get(&url).query(&[
            ("api_key", self.config.api_key.as_str()),
            ("query", location.search_query.as_str()),
        ]);

        let response: SearchResponse = get_json("TMDB", request).await?;
        Ok(response.results)
    }
}
