//! Upstream data providers.
//!
//! Each client performs exactly one HTTP round trip per call, with no retry.
//! Failures (transport errors, non-2xx statuses, undecodable bodies) are
//! returned to the caller untouched.

pub mod darksky;
pub mod google;
pub mod hiking;
pub mod meetup;
pub mod tmdb;
pub mod yelp;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::models::DomainRecord;
use crate::models::location::Location;

pub use google::GeocodeResult;

/// Resolves free text to candidate places, best match first.
#[async_trait]
pub trait Geocoder: Send + Sync {
    fn service(&self) -> &'static str;

    async fn geocode(&self, query: &str) -> Result<Vec<GeocodeResult>>;
}

/// Fetches the raw items a domain record is built from.
#[async_trait]
pub trait UpstreamProvider<R: DomainRecord>: Send + Sync {
    /// Human-readable provider name used in logs and error messages.
    fn service(&self) -> &'static str;

    async fn fetch(&self, location: &Location) -> Result<Vec<R::Raw>>;
}

/// Build a shared HTTP client for all providers so connections are pooled.
pub fn build_http_client(timeout_seconds: u64, user_agent: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Send `request` and decode a JSON body, turning non-2xx statuses into errors.
pub(crate) async fn get_json<T: DeserializeOwned>(
    service: &str,
    request: RequestBuilder,
) -> Result<T> {
    let response = request.send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow::anyhow!("{service} API error: {status} - {body}"));
    }

    Ok(response.json().await?)
}
