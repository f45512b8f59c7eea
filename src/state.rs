use std::sync::Arc;

use crate::clients::darksky::DarkSkyClient;
use crate::clients::google::GoogleGeocodeClient;
use crate::clients::hiking::HikingProjectClient;
use crate::clients::meetup::MeetupClient;
use crate::clients::tmdb::TmdbClient;
use crate::clients::yelp::YelpClient;
use crate::clients::{Geocoder, UpstreamProvider, build_http_client};
use crate::config::Config;
use crate::db::Store;
use crate::domain::Domain;
use crate::models::location::Location;
use crate::models::{DomainRecord, Food, Meetup, Movie, Trail, Weather};
use crate::services::{CachePolicy, LocationResolver};

/// The upstream seams, one per domain plus the geocoder.
///
/// Production wiring uses the HTTP clients; tests substitute stubs.
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,

    pub weather: Arc<dyn UpstreamProvider<Weather>>,

    pub food: Arc<dyn UpstreamProvider<Food>>,

    pub movies: Arc<dyn UpstreamProvider<Movie>>,

    pub meetups: Arc<dyn UpstreamProvider<Meetup>>,

    pub trails: Arc<dyn UpstreamProvider<Trail>>,
}

impl Providers {
    /// Build HTTP clients for every provider over one pooled `reqwest::Client`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let providers = &config.providers;
        let http_client =
            build_http_client(providers.request_timeout_seconds, &providers.user_agent)?;

        Ok(Self {
            geocoder: Arc::new(GoogleGeocodeClient::new(
                http_client.clone(),
                providers.geocode.clone(),
            )),
            weather: Arc::new(DarkSkyClient::new(
                http_client.clone(),
                providers.weather.clone(),
            )),
            food: Arc::new(YelpClient::new(http_client.clone(), providers.yelp.clone())),
            movies: Arc::new(TmdbClient::new(
                http_client.clone(),
                providers.movies.clone(),
            )),
            meetups: Arc::new(MeetupClient::new(
                http_client.clone(),
                providers.meetups.clone(),
            )),
            trails: Arc::new(HikingProjectClient::new(
                http_client,
                providers.trails.clone(),
            )),
        })
    }
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub resolver: Arc<LocationResolver>,

    pub weather: Arc<CachePolicy<Weather>>,

    pub food: Arc<CachePolicy<Food>>,

    pub movies: Arc<CachePolicy<Movie>>,

    pub meetups: Arc<CachePolicy<Meetup>>,

    pub trails: Arc<CachePolicy<Trail>>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let providers = Providers::from_config(&config)?;

        Ok(Self::with_providers(config, store, providers))
    }

    /// Wire the services over an existing store and provider set.
    #[must_use]
    pub fn with_providers(config: Config, store: Store, providers: Providers) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Arc::new(LocationResolver::new(store.clone(), providers.geocoder)),
            weather: Arc::new(CachePolicy::new(store.clone(), providers.weather)),
            food: Arc::new(CachePolicy::new(store.clone(), providers.food)),
            movies: Arc::new(CachePolicy::new(store.clone(), providers.movies)),
            meetups: Arc::new(CachePolicy::new(store.clone(), providers.meetups)),
            trails: Arc::new(CachePolicy::new(store.clone(), providers.trails)),
            store,
        }
    }

    /// Run one domain's policy and return its records as JSON.
    pub async fn lookup(
        &self,
        domain: Domain,
        location: &Location,
    ) -> anyhow::Result<serde_json::Value> {
        match domain {
            Domain::Weather => to_json(&self.weather, location).await,
            Domain::Food => to_json(&self.food, location).await,
            Domain::Movies => to_json(&self.movies, location).await,
            Domain::Meetups => to_json(&self.meetups, location).await,
            Domain::Trails => to_json(&self.trails, location).await,
        }
    }
}

async fn to_json<R: DomainRecord>(
    policy: &CachePolicy<R>,
    location: &Location,
) -> anyhow::Result<serde_json::Value> {
    let records = policy.get(location).await?;
    Ok(serde_json::to_value(records)?)
}
