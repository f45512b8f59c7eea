#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use cityscope::clients::darksky::DailyForecast;
use cityscope::clients::google::{Geometry, LatLng};
use cityscope::clients::hiking::HikingTrail;
use cityscope::clients::meetup::{MeetupEvent, MeetupGroup};
use cityscope::clients::tmdb::TmdbMovie;
use cityscope::clients::yelp::Business;
use cityscope::clients::{GeocodeResult, Geocoder, UpstreamProvider};
use cityscope::config::Config;
use cityscope::db::Store;
use cityscope::models::location::{Location, NewLocation};
use cityscope::models::{DomainRecord, Food, Meetup, Movie, Trail, Weather};
use cityscope::state::{Providers, SharedState};

/// Canned upstream that counts how often it is asked.
pub struct StubProvider<R: DomainRecord> {
    items: Vec<R::Raw>,
    fail: bool,
    fail_first: bool,
    delay: Duration,
    calls: AtomicUsize,
}

impl<R> StubProvider<R>
where
    R: DomainRecord,
    R::Raw: Clone + Sync,
{
    pub fn returning(items: Vec<R::Raw>) -> Arc<Self> {
        Arc::new(Self {
            items,
            fail: false,
            fail_first: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            items: Vec::new(),
            fail: true,
            fail_first: false,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn slow(items: Vec<R::Raw>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            items,
            fail: false,
            fail_first: false,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    /// The first call stalls for `delay` and then errors; later calls answer at once.
    pub fn flaky(items: Vec<R::Raw>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            items,
            fail: false,
            fail_first: true,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<R> UpstreamProvider<R> for StubProvider<R>
where
    R: DomainRecord,
    R::Raw: Clone + Sync,
{
    fn service(&self) -> &'static str {
        "Stub"
    }

    async fn fetch(&self, _location: &Location) -> anyhow::Result<Vec<R::Raw>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_first && call > 0 {
            return Ok(self.items.clone());
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail || self.fail_first {
            anyhow::bail!("Stub API error: 503 Service Unavailable");
        }
        Ok(self.items.clone())
    }
}

pub struct StubGeocoder {
    results: Vec<GeocodeResult>,
    queries: std::sync::Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn returning(results: Vec<GeocodeResult>) -> Arc<Self> {
        Arc::new(Self {
            results,
            queries: std::sync::Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    fn service(&self) -> &'static str {
        "Stub Geocoder"
    }

    async fn geocode(&self, query: &str) -> anyhow::Result<Vec<GeocodeResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.clone())
    }
}

pub fn seattle_geocode() -> GeocodeResult {
    GeocodeResult {
        formatted_address: "Seattle, WA, USA".to_string(),
        geometry: Geometry {
            location: LatLng {
                lat: 47.606_209_5,
                lng: -122.332_070_8,
            },
        },
    }
}

pub fn forecast(summary: &str) -> DailyForecast {
    DailyForecast {
        time: 1_514_764_800,
        summary: summary.to_string(),
    }
}

pub fn business(name: &str) -> Business {
    Business {
        name: name.to_string(),
        url: format!("https://www.yelp.com/biz/{}", name.to_lowercase()),
        rating: Some(4.5),
        price: Some("$$".to_string()),
        image_url: None,
    }
}

pub fn tmdb_movie(title: &str) -> TmdbMovie {
    TmdbMovie {
        title: title.to_string(),
        release_date: Some("1993-06-25".to_string()),
        vote_count: 1_200,
        vote_average: 6.8,
        popularity: 12.5,
        poster_path: Some("/poster.jpg".to_string()),
        overview: "A widowed architect moves to Seattle.".to_string(),
    }
}

pub fn meetup_event(name: &str) -> MeetupEvent {
    MeetupEvent {
        name: name.to_string(),
        link: Some("https://www.meetup.com/rustseattle/events/1".to_string()),
        event_url: None,
        created: 1_514_764_800_000,
        group: MeetupGroup {
            name: "Seattle Rust".to_string(),
        },
    }
}

pub fn hiking_trail(name: &str) -> HikingTrail {
    HikingTrail {
        url: "https://www.hikingproject.com/trail/1".to_string(),
        name: name.to_string(),
        location: "Issaquah, Washington".to_string(),
        length: 4.2,
        condition_date: Some("2018-07-21 00:00:00".to_string()),
        condition_details: Some("Dry".to_string()),
        stars: 4.4,
        star_votes: 84,
        summary: "Steep climb to a viewpoint.".to_string(),
    }
}

/// Handles to every stub so tests can count upstream calls.
pub struct Stubs {
    pub geocoder: Arc<StubGeocoder>,
    pub weather: Arc<StubProvider<Weather>>,
    pub food: Arc<StubProvider<Food>>,
    pub movies: Arc<StubProvider<Movie>>,
    pub meetups: Arc<StubProvider<Meetup>>,
    pub trails: Arc<StubProvider<Trail>>,
}

impl Default for Stubs {
    fn default() -> Self {
        Self {
            geocoder: StubGeocoder::returning(vec![seattle_geocode()]),
            weather: StubProvider::returning(vec![forecast("Rain"), forecast("Clouds")]),
            food: StubProvider::returning(vec![business("Canlis")]),
            movies: StubProvider::returning(vec![tmdb_movie("Sleepless in Seattle")]),
            meetups: StubProvider::returning(vec![meetup_event("Rust Night")]),
            trails: StubProvider::returning(vec![hiking_trail("Poo Poo Point")]),
        }
    }
}

impl Stubs {
    pub fn providers(&self) -> Providers {
        Providers {
            geocoder: self.geocoder.clone(),
            weather: self.weather.clone(),
            food: self.food.clone(),
            movies: self.movies.clone(),
            meetups: self.meetups.clone(),
            trails: self.trails.clone(),
        }
    }
}

pub async fn spawn_app(stubs: &Stubs) -> (Router, Store) {
    let store = Store::in_memory().await.expect("Failed to open store");
    let shared = SharedState::with_providers(Config::default(), store.clone(), stubs.providers());
    let state = cityscope::api::create_app_state(Arc::new(shared), None);
    (cityscope::api::router(state), store)
}

pub async fn seed_location(store: &Store, query: &str) -> Location {
    store
        .insert_location(NewLocation {
            search_query: query.to_string(),
            formatted_query: format!("{query}, USA"),
            latitude: 47.6,
            longitude: -122.3,
        })
        .await
        .expect("Failed to seed location")
}
