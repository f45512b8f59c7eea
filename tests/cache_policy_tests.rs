mod common;

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use cityscope::db::Store;
use cityscope::models::{DomainRecord, Food, Meetup, Movie, Trail, Weather};
use cityscope::services::{CachePolicy, LookupContext};

use common::{
    StubProvider, business, forecast, hiking_trail, meetup_event, seed_location, tmdb_movie,
};

const NOW: i64 = 1_700_000_000_000;

fn ttl_ms<R: DomainRecord>() -> i64 {
    i64::try_from(R::DOMAIN.ttl().as_millis()).unwrap()
}

/// Rows exactly one TTL old are served; one millisecond older they are replaced.
async fn check_ttl_boundary<R>(raw: R::Raw)
where
    R: DomainRecord + PartialEq + Debug,
    R::Raw: Clone + Sync,
{
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    let cached = R::from_raw(raw.clone(), location.id, NOW - ttl_ms::<R>());
    store.insert_records(&[cached.clone()]).await.unwrap();
    store.insert_records(&[cached.clone()]).await.unwrap();

    let provider = StubProvider::<R>::returning(vec![raw]);
    let policy = CachePolicy::new(store.clone(), provider.clone());

    let rows = policy
        .lookup(LookupContext::at(&location, NOW))
        .await
        .unwrap();
    assert_eq!(rows, vec![cached.clone(), cached], "{} at TTL", R::DOMAIN);
    assert_eq!(provider.calls(), 0);

    let later = NOW + 1;
    let rows = policy
        .lookup(LookupContext::at(&location, later))
        .await
        .unwrap();
    assert_eq!(provider.calls(), 1, "{} past TTL", R::DOMAIN);
    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|r| r.created_at() == later));

    let stored: Vec<R> = store.select_records(location.id).await.unwrap();
    assert_eq!(stored, rows);
}

#[tokio::test]
async fn ttl_boundary_for_every_domain() {
    check_ttl_boundary::<Weather>(forecast("Sunny")).await;
    check_ttl_boundary::<Food>(business("Canlis")).await;
    check_ttl_boundary::<Movie>(tmdb_movie("Singles")).await;
    check_ttl_boundary::<Meetup>(meetup_event("Rust Night")).await;
    check_ttl_boundary::<Trail>(hiking_trail("Rattlesnake Ledge")).await;
}

#[tokio::test]
async fn empty_store_fetches_once_and_inserts() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;
    let provider =
        StubProvider::<Weather>::returning(vec![forecast("Rain"), forecast("Drizzle")]);
    let policy = CachePolicy::new(store.clone(), provider.clone());

    let rows = policy
        .lookup(LookupContext::at(&location, NOW))
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.created_at == NOW && r.location_id == location.id));

    let stored: Vec<Weather> = store.select_records(location.id).await.unwrap();
    assert_eq!(stored, rows);
}

#[tokio::test]
async fn weather_ten_seconds_old_is_served_from_store() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    let cached = Weather::from_raw(forecast("Fog"), location.id, NOW - 10_000);
    store.insert_records(&[cached.clone()]).await.unwrap();

    let provider = StubProvider::<Weather>::returning(vec![forecast("Sun")]);
    let policy = CachePolicy::new(store.clone(), provider.clone());

    let rows = policy
        .lookup(LookupContext::at(&location, NOW))
        .await
        .unwrap();

    assert_eq!(rows, vec![cached]);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn weather_twenty_seconds_old_is_replaced() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    for summary in ["Fog", "Fog", "Fog"] {
        let old = Weather::from_raw(forecast(summary), location.id, NOW - 20_000);
        store.insert_records(&[old]).await.unwrap();
    }

    let provider = StubProvider::<Weather>::returning(vec![forecast("Sun")]);
    let policy = CachePolicy::new(store.clone(), provider.clone());

    let rows = policy
        .lookup(LookupContext::at(&location, NOW))
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].forecast, "Sun");

    let stored: Vec<Weather> = store.select_records(location.id).await.unwrap();
    assert_eq!(stored, rows);
}

#[tokio::test]
async fn upstream_failure_after_eviction_leaves_nothing_stale() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    let old = Weather::from_raw(forecast("Fog"), location.id, NOW - 20_000);
    store.insert_records(&[old]).await.unwrap();

    let provider = StubProvider::<Weather>::failing();
    let policy = CachePolicy::new(store.clone(), provider.clone());

    let result = policy.lookup(LookupContext::at(&location, NOW)).await;
    assert!(result.is_err());
    assert_eq!(provider.calls(), 1);

    let stored: Vec<Weather> = store.select_records(location.id).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn policies_do_not_share_rows() {
    let store = Store::in_memory().await.unwrap();
    let seattle = seed_location(&store, "Seattle").await;
    let portland = seed_location(&store, "Portland").await;

    let weather = StubProvider::<Weather>::returning(vec![forecast("Rain")]);
    let food = StubProvider::<Food>::returning(vec![business("Canlis")]);
    let weather_policy = CachePolicy::new(store.clone(), weather.clone());
    let food_policy = CachePolicy::new(store.clone(), food.clone());

    weather_policy
        .lookup(LookupContext::at(&seattle, NOW))
        .await
        .unwrap();
    food_policy
        .lookup(LookupContext::at(&seattle, NOW))
        .await
        .unwrap();
    weather_policy
        .lookup(LookupContext::at(&portland, NOW))
        .await
        .unwrap();

    assert_eq!(weather.calls(), 2);
    assert_eq!(food.calls(), 1);
    assert_eq!(
        store.select_records::<Weather>(seattle.id).await.unwrap().len(),
        1
    );
    assert_eq!(
        store.select_records::<Food>(portland.id).await.unwrap().len(),
        0
    );
}

#[tokio::test]
async fn concurrent_lookups_fetch_once() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    let provider = StubProvider::<Trail>::slow(
        vec![hiking_trail("Mailbox Peak"), hiking_trail("Tiger Mountain")],
        Duration::from_millis(50),
    );
    let policy = Arc::new(CachePolicy::new(store.clone(), provider.clone()));

    let tasks = (0..5).map(|_| {
        let policy = policy.clone();
        let location = location.clone();
        tokio::spawn(async move { policy.get(&location).await })
    });

    for result in futures::future::join_all(tasks).await {
        assert_eq!(result.unwrap().unwrap().len(), 2);
    }

    assert_eq!(provider.calls(), 1);
    let stored: Vec<Trail> = store.select_records(location.id).await.unwrap();
    assert_eq!(stored.len(), 2);
}

#[tokio::test]
async fn concurrent_lookups_on_a_stale_batch_refresh_once() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    let stale_at = Utc::now().timestamp_millis() - 20_000;
    for summary in ["Fog", "Fog", "Fog"] {
        let old = Weather::from_raw(forecast(summary), location.id, stale_at);
        store.insert_records(&[old]).await.unwrap();
    }

    let provider = StubProvider::<Weather>::slow(
        vec![forecast("Sun"), forecast("Clouds")],
        Duration::from_millis(50),
    );
    let policy = Arc::new(CachePolicy::new(store.clone(), provider.clone()));

    let tasks = (0..5).map(|_| {
        let policy = policy.clone();
        let location = location.clone();
        tokio::spawn(async move { policy.get(&location).await })
    });

    let answers: Vec<Vec<Weather>> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap().unwrap())
        .collect();

    assert_eq!(provider.calls(), 1);

    let stored: Vec<Weather> = store.select_records(location.id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.created_at > stale_at));
    assert!(answers.iter().all(|rows| *rows == stored));
}

#[tokio::test]
async fn queued_lookup_stamps_rows_when_it_runs() {
    let store = Store::in_memory().await.unwrap();
    let location = seed_location(&store, "Seattle").await;

    let stall = Duration::from_millis(500);
    let provider = StubProvider::<Weather>::flaky(vec![forecast("Sun")], stall);
    let policy = Arc::new(CachePolicy::new(store.clone(), provider.clone()));

    let started = Utc::now().timestamp_millis();
    let first = {
        let policy = policy.clone();
        let location = location.clone();
        tokio::spawn(async move { policy.get(&location).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = {
        let policy = policy.clone();
        let location = location.clone();
        tokio::spawn(async move { policy.get(&location).await })
    };

    assert!(first.await.unwrap().is_err());
    let rows = second.await.unwrap().unwrap();
    assert_eq!(provider.calls(), 2);

    // The second request could only run after the first one's stalled fetch.
    let earliest = started + i64::try_from(stall.as_millis()).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(
        rows[0].created_at >= earliest,
        "stamped {} ms before the fetch ran",
        earliest - rows[0].created_at
    );

    let stored: Vec<Weather> = store.select_records(location.id).await.unwrap();
    assert_eq!(stored, rows);
}
