//! Resolves free-text queries to stored locations.
//!
//! Same cache-or-fetch shape as the domain policies, but a resolved
//! location never goes stale: the text of a query pins a fixed place.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::CacheError;
use super::single_flight::KeyedLocks;
use crate::clients::Geocoder;
use crate::db::Store;
use crate::models::location::{Location, NewLocation};

pub struct LocationResolver {
    store: Store,
    geocoder: Arc<dyn Geocoder>,
    in_flight: KeyedLocks<String>,
}

impl LocationResolver {
    #[must_use]
    pub fn new(store: Store, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            store,
            geocoder,
            in_flight: KeyedLocks::new(),
        }
    }

    /// Return the stored location for `query`, geocoding and storing it on first use.
    ///
    /// Matching is exact on the query text. Only the geocoder's first
    /// result is kept.
    pub async fn resolve(&self, query: &str) -> Result<Location, CacheError> {
        let _guard = self.in_flight.lock(query.to_string()).await;

        let cached = self
            .store
            .find_location_by_query(query)
            .await
            .map_err(|e| {
                warn!("Location lookup for '{}' failed: {:#}", query, e);
                CacheError::store(e)
            })?;

        if let Some(location) = cached {
            debug!(location_id = %location.id, "Got location '{}' from store", query);
            metrics::counter!("cache_lookups_total", "domain" => "location", "outcome" => "hit")
                .increment(1);
            return Ok(location);
        }

        metrics::counter!("cache_lookups_total", "domain" => "location", "outcome" => "miss")
            .increment(1);

        let service = self.geocoder.service();
        let results = self.geocoder.geocode(query).await.map_err(|e| {
            warn!("{} failed for '{}': {:#}", service, query, e);
            CacheError::upstream(service, e)
        })?;

        let Some(best) = results.first() else {
            warn!("{} found nothing for '{}'", service, query);
            return Err(CacheError::no_data(service, query));
        };

        let location = self
            .store
            .insert_location(NewLocation::from_geocode(query, best))
            .await
            .map_err(|e| {
                warn!("Storing location '{}' failed: {:#}", query, e);
                CacheError::store(e)
            })?;

        info!(
            location_id = %location.id,
            "Resolved '{}' to {} ({}, {})",
            query,
            location.formatted_query,
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}
