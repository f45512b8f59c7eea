//! Cache-or-fetch engine shared by every domain.
//!
//! A lookup runs two steps for one location:
//!
//! - **check**: read every stored row for the location. No rows is a miss.
//!   Otherwise the *first* row's `created_at` decides for the whole batch:
//!   rows at most one TTL old are served unchanged, older ones are all
//!   deleted before moving on.
//! - **resolve**: fetch from the upstream provider, stamp each item with the
//!   lookup time, store it, and answer with the fresh batch.
//!
//! Freshness and eviction are all-or-nothing per (domain, location) because
//! one fetch writes the whole batch at once. Lookups for the same location
//! are serialised so that concurrent requests cannot both evict and refill.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::error::CacheError;
use super::single_flight::KeyedLocks;
use crate::clients::UpstreamProvider;
use crate::db::Store;
use crate::domain::{Domain, LocationId};
use crate::models::DomainRecord;
use crate::models::location::Location;

/// Everything one lookup needs, passed explicitly between the steps.
#[derive(Debug, Clone, Copy)]
pub struct LookupContext<'a> {
    pub location: &'a Location,
    /// Epoch milliseconds treated as "now" for the whole lookup.
    pub now_ms: i64,
}

impl<'a> LookupContext<'a> {
    #[must_use]
    pub fn new(location: &'a Location) -> Self {
        Self::at(location, Utc::now().timestamp_millis())
    }

    #[must_use]
    pub const fn at(location: &'a Location, now_ms: i64) -> Self {
        Self { location, now_ms }
    }

    #[must_use]
    pub const fn location_id(&self) -> LocationId {
        self.location.id
    }
}

/// Outcome of the check step.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheDecision<R> {
    /// Nothing stored for the location.
    Miss,
    /// Stored batch is within its TTL and is served as-is.
    Fresh(Vec<R>),
    /// Stored batch has outlived its TTL by `age_ms - ttl`.
    Stale { age_ms: i64 },
}

impl<R> CacheDecision<R> {
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Miss => "miss",
            Self::Fresh(_) => "hit",
            Self::Stale { .. } => "stale",
        }
    }
}

/// Judge a stored batch by its first row.
#[must_use]
pub fn evaluate<R: DomainRecord>(rows: Vec<R>, now_ms: i64) -> CacheDecision<R> {
    let Some(first) = rows.first() else {
        return CacheDecision::Miss;
    };

    let created_at = first.created_at();
    if R::DOMAIN.is_stale(created_at, now_ms) {
        CacheDecision::Stale {
            age_ms: now_ms.saturating_sub(created_at),
        }
    } else {
        CacheDecision::Fresh(rows)
    }
}

/// The cache policy for one domain.
pub struct CachePolicy<R: DomainRecord> {
    store: Store,
    provider: Arc<dyn UpstreamProvider<R>>,
    in_flight: KeyedLocks<LocationId>,
}

impl<R: DomainRecord> CachePolicy<R> {
    #[must_use]
    pub fn new(store: Store, provider: Arc<dyn UpstreamProvider<R>>) -> Self {
        Self {
            store,
            provider,
            in_flight: KeyedLocks::new(),
        }
    }

    #[must_use]
    pub const fn domain(&self) -> Domain {
        R::DOMAIN
    }

    /// Serve the domain's records for `location`, fetching when needed.
    ///
    /// The clock is read once the location's lock is held, so a request that
    /// queued behind a slow fetch still stamps rows with the time it ran.
    pub async fn get(&self, location: &Location) -> Result<Vec<R>, CacheError> {
        let _guard = self.in_flight.lock(location.id).await;
        self.run(LookupContext::new(location)).await
    }

    /// Like [`get`](Self::get) but at a caller-chosen instant.
    pub async fn lookup(&self, ctx: LookupContext<'_>) -> Result<Vec<R>, CacheError> {
        let _guard = self.in_flight.lock(ctx.location_id()).await;
        self.run(ctx).await
    }

    async fn run(&self, ctx: LookupContext<'_>) -> Result<Vec<R>, CacheError> {
        match self.check(ctx).await? {
            CacheDecision::Fresh(rows) => {
                debug!(
                    domain = %R::DOMAIN,
                    location_id = %ctx.location_id(),
                    rows = rows.len(),
                    "Got {} data from store",
                    R::DOMAIN
                );
                Ok(rows)
            }
            CacheDecision::Miss => self.resolve(ctx).await,
            CacheDecision::Stale { age_ms } => {
                let removed = self
                    .store
                    .delete_records::<R>(ctx.location_id())
                    .await
                    .map_err(|e| Self::store_failure("evict", ctx, e))?;

                info!(
                    domain = %R::DOMAIN,
                    location_id = %ctx.location_id(),
                    age_ms,
                    ttl_ms = u64::try_from(R::DOMAIN.ttl().as_millis()).unwrap_or(u64::MAX),
                    removed,
                    "Evicted stale {} rows",
                    R::DOMAIN
                );

                self.resolve(ctx).await
            }
        }
    }

    async fn check(&self, ctx: LookupContext<'_>) -> Result<CacheDecision<R>, CacheError> {
        let rows = self
            .store
            .select_records::<R>(ctx.location_id())
            .await
            .map_err(|e| Self::store_failure("lookup", ctx, e))?;

        let decision = evaluate(rows, ctx.now_ms);
        metrics::counter!(
            "cache_lookups_total",
            "domain" => R::DOMAIN.as_str(),
            "outcome" => decision.outcome()
        )
        .increment(1);

        Ok(decision)
    }

    async fn resolve(&self, ctx: LookupContext<'_>) -> Result<Vec<R>, CacheError> {
        let service = self.provider.service();
        debug!(
            domain = %R::DOMAIN,
            location_id = %ctx.location_id(),
            "Fetching {} data from {}",
            R::DOMAIN,
            service
        );

        let items = match self.provider.fetch(ctx.location).await {
            Ok(items) => {
                metrics::counter!(
                    "upstream_fetch_total",
                    "domain" => R::DOMAIN.as_str(),
                    "result" => "ok"
                )
                .increment(1);
                items
            }
            Err(e) => {
                metrics::counter!(
                    "upstream_fetch_total",
                    "domain" => R::DOMAIN.as_str(),
                    "result" => "error"
                )
                .increment(1);
                warn!(
                    domain = %R::DOMAIN,
                    location_id = %ctx.location_id(),
                    "{} fetch failed: {:#}",
                    service,
                    e
                );
                return Err(CacheError::upstream(service, e));
            }
        };

        let records: Vec<R> = items
            .into_iter()
            .map(|item| R::from_raw(item, ctx.location_id(), ctx.now_ms))
            .collect();

        self.store
            .insert_records(&records)
            .await
            .map_err(|e| Self::store_failure("insert", ctx, e))?;

        info!(
            domain = %R::DOMAIN,
            location_id = %ctx.location_id(),
            rows = records.len(),
            "Stored fresh {} rows from {}",
            R::DOMAIN,
            service
        );

        Ok(records)
    }

    fn store_failure(op: &str, ctx: LookupContext<'_>, err: anyhow::Error) -> CacheError {
        error!(
            domain = %R::DOMAIN,
            location_id = %ctx.location_id(),
            "Store {} on {} failed: {:#}",
            op,
            R::DOMAIN.table(),
            err
        );
        CacheError::store(err)
    }
}
