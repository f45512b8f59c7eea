use crate::domain::LocationId;
use crate::models::location::{Location, NewLocation};
use crate::models::{DomainRecord, Food, Meetup, Movie, Trail, Weather};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Owned handle to the relational store.
///
/// Created once at startup and cloned into every component that needs it;
/// clones share the underlying connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// Single-connection in-memory store; every pooled connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1).await
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Release the pool. Clones still alive afterwards will fail their queries.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn record_repo(&self) -> repositories::records::RecordRepository {
        repositories::records::RecordRepository::new(self.conn.clone())
    }

    // ========== Locations ==========

    pub async fn find_location_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_query(search_query).await
    }

    pub async fn get_location(&self, id: LocationId) -> Result<Option<Location>> {
        self.location_repo().get(id).await
    }

    pub async fn insert_location(&self, location: NewLocation) -> Result<Location> {
        self.location_repo().insert(location).await
    }

    // ========== Domain records ==========

    pub async fn select_records<R: DomainRecord>(&self, location_id: LocationId) -> Result<Vec<R>> {
        self.record_repo().select_by_location(location_id).await
    }

    pub async fn insert_records<R: DomainRecord>(&self, records: &[R]) -> Result<()> {
        self.record_repo().insert_batch(records).await
    }

    pub async fn delete_records<R: DomainRecord>(&self, location_id: LocationId) -> Result<u64> {
        self.record_repo().delete_by_location::<R>(location_id).await
    }

    /// Drop every cached domain row for a location, returning the number removed.
    pub async fn purge_location_records(&self, location_id: LocationId) -> Result<u64> {
        let repo = self.record_repo();
        let mut removed = 0;
        removed += repo.delete_by_location::<Weather>(location_id).await?;
        removed += repo.delete_by_location::<Food>(location_id).await?;
        removed += repo.delete_by_location::<Movie>(location_id).await?;
        removed += repo.delete_by_location::<Meetup>(location_id).await?;
        removed += repo.delete_by_location::<Trail>(location_id).await?;
        Ok(removed)
    }
}
