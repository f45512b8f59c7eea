//! Table-agnostic access to the per-location domain tables.
//!
//! Every operation is written once against [`DomainRecord`]; the record type
//! picks the table.

use crate::domain::LocationId;
use crate::models::DomainRecord;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct RecordRepository {
    conn: DatabaseConnection,
}

impl RecordRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All rows for a location, in insertion order.
    pub async fn select_by_location<R: DomainRecord>(
        &self,
        location_id: LocationId,
    ) -> Result<Vec<R>> {
        let rows = R::Entity::find()
            .filter(R::location_column().eq(location_id.value()))
            .order_by_asc(R::order_column())
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(R::from_model).collect())
    }

    /// Insert a fetched batch row by row inside one transaction, so a failure
    /// part-way leaves no rows behind.
    pub async fn insert_batch<R: DomainRecord>(&self, records: &[R]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let txn = self.conn.begin().await?;

        for record in records {
            R::Entity::insert(record.clone().into_active_model())
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(())
    }

    pub async fn delete_by_location<R: DomainRecord>(&self, location_id: LocationId) -> Result<u64> {
        let result = R::Entity::delete_many()
            .filter(R::location_column().eq(location_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }
}
