use crate::domain::LocationId;
use crate::entities::{locations, prelude::*};
use crate::models::location::{Location, NewLocation};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

/// Repository for resolved locations
pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_query(&self, search_query: &str) -> Result<Option<Location>> {
        let row = Locations::find()
            .filter(locations::Column::SearchQuery.eq(search_query))
            .order_by_asc(locations::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Location::from))
    }

    pub async fn get(&self, id: LocationId) -> Result<Option<Location>> {
        let row = Locations::find_by_id(id.value()).one(&self.conn).await?;
        Ok(row.map(Location::from))
    }

    pub async fn insert(&self, location: NewLocation) -> Result<Location> {
        let active_model = locations::ActiveModel {
            search_query: Set(location.search_query.clone()),
            formatted_query: Set(location.formatted_query.clone()),
            latitude: Set(location.latitude),
            longitude: Set(location.longitude),
            ..Default::default()
        };

        let res = Locations::insert(active_model).exec(&self.conn).await?;
        info!(
            "Stored location {} for query '{}'",
            res.last_insert_id, location.search_query
        );

        Ok(location.with_id(LocationId::new(res.last_insert_id)))
    }
}
