//! Records served to clients, and how each one maps to its table and upstream item.

pub mod food;
pub mod location;
pub mod meetup;
pub mod movie;
pub mod trail;
pub mod weather;

use chrono::DateTime;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel};
use serde::Serialize;

use crate::domain::{Domain, LocationId};

pub use food::Food;
pub use location::Location;
pub use meetup::Meetup;
pub use movie::Movie;
pub use trail::Trail;
pub use weather::Weather;

/// A row of one of the per-location domain tables.
///
/// Implementors supply the per-domain mapping (upstream item to record,
/// record to table row and back); the cache policy itself is written once
/// against this trait.
pub trait DomainRecord: Serialize + Clone + Send + Sync + 'static {
    const DOMAIN: Domain;

    type Entity: EntityTrait<Model = Self::Model>;

    type Model: IntoActiveModel<Self::ActiveModel> + Send + Sync;

    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + Send + Sync;

    /// The upstream item a record is built from.
    type Raw: Send + 'static;

    fn from_raw(raw: Self::Raw, location_id: LocationId, created_at: i64) -> Self;

    fn from_model(model: Self::Model) -> Self;

    fn into_active_model(self) -> Self::ActiveModel;

    /// Column holding the owning location's id.
    fn location_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column giving insertion order.
    fn order_column() -> <Self::Entity as EntityTrait>::Column;

    fn created_at(&self) -> i64;

    fn location_id(&self) -> LocationId;
}

/// Render a UTC instant the way the front end shows dates, e.g. `Mon Jan 01 2018`.
pub(crate) fn display_date(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.format("%a %b %d %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_display_date() {
        assert_eq!(display_date(1_514_764_800_000), "Mon Jan 01 2018");
        assert_eq!(display_date(0), "Thu Jan 01 1970");
    }
}
