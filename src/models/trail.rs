use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::DomainRecord;
use crate::clients::hiking::HikingTrail;
use crate::domain::{Domain, LocationId};
use crate::entities::trails;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub trail_url: String,
    pub name: String,
    pub location: String,
    pub length: f64,
    pub condition_date: Option<String>,
    pub condition_time: Option<String>,
    pub conditions: Option<String>,
    pub stars: f64,
    pub star_votes: i64,
    pub summary: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

/// Split `"2018-07-21 20:51:56"` into its date and time halves.
fn split_condition_date(raw: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, None);
    };

    let mut parts = raw.splitn(2, ' ');
    let date = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
    let time = parts.next().map(str::to_string);
    (date, time)
}

impl DomainRecord for Trail {
    const DOMAIN: Domain = Domain::Trails;

    type Entity = trails::Entity;
    type Model = trails::Model;
    type ActiveModel = trails::ActiveModel;
    type Raw = HikingTrail;

    fn from_raw(hike: HikingTrail, location_id: LocationId, created_at: i64) -> Self {
        let (condition_date, condition_time) = split_condition_date(hike.condition_date.as_deref());

        Self {
            trail_url: hike.url,
            name: hike.name,
            location: hike.location,
            length: hike.length,
            condition_date,
            condition_time,
            conditions: hike.condition_details,
            stars: hike.stars,
            star_votes: hike.star_votes,
            summary: hike.summary,
            created_at,
            location_id,
        }
    }

    fn from_model(m: trails::Model) -> Self {
        Self {
            trail_url: m.trail_url,
            name: m.name,
            location: m.location,
            length: m.length,
            condition_date: m.condition_date,
            condition_time: m.condition_time,
            conditions: m.conditions,
            stars: m.stars,
            star_votes: m.star_votes,
            summary: m.summary,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn into_active_model(self) -> trails::ActiveModel {
        trails::ActiveModel {
            id: NotSet,
            trail_url: Set(self.trail_url),
            name: Set(self.name),
            location: Set(self.location),
            length: Set(self.length),
            condition_date: Set(self.condition_date),
            condition_time: Set(self.condition_time),
            conditions: Set(self.conditions),
            stars: Set(self.stars),
            star_votes: Set(self.star_votes),
            summary: Set(self.summary),
            created_at: Set(self.created_at),
            location_id: Set(self.location_id.value()),
        }
    }

    fn location_column() -> trails::Column {
        trails::Column::LocationId
    }

    fn order_column() -> trails::Column {
        trails::Column::Id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }
}
