use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::{DomainRecord, display_date};
use crate::clients::meetup::MeetupEvent;
use crate::domain::{Domain, LocationId};
use crate::entities::meetups;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meetup {
    pub link: String,
    pub name: String,
    pub creation_date: String,
    pub host: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl DomainRecord for Meetup {
    const DOMAIN: Domain = Domain::Meetups;

    type Entity = meetups::Entity;
    type Model = meetups::Model;
    type ActiveModel = meetups::ActiveModel;
    type Raw = MeetupEvent;

    fn from_raw(event: MeetupEvent, location_id: LocationId, created_at: i64) -> Self {
        Self {
            link: event.link.or(event.event_url).unwrap_or_default(),
            name: event.name,
            creation_date: display_date(event.created),
            host: event.group.name,
            created_at,
            location_id,
        }
    }

    fn from_model(m: meetups::Model) -> Self {
        Self {
            link: m.link,
            name: m.name,
            creation_date: m.creation_date,
            host: m.host,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn into_active_model(self) -> meetups::ActiveModel {
        meetups::ActiveModel {
            id: NotSet,
            link: Set(self.link),
            name: Set(self.name),
            creation_date: Set(self.creation_date),
            host: Set(self.host),
            created_at: Set(self.created_at),
            location_id: Set(self.location_id.value()),
        }
    }

    fn location_column() -> meetups::Column {
        meetups::Column::LocationId
    }

    fn order_column() -> meetups::Column {
        meetups::Column::Id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::meetup::MeetupGroup;

    #[test]
    fn prefers_link_over_legacy_event_url() {
        let event = MeetupEvent {
            name: "Rust Seattle".to_string(),
            link: Some("https://www.meetup.com/rust-seattle/events/1".to_string()),
            event_url: Some("https://old.example/1".to_string()),
            created: 1_514_764_800_000,
            group: MeetupGroup {
                name: "Seattle Rust User Group".to_string(),
            },
        };

        let meetup = Meetup::from_raw(event, LocationId::new(9), 5);
        assert_eq!(meetup.link, "https://www.meetup.com/rust-seattle/events/1");
        assert_eq!(meetup.creation_date, "Mon Jan 01 2018");
        assert_eq!(meetup.host, "Seattle Rust User Group");
    }
}
