use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::DomainRecord;
use crate::clients::yelp::Business;
use crate::domain::{Domain, LocationId};
use crate::entities::foods;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub url: String,
    pub rating: Option<f64>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl DomainRecord for Food {
    const DOMAIN: Domain = Domain::Food;

    type Entity = foods::Entity;
    type Model = foods::Model;
    type ActiveModel = foods::ActiveModel;
    type Raw = Business;

    fn from_raw(business: Business, location_id: LocationId, created_at: i64) -> Self {
        Self {
            name: business.name,
            url: business.url,
            rating: business.rating,
            price: business.price,
            image_url: business.image_url,
            created_at,
            location_id,
        }
    }

    fn from_model(m: foods::Model) -> Self {
        Self {
            name: m.name,
            url: m.url,
            rating: m.rating,
            price: m.price,
            image_url: m.image_url,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn into_active_model(self) -> foods::ActiveModel {
        foods::ActiveModel {
            id: NotSet,
            name: Set(self.name),
            url: Set(self.url),
            rating: Set(self.rating),
            price: Set(self.price),
            image_url: Set(self.image_url),
            created_at: Set(self.created_at),
            location_id: Set(self.location_id.value()),
        }
    }

    fn location_column() -> foods::Column {
        foods::Column::LocationId
    }

    fn order_column() -> foods::Column {
        foods::Column::Id
    }

    fn created_at(&self) -> i64 {
        self.created_at
    }

    fn location_id(&self) -> LocationId {
        self.location_id
    }
}
