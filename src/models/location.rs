use serde::{Deserialize, Serialize};

use crate::clients::GeocodeResult;
use crate::domain::LocationId;
use crate::entities::locations;

/// A place resolved from free text. Never expires once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub search_query: String,
    #[serde(default)]
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    pub id: LocationId,
}

/// A geocoded place not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewLocation {
    #[must_use]
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Self {
        Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address.clone(),
            latitude: result.geometry.location.lat,
            longitude: result.geometry.location.lng,
        }
    }

    #[must_use]
    pub fn with_id(self, id: LocationId) -> Location {
        Location {
            search_query: self.search_query,
            formatted_query: self.formatted_query,
            latitude: self.latitude,
            longitude: self.longitude,
            id,
        }
    }
}

impl From<locations::Model> for Location {
    fn from(m: locations::Model) -> Self {
        Self {
            search_query: m.search_query,
            formatted_query: m.formatted_query,
            latitude: m.latitude,
            longitude: m.longitude,
            id: LocationId::new(m.id),
        }
    }
}
