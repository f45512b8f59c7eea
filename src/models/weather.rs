use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::{DomainRecord, display_date};
use crate::clients::darksky::DailyForecast;
use crate::domain::{Domain, LocationId};
use crate::entities::weathers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub forecast: String,
    pub time: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl DomainRecord for Weather {
    const DOMAIN: Domain = Domain::Weather;

    type Entity = weathers::Entity;
    type Model = weathers::Model;
    type ActiveModel = weathers::ActiveModel;
    type Raw = DailyForecast;

    fn from_raw(day: DailyForecast, location_id: LocationId, created_at: i64) -> Self {
        Self {
            forecast: day.summary,
            time: display_date(day.time.saturating_mul(1000)),
            created_at,
            location_id,
        }
    }

    fn from_model(m: weathers::Model) -> Self {
        Self {
            forecast: m.forecast,
            time: m.time,
            created_at: m.created_at,
            location_id: LocationId::new(m.location_id),
        }
    }

    fn into_active_model(self) -> weathers::ActiveModel {
        weathers::ActiveModel {
            id: NotSet,
            forecast: Set(self.forecast),
            time: Set(self.time),
            created_at: Set(self.created_at),
            location_id: Set(self.location_id.value()),
        }
    }

    fn location_column() -> weathers::Column {
        weathers::Column::LocationId
    }

    fn order_column() -> weathers::Column {
        weathers::Column::Id
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

    #[test]
    fn builds_from_daily_forecast() {
        let day = DailyForecast {
            time: 1_514_764_800,
            summary: "Light rain in the morning.".to_string(),
        };

        let weather = Weather::from_raw(day, LocationId::new(3), 42);
        assert_eq!(weather.forecast, "Light rain in the morning.");
        assert_eq!(weather.time, "Mon Jan 01 2018");
        assert_eq!(weather.created_at, 42);
        assert_eq!(weather.location_id, LocationId::new(3));
    }
}
