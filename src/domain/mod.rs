//! Domain primitives shared by the cache engine, the store and the API.
//!
//! The five tracked record categories each carry a fixed time-to-live. A
//! batch of cached rows is fresh while its age is at most that TTL; the
//! boundary itself still counts as fresh.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const SECOND: u64 = 1;
const HOUR: u64 = 60 * 60 * SECOND;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Identifier of a resolved [`Location`](crate::models::location::Location) row.
///
/// Every domain record references exactly one location through this id.
///
/// # Examples
///
/// ```rust
/// use cityscope::domain::LocationId;
///
/// let id = LocationId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LocationId(i32);

impl LocationId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocationId> for i32 {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl From<i32> for LocationId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// A tracked record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Weather,
    Food,
    Movies,
    Meetups,
    Trails,
}

impl Domain {
    pub const ALL: [Self; 5] = [
        Self::Weather,
        Self::Food,
        Self::Movies,
        Self::Meetups,
        Self::Trails,
    ];

    /// Maximum age a cached batch may reach before it is evicted.
    #[must_use]
    pub const fn ttl(self) -> Duration {
        match self {
            Self::Weather => Duration::from_secs(15 * SECOND),
            Self::Food => Duration::from_secs(DAY),
            Self::Movies => Duration::from_secs(12 * WEEK),
            Self::Meetups => Duration::from_secs(12 * HOUR),
            Self::Trails => Duration::from_secs(6 * HOUR),
        }
    }

    /// Name of the table holding this domain's rows.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Weather => "weathers",
            Self::Food => "foods",
            Self::Movies => "movies",
            Self::Meetups => "meetups",
            Self::Trails => "trails",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Food => "food",
            Self::Movies => "movies",
            Self::Meetups => "meetups",
            Self::Trails => "trails",
        }
    }

    /// Whether a batch created at `created_at_ms` has outlived the TTL at `now_ms`.
    ///
    /// Both timestamps are epoch milliseconds. An age exactly equal to the
    /// TTL is still fresh.
    #[must_use]
    pub fn is_stale(self, created_at_ms: i64, now_ms: i64) -> bool {
        let ttl_ms = i64::try_from(self.ttl().as_millis()).unwrap_or(i64::MAX);
        now_ms.saturating_sub(created_at_ms) > ttl_ms
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weather" | "weathers" => Ok(Self::Weather),
            "food" | "foods" | "yelp" => Ok(Self::Food),
            "movie" | "movies" => Ok(Self::Movies),
            "meetup" | "meetups" => Ok(Self::Meetups),
            "trail" | "trails" => Ok(Self::Trails),
            other => Err(format!("unknown domain: {other}")),
        }
    }
}
