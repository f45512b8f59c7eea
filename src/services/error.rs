use std::fmt;
use thiserror::Error;

/// Failures of the cache-or-fetch pipeline.
///
/// None of these are retried; each is logged where it happens and handed
/// back to the caller.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The upstream answered successfully but with nothing usable.
    #[error("{service} returned no data for '{query}'")]
    NoData { service: String, query: String },

    #[error("{service} call failed: {message}")]
    UpstreamCall { service: String, message: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl CacheError {
    pub fn no_data(service: impl Into<String>, query: impl Into<String>) -> Self {
        Self::NoData {
            service: service.into(),
            query: query.into(),
        }
    }

    pub fn upstream(service: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::UpstreamCall {
            service: service.into(),
            message: err.to_string(),
        }
    }

    pub fn store(err: impl fmt::Display) -> Self {
        Self::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_the_cause() {
        let err = CacheError::store(anyhow::anyhow!("disk full"));
        assert!(matches!(err, CacheError::Store(ref msg) if msg.contains("disk full")));
        assert_eq!(err.to_string(), "Store error: disk full");
    }

    #[test]
    fn messages_name_the_provider() {
        let err = CacheError::upstream("Yelp", "503 Service Unavailable");
        assert_eq!(err.to_string(), "Yelp call failed: 503 Service Unavailable");

        let err = CacheError::no_data("Google Geocoding", "Atlantis");
        assert_eq!(
            err.to_string(),
            "Google Geocoding returned no data for 'Atlantis'"
        );
    }
}
