//! Response envelope and decoding of the `data` query parameter.
//!
//! `/location` takes `data` as plain text. The domain routes take a full
//! location, either JSON-encoded (`data={"id":1,...}`) or spread over
//! bracketed keys the way browser form encoders write nested objects
//! (`data[id]=1&data[latitude]=47.6&...`).

use serde::Serialize;
use std::collections::HashMap;

use super::ApiError;
use crate::domain::LocationId;
use crate::models::location::Location;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

fn query_pairs(raw: Option<&str>) -> HashMap<String, String> {
    raw.map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// The free-text query of `/location?data=<text>`, exactly as sent.
pub fn query_text(raw: Option<&str>) -> Result<String, ApiError> {
    match query_pairs(raw).remove("data") {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApiError::validation("Missing 'data' query parameter")),
    }
}

/// The location object a domain route is asked about.
pub fn location_param(raw: Option<&str>) -> Result<Location, ApiError> {
    let pairs = query_pairs(raw);

    if let Some(json) = pairs.get("data") {
        return serde_json::from_str(json)
            .map_err(|e| ApiError::validation(format!("Invalid location in 'data': {e}")));
    }

    let field = |name: &str| pairs.get(&format!("data[{name}]")).map(String::as_str);
    let required = |name: &str| {
        field(name).ok_or_else(|| ApiError::validation(format!("Missing 'data[{name}]'")))
    };
    let number = |name: &str| -> Result<f64, ApiError> {
        required(name)?
            .trim()
            .parse()
            .map_err(|_| ApiError::validation(format!("'data[{name}]' must be a number")))
    };

    let id: i32 = required("id")?
        .trim()
        .parse()
        .map_err(|_| ApiError::validation("'data[id]' must be an integer"))?;

    Ok(Location {
        search_query: required("search_query")?.to_string(),
        formatted_query: field("formatted_query").unwrap_or_default().to_string(),
        latitude: number("latitude")?,
        longitude: number("longitude")?,
        id: LocationId::new(id),
    })
}
