use axum::{
    Json,
    extract::{RawQuery, State},
};
use std::sync::Arc;

use super::types::query_text;
use super::{ApiError, AppState};
use crate::models::location::Location;

/// `GET /location?data=<text>`
///
/// Answers with the stored location for the query text, geocoding it first
/// when the text has never been seen.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Location>, ApiError> {
    let text = query_text(query.as_deref())?;
    let location = state.shared.resolver.resolve(&text).await?;
    Ok(Json(location))
}
