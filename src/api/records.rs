//! Domain record endpoints. Each route runs its domain's cache policy for
//! the location passed in `data`.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use std::sync::Arc;

use super::types::location_param;
use super::{ApiError, AppState};
use crate::models::{DomainRecord, Food, Meetup, Movie, Trail, Weather};
use crate::services::CachePolicy;

async fn serve<R: DomainRecord>(
    policy: &CachePolicy<R>,
    query: Option<String>,
) -> Result<Json<Vec<R>>, ApiError> {
    let location = location_param(query.as_deref())?;
    let records = policy.get(&location).await?;
    Ok(Json(records))
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Weather>>, ApiError> {
    serve(&state.shared.weather, query).await
}

pub async fn get_yelp(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Food>>, ApiError> {
    serve(&state.shared.food, query).await
}

pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Movie>>, ApiError> {
    serve(&state.shared.movies, query).await
}

pub async fn get_meetups(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Meetup>>, ApiError> {
    serve(&state.shared.meetups, query).await
}

pub async fn get_trails(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Trail>>, ApiError> {
    serve(&state.shared.trails, query).await
}
