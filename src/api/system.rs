use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HealthDto};

/// `GET /health`
///
/// Pings the store; a failed ping answers 500.
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthDto>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::internal(format!("Store ping failed: {e}")))?;

    Ok(Json(ApiResponse::success(HealthDto {
        status: "ok",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })))
}
