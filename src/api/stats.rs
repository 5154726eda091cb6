//! Stats API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{StatKind, Stats, UpdateStatsRequest};
use crate::AppState;

/// GET /api/stats - Get the aggregate stats snapshot.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Stats> {
    Ok(Json(state.store.get_stats().await))
}

/// PUT /api/stats - Supply externally computed fields.
pub async fn update_stats(
    State(state): State<AppState>,
    payload: Result<Json<UpdateStatsRequest>, JsonRejection>,
) -> ApiResult<Stats> {
    let Json(request) = payload?;
    Ok(Json(state.store.update_stats_snapshot(&request).await?))
}

/// POST /api/stats/:kind - Count one visit or play.
pub async fn increment_stats(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> ApiResult<Stats> {
    let kind = StatKind::parse(&kind).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown stat '{}': expected 'visits' or 'plays'",
            kind
        ))
    })?;

    Ok(Json(state.store.increment_stats(kind).await?))
}

/// POST /api/stats/daily-reset - Zero today's counters.
pub async fn reset_daily_stats(State(state): State<AppState>) -> ApiResult<Stats> {
    Ok(Json(state.store.reset_daily_stats().await?))
}
