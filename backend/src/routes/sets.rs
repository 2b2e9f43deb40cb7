//! Completed-set API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::logs::LogService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use groove_shared::types::{
    DailyLogResponse, LastWeightResponse, LogSetRequest, SetResponse, SetsQuery, UpdateSetRequest,
};
use serde::Deserialize;
use uuid::Uuid;

/// Create set routes
pub fn set_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_set).get(list_sets))
        .route("/daily-log", get(daily_log))
        .route("/last-weight", get(last_weight))
        .route("/:id", put(update_set).delete(delete_set))
}

/// Query parameters for the daily log
#[derive(Deserialize)]
struct DailyLogQuery {
    date: Option<NaiveDate>,
}

/// Query parameters for the weight pre-fill
#[derive(Deserialize)]
struct LastWeightQuery {
    exercise_id: String,
}

/// POST /api/v1/sets - Log a completed set
///
/// Weight is taken in the user's display unit and stored in pounds.
async fn log_set(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogSetRequest>,
) -> Result<Json<SetResponse>, ApiError> {
    let set = LogService::log_set(state.store(), state.sessions(), &auth.user_id, req).await?;
    Ok(Json(set))
}

/// GET /api/v1/sets/last-weight - Last logged added weight for an exercise
async fn last_weight(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LastWeightQuery>,
) -> Result<Json<LastWeightResponse>, ApiError> {
    let prefill =
        LogService::last_weight(state.sessions(), &auth.user_id, &query.exercise_id).await?;
    Ok(Json(prefill))
}

/// GET /api/v1/sets - Sets in a date range, newest first; defaults to today
async fn list_sets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<SetsQuery>,
) -> Result<Json<Vec<SetResponse>>, ApiError> {
    let sets =
        LogService::list_sets(state.store(), state.sessions(), &auth.user_id, query).await?;
    Ok(Json(sets))
}

/// GET /api/v1/sets/daily-log - One day's sets with per-exercise totals
async fn daily_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DailyLogQuery>,
) -> Result<Json<DailyLogResponse>, ApiError> {
    let log =
        LogService::daily_log(state.store(), state.sessions(), &auth.user_id, query.date).await?;
    Ok(Json(log))
}

/// PUT /api/v1/sets/:id - Edit a set in place
async fn update_set(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateSetRequest>,
) -> Result<Json<SetResponse>, ApiError> {
    let set =
        LogService::update_set(state.store(), state.sessions(), &auth.user_id, id, req).await?;
    Ok(Json(set))
}

/// DELETE /api/v1/sets/:id - Remove a set
async fn delete_set(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    LogService::delete_set(state.store(), &auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
