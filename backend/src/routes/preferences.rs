//! Preferences API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::preferences::PreferencesService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use groove_shared::types::{PreferencesResponse, UpdatePreferencesRequest};

/// Create preference routes
pub fn preference_routes() -> Router<AppState> {
    Router::new().route("/", get(get_preferences).patch(update_preferences))
}

/// GET /api/v1/preferences - Current preferences, defaults if never saved
async fn get_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let prefs = PreferencesService::get(state.store(), &auth.user_id).await?;
    Ok(Json(prefs))
}

/// PATCH /api/v1/preferences - Merge-update; absent fields are untouched
async fn update_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdatePreferencesRequest>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let prefs = PreferencesService::update(state.store(), &auth.user_id, req).await?;
    Ok(Json(prefs))
}
