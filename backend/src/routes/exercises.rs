//! Exercise catalog API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::exercises::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use groove_shared::models::Exercise;
use groove_shared::types::{CreateExerciseRequest, ExercisesQuery};

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new().route("/", get(list_exercises).post(create_exercise))
}

/// GET /api/v1/exercises - Picker list: predefined plus the user's custom
/// exercises, filtered and sorted by name
async fn list_exercises(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ExercisesQuery>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let exercises = ExerciseService::list(state.store(), &auth.user_id, query).await?;
    Ok(Json(exercises))
}

/// POST /api/v1/exercises - Create a custom exercise
async fn create_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateExerciseRequest>,
) -> Result<Json<Exercise>, ApiError> {
    let exercise = ExerciseService::create(state.store(), &auth.user_id, req).await?;
    Ok(Json(exercise))
}
