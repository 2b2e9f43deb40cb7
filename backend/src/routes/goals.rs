//! Goal API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::goals::GoalService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use groove_shared::types::{CreateGoalRequest, GoalResponse};
use serde::Serialize;

/// Create goal routes
pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_goal))
        .route("/active", get(active_goal))
}

/// GET /api/v1/goals/active response; `goal` is null when none was ever set
#[derive(Serialize)]
struct ActiveGoalResponse {
    goal: Option<GoalResponse>,
}

/// POST /api/v1/goals - Set a new goal, superseding the previous one
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGoalRequest>,
) -> Result<Json<GoalResponse>, ApiError> {
    let goal = GoalService::create_goal(state.store(), &auth.user_id, req).await?;
    Ok(Json(goal))
}

/// GET /api/v1/goals/active - The user's current goal
async fn active_goal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ActiveGoalResponse>, ApiError> {
    let goal = GoalService::active_goal(state.store(), &auth.user_id).await?;
    Ok(Json(ActiveGoalResponse { goal }))
}
