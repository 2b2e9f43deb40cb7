//! Dashboard and calendar API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::sets::SetRepository;
use crate::services::dashboard::{self, DashboardState};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use groove_shared::models::MovementPattern;
use groove_shared::types::{CalendarDayResponse, CalendarQuery, CalendarResponse, DashboardResponse};
use std::collections::HashMap;
use tracing::warn;

/// Create dashboard routes
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/calendar", get(get_calendar))
}

/// GET /api/v1/dashboard - Latest aggregated snapshot
///
/// Served from the session's live aggregator; a request after a server
/// restart re-spawns it on demand.
async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let session = state.sessions().get_or_spawn(&auth.user_id).await?;
    Ok(Json(to_response(session.dashboard().current())))
}

/// GET /api/v1/dashboard/calendar - Day buckets for one calendar month
///
/// Exercise-agnostic: every logged set counts, whatever the active goal.
async fn get_calendar(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let range = dashboard::month_range(query.year, query.month).ok_or_else(|| {
        ApiError::BadRequest(format!("Invalid month: {}-{}", query.year, query.month))
    })?;

    let sets = SetRepository::in_range(state.db(), &auth.user_id, range.start, range.end).await?;

    let mut patterns: HashMap<String, Option<MovementPattern>> = HashMap::new();
    for id in sets.iter().map(|s| &s.exercise_id) {
        if !patterns.contains_key(id) {
            let pattern = match dashboard::resolve_exercise(state.db(), &auth.user_id, id).await {
                Ok(exercise) => exercise.and_then(|e| e.movement_pattern),
                Err(err) => {
                    warn!(user_id = %auth.user_id, exercise_id = %id, error = %err,
                          "pattern lookup failed");
                    None
                }
            };
            patterns.insert(id.clone(), pattern);
        }
    }

    let days = dashboard::bucket_by_date(&sets, &patterns)
        .into_iter()
        .map(|(date, bucket)| CalendarDayResponse {
            date,
            set_count: bucket.set_count,
            patterns: bucket.patterns.into_iter().collect(),
        })
        .collect();

    Ok(Json(CalendarResponse {
        year: query.year,
        month: query.month,
        days,
    }))
}

fn to_response(state: DashboardState) -> DashboardResponse {
    DashboardResponse {
        active_exercise_name: state.active_exercise_name,
        has_active_goal: state.has_active_goal,
        goal_total: state.goal_total,
        goal_progress: state.goal_progress,
        goal_units: state.goal_units,
        sets_completed_today: state.sets_completed_today,
    }
}
