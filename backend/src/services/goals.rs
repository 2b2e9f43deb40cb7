//! Goal mutation and lookup

use groove_shared::models::ActiveGoal;
use groove_shared::types::{CreateGoalRequest, GoalResponse};
use groove_shared::validation::validate_target_value;
use tracing::info;
use validator::Validate;

use super::dashboard::resolve_exercise;
use crate::error::{ApiError, ApiResult};
use crate::repositories::goals::{CreateGoal, GoalRepository};
use crate::store::{Collection, LogStore};

/// Goal operations
pub struct GoalService;

impl GoalService {
    /// Set a new goal. Prior goals are superseded by recency, never deleted.
    /// A failed write surfaces to the caller; nothing retries it.
    pub async fn create_goal(
        store: &LogStore,
        user_id: &str,
        request: CreateGoalRequest,
    ) -> ApiResult<GoalResponse> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        validate_target_value(request.target_value)?;

        let exercise = resolve_exercise(store.pool(), user_id, &request.exercise_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Unknown exercise: {}", request.exercise_id))
            })?;

        let goal = GoalRepository::create(
            store.pool(),
            CreateGoal {
                user_id: user_id.to_string(),
                exercise_id: request.exercise_id,
                goal_frequency: request.goal_frequency,
                target_type: request.target_type,
                target_value: request.target_value,
            },
        )
        .await?;

        info!(user_id, exercise_id = %goal.exercise_id, "goal created");
        store.publish(user_id, Collection::ActiveGoals);

        Ok(to_response(goal, exercise.name))
    }

    /// The user's current goal, if they have ever set one
    pub async fn active_goal(store: &LogStore, user_id: &str) -> ApiResult<Option<GoalResponse>> {
        let goal = match GoalRepository::latest_for_user(store.pool(), user_id).await? {
            Some(goal) => goal,
            None => return Ok(None),
        };

        let name = resolve_exercise(store.pool(), user_id, &goal.exercise_id)
            .await?
            .map(|e| e.name)
            .unwrap_or_else(|| goal.exercise_id.clone());

        Ok(Some(to_response(goal, name)))
    }
}

fn to_response(goal: ActiveGoal, exercise_name: String) -> GoalResponse {
    GoalResponse {
        id: goal.id.to_string(),
        exercise_id: goal.exercise_id,
        exercise_name,
        goal_frequency: goal.goal_frequency,
        target_type: goal.target_type,
        target_value: goal.target_value,
        date_set: goal.date_set,
    }
}
