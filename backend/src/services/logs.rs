//! Set logging and the daily log
//!
//! Weight is converted between the user's display unit and canonical pounds
//! here, at the boundary; everything below this layer is pounds only.

use chrono::{Local, NaiveDate};
use groove_shared::models::{CompletedSet, WeightUnit};
use groove_shared::types::{
    DailyLogResponse, ExerciseStatsResponse, LastWeightResponse, LogSetRequest, SetResponse,
    SetsQuery, UpdateSetRequest,
};
use groove_shared::validation::{validate_set_entry, validate_weight_added};
use tracing::info;
use uuid::Uuid;

use super::dashboard::resolve_exercise;
use super::session::SessionRegistry;
use crate::error::{ApiError, ApiResult};
use crate::repositories::sets::{CreateSet, SetRepository, UpdateSet};
use crate::store::{Collection, LogStore};

/// Set-log operations
pub struct LogService;

impl LogService {
    /// Log one completed set
    ///
    /// The exercise's metric type decides which field is required. `date` is
    /// stamped with today's local day, `timestamp` with server time. A
    /// logged weight refreshes the session's pre-fill cache.
    pub async fn log_set(
        store: &LogStore,
        sessions: &SessionRegistry,
        user_id: &str,
        request: LogSetRequest,
    ) -> ApiResult<SetResponse> {
        let exercise = resolve_exercise(store.pool(), user_id, &request.exercise_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("Unknown exercise: {}", request.exercise_id))
            })?;

        validate_set_entry(exercise.metric, request.reps, request.duration_seconds)?;
        if let Some(weight) = request.weight_added {
            validate_weight_added(weight)?;
        }

        let session = sessions.get_or_spawn(user_id).await?;
        let unit = session.display_unit();
        let weight_lb = request.weight_added.map(|w| unit.to_lb(w));

        let set = SetRepository::create(
            store.pool(),
            CreateSet {
                user_id: user_id.to_string(),
                exercise_id: request.exercise_id,
                date: Local::now().date_naive(),
                reps: request.reps,
                duration_seconds: request.duration_seconds,
                weight_added_lb: weight_lb,
                user_completed_at: request.user_completed_at,
                notes: request.notes,
            },
        )
        .await?;

        info!(user_id, exercise_id = %set.exercise_id, "set logged");
        if let Some(lb) = set.weight_added_lb {
            session.remember_weight(&set.exercise_id, lb);
        }
        store.publish(user_id, Collection::CompletedSets);

        Ok(to_response(set, unit))
    }

    /// Edit a set in place; absent fields keep their stored values
    pub async fn update_set(
        store: &LogStore,
        sessions: &SessionRegistry,
        user_id: &str,
        id: Uuid,
        request: UpdateSetRequest,
    ) -> ApiResult<SetResponse> {
        if let Some(reps) = request.reps {
            groove_shared::validation::validate_reps(reps)?;
        }
        if let Some(duration) = request.duration_seconds {
            groove_shared::validation::validate_duration_seconds(duration)?;
        }
        if let Some(weight) = request.weight_added {
            validate_weight_added(weight)?;
        }

        let session = sessions.get_or_spawn(user_id).await?;
        let unit = session.display_unit();
        let updates = UpdateSet {
            reps: request.reps,
            duration_seconds: request.duration_seconds,
            weight_added_lb: request.weight_added.map(|w| unit.to_lb(w)),
            user_completed_at: request.user_completed_at,
            notes: request.notes,
        };

        let set = SetRepository::update(store.pool(), id, user_id, updates)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Set not found: {}", id)))?;

        info!(user_id, set_id = %id, "set updated");
        store.publish(user_id, Collection::CompletedSets);

        Ok(to_response(set, unit))
    }

    /// Remove a set
    pub async fn delete_set(store: &LogStore, user_id: &str, id: Uuid) -> ApiResult<()> {
        let deleted = SetRepository::delete(store.pool(), id, user_id).await?;
        if !deleted {
            return Err(ApiError::NotFound(format!("Set not found: {}", id)));
        }

        info!(user_id, set_id = %id, "set deleted");
        store.publish(user_id, Collection::CompletedSets);
        Ok(())
    }

    /// Sets within a date range, newest first; defaults to today
    pub async fn list_sets(
        store: &LogStore,
        sessions: &SessionRegistry,
        user_id: &str,
        query: SetsQuery,
    ) -> ApiResult<Vec<SetResponse>> {
        let today = Local::now().date_naive();
        let start = query.start.unwrap_or(today);
        let end = query.end.unwrap_or(today);
        if start > end {
            return Err(ApiError::BadRequest(
                "Start date is after end date".to_string(),
            ));
        }

        let session = sessions.get_or_spawn(user_id).await?;
        let unit = session.display_unit();
        let sets = SetRepository::in_range(store.pool(), user_id, start, end).await?;
        Ok(sets.into_iter().map(|s| to_response(s, unit)).collect())
    }

    /// One day's sets with per-exercise totals; defaults to today
    pub async fn daily_log(
        store: &LogStore,
        sessions: &SessionRegistry,
        user_id: &str,
        date: Option<NaiveDate>,
    ) -> ApiResult<DailyLogResponse> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let session = sessions.get_or_spawn(user_id).await?;
        let unit = session.display_unit();
        let sets = SetRepository::in_range(store.pool(), user_id, date, date).await?;

        let mut exercises: Vec<ExerciseStatsResponse> = Vec::new();
        for set in &sets {
            let idx = match exercises
                .iter()
                .position(|s| s.exercise_id == set.exercise_id)
            {
                Some(idx) => idx,
                None => {
                    let name = resolve_exercise(store.pool(), user_id, &set.exercise_id)
                        .await?
                        .map(|e| e.name)
                        .unwrap_or_else(|| set.exercise_id.clone());
                    exercises.push(ExerciseStatsResponse {
                        exercise_id: set.exercise_id.clone(),
                        exercise_name: name,
                        total_sets: 0,
                        total_reps: None,
                        total_duration_seconds: None,
                    });
                    exercises.len() - 1
                }
            };
            let stats = &mut exercises[idx];
            stats.total_sets += 1;
            if let Some(reps) = set.reps {
                stats.total_reps = Some(stats.total_reps.unwrap_or(0) + reps);
            }
            if let Some(duration) = set.duration_seconds {
                stats.total_duration_seconds =
                    Some(stats.total_duration_seconds.unwrap_or(0.0) + duration);
            }
        }

        Ok(DailyLogResponse {
            date,
            exercises,
            sets: sets.into_iter().map(|s| to_response(s, unit)).collect(),
        })
    }

    /// Last added weight for an exercise in the display unit, for
    /// pre-filling the weight field of the next entry
    pub async fn last_weight(
        sessions: &SessionRegistry,
        user_id: &str,
        exercise_id: &str,
    ) -> ApiResult<LastWeightResponse> {
        let session = sessions.get_or_spawn(user_id).await?;
        let unit = session.display_unit();
        Ok(LastWeightResponse {
            exercise_id: exercise_id.to_string(),
            weight_added: session
                .last_weight(exercise_id)
                .map(|lb| unit.from_lb(lb)),
            weight_unit: unit,
        })
    }
}

fn to_response(set: CompletedSet, unit: WeightUnit) -> SetResponse {
    SetResponse {
        id: set.id.to_string(),
        exercise_id: set.exercise_id,
        date: set.date,
        timestamp: set.timestamp,
        reps: set.reps,
        duration_seconds: set.duration_seconds,
        weight_added: set.weight_added_lb.map(|lb| unit.from_lb(lb)),
        weight_unit: unit,
        user_completed_at: set.user_completed_at,
        notes: set.notes,
    }
}
