//! Preferences read and merge-update

use groove_shared::models::{UserPreferences, QUICK_LOG_SLOTS};
use groove_shared::types::{PreferencesResponse, UpdatePreferencesRequest};
use groove_shared::validation::FieldError;
use tracing::info;

use super::dashboard::resolve_exercise;
use crate::error::{ApiError, ApiResult};
use crate::repositories::preferences::{PreferencesRepository, PreferencesUpdate};
use crate::store::{Collection, LogStore};

/// Preferences operations
pub struct PreferencesService;

impl PreferencesService {
    /// Current preferences, defaults when the user has never saved any
    pub async fn get(store: &LogStore, user_id: &str) -> ApiResult<PreferencesResponse> {
        let prefs = PreferencesRepository::get_or_defaults(store.pool(), user_id).await?;
        Ok(to_response(prefs))
    }

    /// Merge an update into the stored document; absent fields are untouched
    ///
    /// Quick-log slots must be in range and name resolvable exercises.
    pub async fn update(
        store: &LogStore,
        user_id: &str,
        request: UpdatePreferencesRequest,
    ) -> ApiResult<PreferencesResponse> {
        if let Some(slots) = &request.quick_log_exercises {
            for (slot, exercise_id) in slots {
                if *slot >= QUICK_LOG_SLOTS {
                    return Err(ApiError::Field(FieldError {
                        field: "quick_log_exercises",
                        message: format!(
                            "Slot {} is out of range (0..={})",
                            slot,
                            QUICK_LOG_SLOTS - 1
                        ),
                    }));
                }
                if resolve_exercise(store.pool(), user_id, exercise_id)
                    .await?
                    .is_none()
                {
                    return Err(ApiError::Field(FieldError {
                        field: "quick_log_exercises",
                        message: format!("Unknown exercise: {}", exercise_id),
                    }));
                }
            }
        }

        let prefs = PreferencesRepository::merge_upsert(
            store.pool(),
            user_id,
            PreferencesUpdate {
                quick_log_exercises: request.quick_log_exercises,
                weight_unit: request.weight_unit,
                theme: request.theme,
            },
        )
        .await?;

        info!(user_id, "preferences updated");
        store.publish(user_id, Collection::Preferences);

        Ok(to_response(prefs))
    }
}

fn to_response(prefs: UserPreferences) -> PreferencesResponse {
    PreferencesResponse {
        quick_log_exercises: prefs.quick_log_exercises,
        weight_unit: prefs.weight_unit,
        theme: prefs.theme,
    }
}
