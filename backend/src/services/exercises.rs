//! Exercise picker: the predefined catalog merged with the user's custom
//! exercises

use groove_shared::catalog::{self, ExerciseFilter};
use groove_shared::models::Exercise;
use groove_shared::types::{CreateExerciseRequest, ExercisesQuery};
use tracing::info;
use validator::Validate;

use super::dashboard::resolve_exercise;
use crate::error::{ApiError, ApiResult};
use crate::repositories::exercises::{CreateCustomExercise, ExerciseRepository};
use crate::store::LogStore;

/// Exercise lookup operations
pub struct ExerciseService;

impl ExerciseService {
    /// Filtered picker list: predefined plus custom, sorted by name
    pub async fn list(
        store: &LogStore,
        user_id: &str,
        query: ExercisesQuery,
    ) -> ApiResult<Vec<Exercise>> {
        let filter = ExerciseFilter {
            query: query.q,
            movement_pattern: query.movement_pattern,
            body_part: query.body_part,
        };

        let mut exercises: Vec<Exercise> = catalog::filter_and_sort(&filter)
            .into_iter()
            .cloned()
            .collect();

        let custom = ExerciseRepository::list_for_user(store.pool(), user_id).await?;
        exercises.extend(custom.into_iter().filter(|ex| filter.matches(ex)));
        exercises.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(exercises)
    }

    /// Create a custom exercise; its id is the slug of its name and must not
    /// collide with a predefined or existing custom id
    pub async fn create(
        store: &LogStore,
        user_id: &str,
        request: CreateExerciseRequest,
    ) -> ApiResult<Exercise> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let id = slugify(&request.name);
        if id.is_empty() {
            return Err(ApiError::Validation(
                "Name must contain at least one letter or digit".to_string(),
            ));
        }
        if resolve_exercise(store.pool(), user_id, &id).await?.is_some() {
            return Err(ApiError::BadRequest(format!(
                "An exercise with id {} already exists",
                id
            )));
        }

        let exercise = ExerciseRepository::create(
            store.pool(),
            user_id,
            CreateCustomExercise {
                id,
                name: request.name,
                metric: request.metric,
                primary_target: request.primary_target,
                other_targets: request.other_targets,
                movement_pattern: request.movement_pattern,
            },
        )
        .await?;

        info!(user_id, exercise_id = %exercise.id, "custom exercise created");
        Ok(exercise)
    }
}

/// Stable id from a display name: lowercased, non-alphanumeric runs collapse
/// to single underscores
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Weighted Carries", "weighted_carries")]
    #[case("  One-Arm Push-up!  ", "one_arm_push_up")]
    #[case("L-Sit", "l_sit")]
    #[case("???", "")]
    fn slugs_are_stable_ids(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }
}
