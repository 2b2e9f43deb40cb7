//! Input validation for goal and set submissions
//!
//! These are the client-side pre-submit guards: advisory, not authoritative.
//! The store performs no independent validation.

use crate::models::MetricType;

/// Largest accepted rep count for a single set
pub const MAX_REPS: i32 = 256;

/// Longest accepted hold duration for a single set, in seconds
pub const MAX_DURATION_SECONDS: f64 = 999.0;

/// A validation failure tied to a specific input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a rep count: positive integer, at most [`MAX_REPS`]
pub fn validate_reps(reps: i32) -> Result<(), FieldError> {
    if reps <= 0 {
        return Err(FieldError::new("reps", "Reps must be a positive number"));
    }
    if reps > MAX_REPS {
        return Err(FieldError::new(
            "reps",
            format!("Reps cannot exceed {}", MAX_REPS),
        ));
    }
    Ok(())
}

/// Validate a hold duration: positive, at most [`MAX_DURATION_SECONDS`]
pub fn validate_duration_seconds(duration: f64) -> Result<(), FieldError> {
    if duration.is_nan() || duration.is_infinite() {
        return Err(FieldError::new(
            "duration_seconds",
            "Duration must be a valid number",
        ));
    }
    if duration <= 0.0 {
        return Err(FieldError::new(
            "duration_seconds",
            "Duration must be a positive number",
        ));
    }
    if duration > MAX_DURATION_SECONDS {
        return Err(FieldError::new(
            "duration_seconds",
            format!("Duration cannot exceed {} seconds", MAX_DURATION_SECONDS),
        ));
    }
    Ok(())
}

/// Validate an added-weight entry (display units, any unit)
pub fn validate_weight_added(weight: f64) -> Result<(), FieldError> {
    if weight.is_nan() || weight.is_infinite() || weight < 0.0 {
        return Err(FieldError::new(
            "weight_added",
            "Weight must be a non-negative number",
        ));
    }
    Ok(())
}

/// Validate a goal target value
pub fn validate_target_value(value: i32) -> Result<(), FieldError> {
    if value <= 0 {
        return Err(FieldError::new(
            "target_value",
            "Target must be a positive number",
        ));
    }
    Ok(())
}

/// Validate a set submission against the exercise's metric type
///
/// The metric's required field must be present and in range; the other field
/// is validated only when supplied.
pub fn validate_set_entry(
    metric: MetricType,
    reps: Option<i32>,
    duration_seconds: Option<f64>,
) -> Result<(), FieldError> {
    match metric {
        MetricType::Reps => match reps {
            Some(r) => validate_reps(r)?,
            None => return Err(FieldError::new("reps", "Reps are required for this exercise")),
        },
        MetricType::Isometrics => match duration_seconds {
            Some(d) => validate_duration_seconds(d)?,
            None => {
                return Err(FieldError::new(
                    "duration_seconds",
                    "Duration is required for this exercise",
                ))
            }
        },
    }
    if let Some(r) = reps {
        validate_reps(r)?;
    }
    if let Some(d) = duration_seconds {
        validate_duration_seconds(d)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(10, true)]
    #[case(256, true)]
    #[case(257, false)]
    #[case(0, false)]
    #[case(-5, false)]
    fn reps_bounds(#[case] reps: i32, #[case] ok: bool) {
        assert_eq!(validate_reps(reps).is_ok(), ok);
    }

    #[rstest]
    #[case(0.5, true)]
    #[case(999.0, true)]
    #[case(999.1, false)]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    fn duration_bounds(#[case] duration: f64, #[case] ok: bool) {
        assert_eq!(validate_duration_seconds(duration).is_ok(), ok);
    }

    #[test]
    fn reps_exercise_requires_reps_field() {
        let err = validate_set_entry(MetricType::Reps, None, Some(30.0)).unwrap_err();
        assert_eq!(err.field, "reps");
    }

    #[test]
    fn isometric_exercise_requires_duration_field() {
        let err = validate_set_entry(MetricType::Isometrics, Some(10), None).unwrap_err();
        assert_eq!(err.field, "duration_seconds");
    }

    #[test]
    fn optional_extra_field_is_still_bounded() {
        let err = validate_set_entry(MetricType::Reps, Some(10), Some(2000.0)).unwrap_err();
        assert_eq!(err.field, "duration_seconds");
    }

    #[test]
    fn valid_entries_pass() {
        assert!(validate_set_entry(MetricType::Reps, Some(12), None).is_ok());
        assert!(validate_set_entry(MetricType::Isometrics, None, Some(60.0)).is_ok());
    }

    #[test]
    fn target_value_must_be_positive() {
        assert!(validate_target_value(50).is_ok());
        assert!(validate_target_value(0).is_err());
    }
}
