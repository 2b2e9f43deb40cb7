//! Predefined exercise catalog
//!
//! Static, process-wide reference data, loaded once and immutable. Exercise
//! ids are stable string keys; resolution should check this catalog before
//! falling back to a remote lookup for custom exercises.

use crate::models::{BodyPart, Exercise, MetricType, MovementPattern};
use once_cell::sync::Lazy;

use BodyPart::{Arms, Back, Chest, Core, Legs};
use MetricType::{Isometrics, Reps};
use MovementPattern::{CoreAndCarry, Hinge, Lunge, Pull, Push, Squat};

fn entry(
    id: &str,
    name: &str,
    metric: MetricType,
    primary: BodyPart,
    others: &[BodyPart],
    pattern: MovementPattern,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        metric,
        is_custom: false,
        primary_target: Some(primary),
        other_targets: others.to_vec(),
        movement_pattern: Some(pattern),
    }
}

static CATALOG: Lazy<Vec<Exercise>> = Lazy::new(|| {
    vec![
        // Repetition-based exercises
        entry("pull_ups", "Pull-ups", Reps, Back, &[Arms], Pull),
        entry("push_ups", "Push-ups", Reps, Chest, &[Arms, Core], Push),
        entry("squats", "Squats", Reps, Legs, &[Core], Squat),
        entry("dips", "Dips", Reps, Arms, &[Chest], Push),
        entry("lunges", "Lunges", Reps, Legs, &[], Lunge),
        entry("calf_raises", "Calf Raises", Reps, Legs, &[], Squat),
        entry("hanging_leg_raises", "Hanging Leg Raises", Reps, Core, &[], Pull),
        entry("pistol_squat", "Pistol Squat", Reps, Legs, &[Core], Squat),
        entry("bench_press", "Bench Press", Reps, Chest, &[Arms], Push),
        entry("deadlift", "Deadlift", Reps, Back, &[Legs, Core], Hinge),
        entry("hammer_curl", "Hammer Curl", Reps, Arms, &[], Pull),
        entry("incline_curl", "Incline Curl", Reps, Arms, &[], Pull),
        entry("chin_up", "Chin Up", Reps, Arms, &[Back], Pull),
        entry("bent_over_row", "Bent Over Row", Reps, Back, &[Arms], Pull),
        entry("scapular_pull_up", "Scapular Pull Up", Reps, Back, &[], Pull),
        entry("overhead_press", "Overhead Press", Reps, Arms, &[Core], Push),
        entry("arnold_press", "Arnold Press", Reps, Arms, &[], Push),
        entry("lateral_raises", "Lateral Raises", Reps, Arms, &[], Push),
        entry("pike_push_ups", "Pike Push-ups", Reps, Arms, &[Chest], Push),
        entry("face_pulls", "Face Pulls", Reps, Back, &[Arms], Pull),
        entry("glute_bridges", "Glute Bridges", Reps, Legs, &[Core], Hinge),
        entry("hip_thrusts", "Hip Thrusts", Reps, Legs, &[Core], Hinge),
        entry("romanian_deadlifts", "Romanian Deadlifts", Reps, Legs, &[Back, Core], Hinge),
        entry("step_ups", "Step Ups", Reps, Legs, &[], Lunge),
        entry("incline_bench_press", "Incline Bench Press", Reps, Chest, &[Arms], Push),
        entry("dumbbell_flys", "Dumbbell Flys", Reps, Chest, &[], Push),
        entry("lat_pulldowns", "Lat Pulldowns", Reps, Back, &[Arms], Pull),
        entry("seated_cable_rows", "Seated Cable Rows", Reps, Back, &[Arms], Pull),
        entry("back_extensions", "Back Extensions", Reps, Back, &[Legs], Hinge),
        entry("triceps_pushdowns", "Triceps Pushdowns", Reps, Arms, &[], Push),
        entry("skull_crushers", "Skull Crushers", Reps, Arms, &[], Push),
        entry("preacher_curls", "Preacher Curls", Reps, Arms, &[], Pull),
        entry("russian_twists", "Russian Twists", Reps, Core, &[], CoreAndCarry),
        entry("leg_raises", "Leg Raises", Reps, Core, &[], Squat),
        entry("ab_rollouts", "Ab Rollouts", Reps, Core, &[], Push),
        entry("mountain_climbers", "Mountain Climbers", Reps, Core, &[], CoreAndCarry),
        // Isometric / duration-based exercises
        entry("plank", "Plank", Isometrics, Core, &[], CoreAndCarry),
        entry("wall_sit", "Wall Sit", Isometrics, Legs, &[], Squat),
        entry("hollow_body_hold", "Hollow Body Hold", Isometrics, Core, &[], CoreAndCarry),
        entry("dead_hang", "Dead Hang", Isometrics, Arms, &[Back], Pull),
        entry("l_sit", "L-Sit", Isometrics, Core, &[Arms], Push),
        entry("handstand", "Hand Stand", Isometrics, Arms, &[Core], Push),
        entry("side_plank", "Side Plank", Isometrics, Core, &[], CoreAndCarry),
        entry("hanging_l_sit", "Hanging L Sit", Isometrics, Core, &[Arms], Pull),
        entry("tuck_planche", "Tuck Planche", Isometrics, Arms, &[Core, Chest], Push),
        entry("straddle_planche", "Straddle Planche", Isometrics, Arms, &[Core, Chest], Push),
        entry("front_lever", "Front Lever", Isometrics, Back, &[Core, Arms], Pull),
        entry("back_lever", "Back Lever", Isometrics, Chest, &[Core, Arms], Push),
        entry("human_flag", "Human Flag", Isometrics, Core, &[Arms, Back], CoreAndCarry),
        entry("frog_stand", "Frog Stand", Isometrics, Arms, &[Core], Push),
        entry("crow_pose", "Crow Pose", Isometrics, Arms, &[Core], Push),
    ]
});

/// All predefined exercises, in catalog order
pub fn predefined_exercises() -> &'static [Exercise] {
    &CATALOG
}

/// Look up a predefined exercise by its stable id
pub fn lookup(id: &str) -> Option<&'static Exercise> {
    CATALOG.iter().find(|ex| ex.id == id)
}

/// Picker filter over the catalog
#[derive(Debug, Clone, Default)]
pub struct ExerciseFilter {
    /// Case-insensitive substring match on the exercise name
    pub query: Option<String>,
    pub movement_pattern: Option<MovementPattern>,
    pub body_part: Option<BodyPart>,
}

impl ExerciseFilter {
    /// Whether an exercise passes every set criterion
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let query = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let matches_query = query
            .as_deref()
            .map_or(true, |q| exercise.name.to_lowercase().contains(q));
        let matches_pattern = self
            .movement_pattern
            .map_or(true, |p| exercise.movement_pattern == Some(p));
        let matches_part = self.body_part.map_or(true, |part| exercise.targets(part));
        matches_query && matches_pattern && matches_part
    }
}

/// Filter the catalog and sort the result by name
pub fn filter_and_sort(filter: &ExerciseFilter) -> Vec<&'static Exercise> {
    let mut matched: Vec<&'static Exercise> =
        CATALOG.iter().filter(|ex| filter.matches(ex)).collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));
    matched
}
