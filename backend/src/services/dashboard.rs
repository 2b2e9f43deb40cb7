//! Dashboard state aggregation
//!
//! A per-session task joins the latest active-goal and month-of-sets
//! snapshots (plus the resolved exercise) into one [`DashboardState`] behind
//! a watch channel. Derivation itself is pure; the task only wires live
//! inputs into it and re-runs it whenever either input changes.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use groove_shared::catalog;
use groove_shared::errors::StoreError;
use groove_shared::models::{ActiveGoal, CompletedSet, Exercise, MovementPattern, TargetType};
use groove_shared::types::DateRange;
use sqlx::PgPool;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tracing::{info, warn};

use crate::repositories::exercises::ExerciseRepository;
use crate::store::LogStore;

/// Exercise-name sentinel shown when the user has never set a goal
pub const NO_ACTIVE_GOAL: &str = "No Active Goal";

/// One calendar day's aggregate: how many sets, and which movement patterns
/// they covered (indicator dots)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBucket {
    pub set_count: u32,
    pub patterns: BTreeSet<MovementPattern>,
}

/// Snapshot of everything the dashboard renders
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub active_exercise_name: String,
    pub has_active_goal: bool,
    pub goal_total: i32,
    pub goal_progress: i32,
    pub goal_units: String,
    pub sets_completed_today: u32,
    /// Current month, keyed by the set's user-local day
    pub day_buckets: BTreeMap<NaiveDate, DayBucket>,
}

impl DashboardState {
    /// The state a dashboard shows before sign-in and after sign-out
    pub fn signed_out() -> Self {
        Self {
            active_exercise_name: NO_ACTIVE_GOAL.to_string(),
            has_active_goal: false,
            goal_total: 0,
            goal_progress: 0,
            goal_units: String::new(),
            sets_completed_today: 0,
            day_buckets: BTreeMap::new(),
        }
    }
}

/// Progress toward a goal from today's sets of the goal's exercise
///
/// Sets of other exercises never count, whatever the target type.
pub fn goal_progress(goal: &ActiveGoal, sets: &[CompletedSet], today: NaiveDate) -> i32 {
    let todays = sets
        .iter()
        .filter(|s| s.date == today && s.exercise_id == goal.exercise_id);
    match goal.target_type {
        TargetType::Sets => todays.count() as i32,
        TargetType::Reps => todays.filter_map(|s| s.reps).sum(),
        TargetType::Seconds => todays.filter_map(|s| s.duration_seconds).sum::<f64>() as i32,
        TargetType::Minutes => {
            (todays.filter_map(|s| s.duration_seconds).sum::<f64>() / 60.0).floor() as i32
        }
    }
}

/// Bucket sets by calendar day, exercise-agnostic
///
/// `patterns` maps exercise id to its movement pattern; exercises without a
/// pattern contribute to the count but not the indicators.
pub fn bucket_by_date(
    sets: &[CompletedSet],
    patterns: &HashMap<String, Option<MovementPattern>>,
) -> BTreeMap<NaiveDate, DayBucket> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
    for set in sets {
        let bucket = buckets.entry(set.date).or_default();
        bucket.set_count += 1;
        if let Some(Some(pattern)) = patterns.get(&set.exercise_id) {
            bucket.patterns.insert(*pattern);
        }
    }
    buckets
}

/// Combine the latest snapshots into a dashboard state
pub fn derive(
    goal: Option<&ActiveGoal>,
    exercise_name: Option<&str>,
    sets: &[CompletedSet],
    patterns: &HashMap<String, Option<MovementPattern>>,
    today: NaiveDate,
) -> DashboardState {
    let day_buckets = bucket_by_date(sets, patterns);
    let sets_completed_today = day_buckets
        .get(&today)
        .map(|b| b.set_count)
        .unwrap_or_default();

    match goal {
        Some(goal) => DashboardState {
            active_exercise_name: exercise_name
                .unwrap_or(goal.exercise_id.as_str())
                .to_string(),
            has_active_goal: true,
            goal_total: goal.target_value,
            goal_progress: goal_progress(goal, sets, today),
            goal_units: goal.target_type.units().to_string(),
            sets_completed_today,
            day_buckets,
        },
        None => DashboardState {
            sets_completed_today,
            day_buckets,
            ..DashboardState::signed_out()
        },
    }
}

/// Resolve an exercise id: predefined catalog first, then the user's custom
/// exercises
pub async fn resolve_exercise(
    pool: &PgPool,
    user_id: &str,
    exercise_id: &str,
) -> Result<Option<Exercise>> {
    if let Some(exercise) = catalog::lookup(exercise_id) {
        return Ok(Some(exercise.clone()));
    }
    ExerciseRepository::get_by_id(pool, user_id, exercise_id).await
}

/// Live dashboard for one signed-in user
///
/// Owns the goal and sets subscriptions exclusively. `shutdown` releases
/// them and resets the published state to the signed-out default.
pub struct DashboardAggregator {
    rx: watch::Receiver<DashboardState>,
    shutdown: std::sync::Mutex<Option<oneshot::Sender<()>>>,
}

impl DashboardAggregator {
    /// Open the subscriptions and start the join task
    pub async fn spawn(store: Arc<LogStore>, user_id: &str) -> Result<Self, StoreError> {
        let today = Local::now().date_naive();
        let range = DateRange::month_of(today);
        let goal_sub = store.active_goal(user_id).await?;
        let sets_sub = store.sets_in_range(user_id, range).await?;

        let (tx, rx) = watch::channel(DashboardState::signed_out());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let user_id = user_id.to_string();

        tokio::spawn(async move {
            let mut range = range;
            let mut sets_sub = sets_sub;
            let mut goal_rx = goal_sub.receiver();
            let mut sets_rx = sets_sub.receiver();
            let mut names: HashMap<String, Option<String>> = HashMap::new();
            let mut patterns: HashMap<String, Option<MovementPattern>> = HashMap::new();

            loop {
                let today = Local::now().date_naive();

                // The sets window tracks the calendar month; re-open the
                // subscription once the local day leaves it.
                if let Some(next) = rescope(range, today) {
                    match store.sets_in_range(&user_id, next).await {
                        Ok(sub) => {
                            sets_sub.release();
                            sets_sub = sub;
                            sets_rx = sets_sub.receiver();
                            range = next;
                        }
                        Err(err) => {
                            warn!(user_id, error = %err, "month re-scope failed");
                        }
                    }
                }

                let goal = goal_rx.borrow_and_update().clone();
                let sets = sets_rx.borrow_and_update().clone();

                for id in sets.iter().map(|s| &s.exercise_id) {
                    if !patterns.contains_key(id) {
                        let pattern = match resolve_exercise(store.pool(), &user_id, id).await {
                            Ok(exercise) => exercise.and_then(|e| e.movement_pattern),
                            Err(err) => {
                                warn!(user_id, exercise_id = %id, error = %err,
                                      "pattern lookup failed");
                                None
                            }
                        };
                        patterns.insert(id.clone(), pattern);
                    }
                }

                let exercise_name = match &goal {
                    Some(goal) => {
                        if !names.contains_key(&goal.exercise_id) {
                            let name = match resolve_exercise(store.pool(), &user_id, &goal.exercise_id)
                                .await
                            {
                                Ok(exercise) => exercise.map(|e| e.name),
                                Err(err) => {
                                    warn!(user_id, exercise_id = %goal.exercise_id,
                                          error = %err, "exercise lookup failed");
                                    None
                                }
                            };
                            names.insert(goal.exercise_id.clone(), name);
                        }
                        names.get(&goal.exercise_id).and_then(|n| n.clone())
                    }
                    None => None,
                };

                let state = derive(
                    goal.as_ref(),
                    exercise_name.as_deref(),
                    &sets,
                    &patterns,
                    today,
                );
                if tx.send(state).is_err() {
                    break;
                }

                tokio::select! {
                    _ = &mut shutdown_rx => {
                        goal_sub.release();
                        sets_sub.release();
                        let _ = tx.send(DashboardState::signed_out());
                        info!(user_id, "dashboard aggregator shut down");
                        break;
                    }
                    changed = goal_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = sets_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Ok(Self {
            rx,
            shutdown: std::sync::Mutex::new(Some(shutdown_tx)),
        })
    }

    /// Receiver for awaiting dashboard changes
    pub fn state(&self) -> watch::Receiver<DashboardState> {
        self.rx.clone()
    }

    /// Snapshot of the latest dashboard state
    pub fn current(&self) -> DashboardState {
        self.rx.borrow().clone()
    }

    /// Release the subscriptions and reset to the signed-out state.
    /// Idempotent.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.shutdown.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(());
            }
        }
    }
}

/// The whole calendar month for a year/month pair, if valid
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    NaiveDate::from_ymd_opt(year, month, 1).map(DateRange::month_of)
}

/// The month to move the sets window to once `today` has left `current`
fn rescope(current: DateRange, today: NaiveDate) -> Option<DateRange> {
    if current.contains(today) {
        None
    } else {
        Some(DateRange::month_of(today))
    }
}
