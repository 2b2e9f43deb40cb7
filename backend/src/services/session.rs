//! Per-user session state
//!
//! One [`Session`] per signed-in user id, owning that user's dashboard
//! aggregator, its live preferences subscription, and the in-memory
//! last-weight cache. Sign-out tears the whole session down; nothing here is
//! persisted, and a later sign-in (same user or another) starts from a fresh
//! session.

use groove_shared::errors::StoreError;
use groove_shared::models::{UserPreferences, WeightUnit};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::dashboard::DashboardAggregator;
use crate::store::{LogStore, Subscription};

/// In-memory map of exercise id -> last logged added weight, canonical
/// pounds. Dies with the session.
#[derive(Debug, Default)]
pub struct WeightCache {
    weights: std::sync::Mutex<HashMap<String, f64>>,
}

impl WeightCache {
    pub fn get(&self, exercise_id: &str) -> Option<f64> {
        self.weights
            .lock()
            .ok()
            .and_then(|weights| weights.get(exercise_id).copied())
    }

    pub fn insert(&self, exercise_id: &str, weight_lb: f64) {
        if let Ok(mut weights) = self.weights.lock() {
            weights.insert(exercise_id.to_string(), weight_lb);
        }
    }
}

/// Everything scoped to one signed-in user
pub struct Session {
    user_id: String,
    dashboard: DashboardAggregator,
    preferences: Subscription<UserPreferences>,
    last_weights: WeightCache,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn dashboard(&self) -> &DashboardAggregator {
        &self.dashboard
    }

    /// The user's weight display unit, served from the live preferences
    /// subscription rather than a per-request query
    pub fn display_unit(&self) -> WeightUnit {
        self.preferences.current().weight_unit
    }

    /// Last added weight logged for this exercise, for pre-filling the next
    /// entry
    pub fn last_weight(&self, exercise_id: &str) -> Option<f64> {
        self.last_weights.get(exercise_id)
    }

    /// Remember the added weight from a just-logged set
    pub fn remember_weight(&self, exercise_id: &str, weight_lb: f64) {
        self.last_weights.insert(exercise_id, weight_lb);
    }

    fn shutdown(&self) {
        self.preferences.release();
        self.dashboard.shutdown();
    }
}

/// Registry of live sessions, keyed by user id
pub struct SessionRegistry {
    store: Arc<LogStore>,
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionRegistry {
    pub fn new(store: Arc<LogStore>) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The user's session, spawning its aggregator on first use
    pub async fn get_or_spawn(&self, user_id: &str) -> Result<Arc<Session>, StoreError> {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(user_id) {
            return Ok(session.clone());
        }

        info!(user_id, "starting session");
        let preferences = self.store.preferences(user_id).await?;
        let dashboard = match DashboardAggregator::spawn(self.store.clone(), user_id).await {
            Ok(dashboard) => dashboard,
            Err(err) => {
                preferences.release();
                return Err(err);
            }
        };
        let session = Arc::new(Session {
            user_id: user_id.to_string(),
            dashboard,
            preferences,
            last_weights: WeightCache::default(),
        });
        sessions.insert(user_id.to_string(), session.clone());
        Ok(session)
    }

    /// Tear down the user's session: releases its subscriptions and drops
    /// the weight cache. A no-op for users with no session.
    pub async fn sign_out(&self, user_id: &str) {
        let session = self.sessions.lock().await.remove(user_id);
        if let Some(session) = session {
            info!(user_id, "ending session");
            session.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_cache_keeps_the_latest_value() {
        let cache = WeightCache::default();
        assert_eq!(cache.get("dips"), None);
        cache.insert("dips", 25.0);
        cache.insert("dips", 35.0);
        assert_eq!(cache.get("dips"), Some(35.0));
        assert_eq!(cache.get("pull_ups"), None);
    }
}
