//! Remote log store
//!
//! Live-query layer over the repositories. Writers publish a [`ChangeEvent`]
//! after every successful mutation; each open [`Subscription`] re-runs its
//! query when an event matches its user and collection and pushes the fresh
//! result through a watch channel. Consumers therefore always see the latest
//! committed snapshot without polling.
//!
//! Subscriptions are released explicitly. Dropping one without calling
//! [`Subscription::release`] leaves its task running until the store itself
//! is dropped.

use groove_shared::errors::StoreError;
use groove_shared::models::{ActiveGoal, CompletedSet, UserPreferences};
use groove_shared::types::DateRange;
use sqlx::PgPool;
use std::future::Future;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::repositories::goals::GoalRepository;
use crate::repositories::preferences::PreferencesRepository;
use crate::repositories::sets::SetRepository;

/// Collections a subscription can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    ActiveGoals,
    CompletedSets,
    Preferences,
}

/// Notification that a user's data in one collection changed
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub user_id: String,
    pub collection: Collection,
}

/// Buffered change events per store; a lagged subscriber re-queries anyway
const CHANGE_BUFFER: usize = 256;

/// A live query handle
///
/// Holds the latest query result and updates it as matching changes land.
/// `release` stops the underlying refresh task.
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T: Clone> Subscription<T> {
    /// A fresh receiver for awaiting changes
    pub fn receiver(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }

    /// Snapshot of the latest value
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Stop refreshing. The last value remains readable from any receiver.
    pub fn release(&self) {
        self.task.abort();
    }
}

/// Store facade owning the change bus
pub struct LogStore {
    pool: PgPool,
    changes: broadcast::Sender<ChangeEvent>,
}

impl LogStore {
    pub fn new(pool: PgPool) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self { pool, changes }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Announce a committed mutation. No receivers is fine; nobody is
    /// watching this user right now.
    pub fn publish(&self, user_id: &str, collection: Collection) {
        let event = ChangeEvent {
            user_id: user_id.to_string(),
            collection,
        };
        debug!(user_id, ?collection, "publishing change event");
        let _ = self.changes.send(event);
    }

    /// Live query for the user's most recent goal
    pub async fn active_goal(
        &self,
        user_id: &str,
    ) -> Result<Subscription<Option<ActiveGoal>>, StoreError> {
        let pool = self.pool.clone();
        let uid = user_id.to_string();
        self.subscribe(user_id, Collection::ActiveGoals, move || {
            let pool = pool.clone();
            let uid = uid.clone();
            async move { GoalRepository::latest_for_user(&pool, &uid).await }
        })
        .await
    }

    /// Live query for the user's sets within a fixed date range
    pub async fn sets_in_range(
        &self,
        user_id: &str,
        range: DateRange,
    ) -> Result<Subscription<Vec<CompletedSet>>, StoreError> {
        let pool = self.pool.clone();
        let uid = user_id.to_string();
        self.subscribe(user_id, Collection::CompletedSets, move || {
            let pool = pool.clone();
            let uid = uid.clone();
            async move { SetRepository::in_range(&pool, &uid, range.start, range.end).await }
        })
        .await
    }

    /// Live query for the user's preferences document
    pub async fn preferences(
        &self,
        user_id: &str,
    ) -> Result<Subscription<UserPreferences>, StoreError> {
        let pool = self.pool.clone();
        let uid = user_id.to_string();
        self.subscribe(user_id, Collection::Preferences, move || {
            let pool = pool.clone();
            let uid = uid.clone();
            async move { PreferencesRepository::get_or_defaults(&pool, &uid).await }
        })
        .await
    }

    /// Run the query once for the initial value, then keep it fresh as
    /// matching events arrive. A failed re-query keeps the previous value;
    /// a lagged event stream forces an unconditional re-query.
    async fn subscribe<T, F, Fut>(
        &self,
        user_id: &str,
        collection: Collection,
        query: F,
    ) -> Result<Subscription<T>, StoreError>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let initial = query()
            .await
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let (tx, rx) = watch::channel(initial);
        let mut events = self.changes.subscribe();
        let user_id = user_id.to_string();

        let task = tokio::spawn(async move {
            loop {
                let refresh = match events.recv().await {
                    Ok(event) => event.user_id == user_id && event.collection == collection,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(user_id, ?collection, skipped, "change stream lagged");
                        true
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if !refresh {
                    continue;
                }
                match query().await {
                    Ok(value) => {
                        if tx.send(value).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(user_id, ?collection, error = %err, "re-query failed");
                    }
                }
            }
        });

        Ok(Subscription { rx, task })
    }
}
