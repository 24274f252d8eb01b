//! Recognition Manager - shared-state facade over the aggregate store
//!
//! Holds the current [`AppState`] behind a lock, runs pure transitions on a
//! copy, swaps the result in, and writes a snapshot when a store is
//! attached.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::badges::BadgeCatalog;
use crate::error::RecognitionError;
use crate::gate::{can_recognize_multiple, validate_recipient_ids, GateCheck, GateRules};
use crate::model::{Award, NewRecognition, Notification, Recognition, RecognitionType, User};
use crate::seed::demo_state;
use crate::store::{
    actions, create_recognition, selectors, Analytics, AppState, LeaderboardEntry,
    LeaderboardPeriod, RecognitionReceipt, SnapshotStore,
};
use crate::util::{Clock, SystemClock};

/// Main recognition manager
pub struct RecognitionManager {
    state: Arc<RwLock<AppState>>,
    rules: GateRules,
    badges: BadgeCatalog,

    /// Local snapshot, written after every successful change
    store: Option<Arc<SnapshotStore>>,

    clock: Arc<dyn Clock>,
}

impl RecognitionManager {
    pub fn new(rules: GateRules) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            rules,
            badges: BadgeCatalog::default(),
            store: None,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_snapshot_store(mut self, store: Arc<SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_badges(mut self, badges: BadgeCatalog) -> Self {
        self.badges = badges;
        self
    }

    pub fn with_state(self, state: AppState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            ..self
        }
    }

    pub fn rules(&self) -> &GateRules {
        &self.rules
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Replace the in-memory state with the stored snapshot.
    /// Returns the number of users loaded.
    pub async fn load(&self) -> Result<usize> {
        let Some(ref store) = self.store else {
            return Ok(self.state.read().await.users.len());
        };

        let loaded = store.load().await?;
        let users = loaded.users.len();
        *self.state.write().await = loaded;

        info!(users = users, path = %store.path().display(), "Recognition state loaded");
        Ok(users)
    }

    /// Load the demo data set if the state is empty. Returns true if it seeded.
    pub async fn seed_if_empty(&self) -> bool {
        let now = self.now();
        {
            let mut state = self.state.write().await;
            if !state.is_empty() {
                return false;
            }
            *state = demo_state(&self.rules, &self.badges, now);
        }
        info!("Seeded demo data");
        self.persist().await;
        true
    }

    /// Write the current state to the snapshot store, if any.
    ///
    /// Failures are logged; the in-memory state stays authoritative.
    pub async fn persist(&self) {
        let Some(ref store) = self.store else {
            return;
        };

        let snapshot = self.state.read().await.clone();
        if let Err(e) = store.save(&snapshot, self.now()).await {
            warn!(error = %e, "Failed to persist recognition state");
        }
    }

    /// Run the recognition transaction and publish the result.
    pub async fn create_recognition(
        &self,
        input: NewRecognition,
    ) -> Result<RecognitionReceipt, RecognitionError> {
        let now = self.now();
        let receipt = {
            let mut state = self.state.write().await;
            match create_recognition(&state, &input, &self.rules, &self.badges, now) {
                Ok((next, receipt)) => {
                    *state = next;
                    receipt
                }
                Err(e) => {
                    warn!(
                        giver = %input.giver_id,
                        kind = ?input.kind,
                        reason = %e,
                        "Recognition rejected"
                    );
                    return Err(e);
                }
            }
        };

        self.persist().await;
        Ok(receipt)
    }

    /// Preview whether `giver_id` may recognize `recipient_ids` right now.
    pub async fn check(
        &self,
        giver_id: &str,
        recipient_ids: &[String],
        kind: RecognitionType,
    ) -> Result<GateCheck, RecognitionError> {
        let state = self.state.read().await;
        let giver = state
            .user(giver_id)
            .ok_or_else(|| RecognitionError::UserNotFound(giver_id.to_string()))?;

        let shape = validate_recipient_ids(giver_id, recipient_ids, kind);
        if !shape.allowed {
            return Ok(shape);
        }
        Ok(can_recognize_multiple(
            giver,
            recipient_ids,
            kind,
            &self.rules.limits,
            self.now(),
        ))
    }

    /// Apply an action to a copy of the state and swap it in on success.
    async fn apply<T>(
        &self,
        action: impl FnOnce(&mut AppState, DateTime<Utc>) -> Result<T, RecognitionError>,
    ) -> Result<T, RecognitionError> {
        let now = self.now();
        let out = {
            let mut state = self.state.write().await;
            let mut next = state.clone();
            let out = action(&mut next, now)?;
            *state = next;
            out
        };
        self.persist().await;
        Ok(out)
    }

    pub async fn toggle_reaction(
        &self,
        recognition_id: &str,
        user_id: &str,
        emoji: &str,
    ) -> Result<bool, RecognitionError> {
        self.apply(|s, now| actions::toggle_reaction(s, recognition_id, user_id, emoji, now))
            .await
    }

    pub async fn add_comment(
        &self,
        recognition_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<String, RecognitionError> {
        self.apply(|s, now| actions::add_comment(s, recognition_id, user_id, text, now))
            .await
    }

    pub async fn record_repost(
        &self,
        recognition_id: &str,
        user_id: &str,
    ) -> Result<u32, RecognitionError> {
        self.apply(|s, now| actions::record_repost(s, recognition_id, user_id, now))
            .await
    }

    pub async fn toggle_bookmark(
        &self,
        recognition_id: &str,
        user_id: &str,
    ) -> Result<bool, RecognitionError> {
        self.apply(|s, _| actions::toggle_bookmark(s, recognition_id, user_id))
            .await
    }

    pub async fn mark_notification_read(
        &self,
        notification_id: &str,
    ) -> Result<(), RecognitionError> {
        self.apply(|s, now| actions::mark_notification_read(s, notification_id, now))
            .await
    }

    pub async fn mark_all_read(&self, user_id: &str) -> usize {
        self.apply(|s, now| Ok(actions::mark_all_read(s, user_id, now)))
            .await
            .unwrap_or(0)
    }

    pub async fn delete_notification(&self, notification_id: &str) -> Result<(), RecognitionError> {
        self.apply(|s, _| actions::delete_notification(s, notification_id))
            .await
    }

    pub async fn delete_recognition(
        &self,
        recognition_id: &str,
    ) -> Result<Recognition, RecognitionError> {
        self.apply(|s, _| actions::delete_recognition(s, recognition_id))
            .await
    }

    /// Insert or replace a user. Returns the previous record, if any.
    pub async fn upsert_user(&self, user: User) -> Option<User> {
        let id = user.id.clone();
        let previous = actions::upsert_user(&mut *self.state.write().await, user);
        self.persist().await;
        debug!(user_id = %id, replaced = previous.is_some(), "User upserted");
        previous
    }

    pub async fn grant_award(
        &self,
        user_id: &str,
        award: Award,
        recognition_id: Option<&str>,
    ) -> Result<(), RecognitionError> {
        self.apply(|s, now| actions::grant_award(s, user_id, &award, recognition_id, now))
            .await
    }

    // Reads

    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    pub async fn get_user(&self, user_id: &str) -> Option<User> {
        self.state.read().await.user(user_id).cloned()
    }

    pub async fn get_recognition(&self, recognition_id: &str) -> Option<Recognition> {
        self.state.read().await.recognition(recognition_id).cloned()
    }

    pub async fn feed(&self, limit: usize) -> Vec<Recognition> {
        let state = self.state.read().await;
        selectors::feed(&state, limit).into_iter().cloned().collect()
    }

    pub async fn leaderboard(
        &self,
        period: LeaderboardPeriod,
        limit: usize,
    ) -> Vec<LeaderboardEntry> {
        let state = self.state.read().await;
        selectors::leaderboard(&state, period, self.now(), limit)
    }

    pub async fn notifications(&self, user_id: &str) -> Vec<Notification> {
        let state = self.state.read().await;
        selectors::notifications_for(&state, user_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn unread_count(&self, user_id: &str) -> usize {
        selectors::unread_count(&*self.state.read().await, user_id)
    }

    pub async fn analytics(&self, since: Option<DateTime<Utc>>) -> Analytics {
        selectors::analytics(&*self.state.read().await, since, 5)
    }
}

impl Default for RecognitionManager {
    fn default() -> Self {
        Self::new(GateRules::default())
    }
}
