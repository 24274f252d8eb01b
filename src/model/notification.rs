use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::new_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Recognized,
    BadgeEarned,
    AwardGranted,
    Reaction,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub user_id: String,
    #[serde(default)]
    pub recognition_id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        user_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id("ntf"),
            kind,
            user_id: user_id.into(),
            recognition_id: None,
            title: title.into(),
            message: message.into(),
            read: false,
            priority: Priority::Normal,
            created_at: now,
            read_at: None,
        }
    }

    pub fn for_recognition(mut self, recognition_id: impl Into<String>) -> Self {
        self.recognition_id = Some(recognition_id.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn mark_read(&mut self, now: DateTime<Utc>) {
        if !self.read {
            self.read = true;
            self.read_at = Some(now);
        }
    }
}
