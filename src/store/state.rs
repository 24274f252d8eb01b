use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Notification, Recognition, User};

/// The whole aggregate: users by id, recognitions and notifications in
/// insertion order. Transitions work on a clone and replace the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub users: HashMap<String, User>,
    pub recognitions: Vec<Recognition>,
    pub notifications: Vec<Notification>,
}

impl AppState {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id.clone(), u)).collect(),
            ..Default::default()
        }
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    pub fn user_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.users.get_mut(user_id)
    }

    pub fn recognition(&self, recognition_id: &str) -> Option<&Recognition> {
        self.recognitions.iter().find(|r| r.id == recognition_id)
    }

    pub fn recognition_mut(&mut self, recognition_id: &str) -> Option<&mut Recognition> {
        self.recognitions.iter_mut().find(|r| r.id == recognition_id)
    }

    pub fn notification_mut(&mut self, notification_id: &str) -> Option<&mut Notification> {
        self.notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.recognitions.is_empty() && self.notifications.is_empty()
    }
}
