use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CompanyValue, ExpertAreaTag, RecognitionType, User, Visibility};

/// Snapshot of the giver at the time the recognition was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiverInfo {
    pub id: String,
    pub name: String,
    pub title: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for GiverInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            title: user.title.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Snapshot of one recipient; kept in the same order as `recipient_ids`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientInfo {
    pub id: String,
    pub name: String,
    pub department: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for RecipientInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            department: user.department.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// An award attached to a recognition. Adds a flat credit bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub user_id: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub id: String,
    pub kind: RecognitionType,
    pub giver: GiverInfo,
    pub recipient_ids: Vec<String>,
    pub recipients: Vec<RecipientInfo>,
    pub value: CompanyValue,
    #[serde(default)]
    pub expert_areas: Vec<ExpertAreaTag>,
    pub message: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub award: Option<Award>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reposts: u32,
    #[serde(default)]
    pub bookmarked_by: Vec<String>,

    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub notify_managers: bool,
    #[serde(default)]
    pub nominated: bool,
    #[serde(default)]
    pub chain_parent_id: Option<String>,
    #[serde(default)]
    pub chain_depth: u32,
}

impl Recognition {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.giver.id == user_id || self.recipient_ids.iter().any(|id| id == user_id)
    }

    pub fn bookmarks(&self) -> usize {
        self.bookmarked_by.len()
    }
}

/// Input to the recognition-creation transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecognition {
    pub giver_id: String,
    pub kind: RecognitionType,
    pub recipient_ids: Vec<String>,
    pub value: CompanyValue,
    pub expert_areas: Vec<ExpertAreaTag>,
    pub message: String,
    pub impact: Option<String>,
    pub award: Option<Award>,
    pub visibility: Visibility,
    pub notify_managers: bool,
    pub nominated: bool,
    pub chain_parent_id: Option<String>,
}

impl NewRecognition {
    pub fn new(
        giver_id: impl Into<String>,
        kind: RecognitionType,
        recipient_ids: Vec<String>,
        value: CompanyValue,
        message: impl Into<String>,
    ) -> Self {
        Self {
            giver_id: giver_id.into(),
            kind,
            recipient_ids,
            value,
            expert_areas: Vec::new(),
            message: message.into(),
            impact: None,
            award: None,
            visibility: Visibility::Public,
            notify_managers: false,
            nominated: false,
            chain_parent_id: None,
        }
    }

    pub fn with_expert_areas(mut self, areas: Vec<ExpertAreaTag>) -> Self {
        self.expert_areas = areas;
        self
    }

    pub fn with_award(mut self, award: Award) -> Self {
        self.award = Some(award);
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn chained_to(mut self, parent_id: impl Into<String>) -> Self {
        self.chain_parent_id = Some(parent_id.into());
        self
    }
}
