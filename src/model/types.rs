use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of recognition a user can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecognitionType {
    /// Everyday thank-you, one recipient
    QuickToast,
    /// High-value recognition for significant achievements
    StandingOvation,
    /// Shared recognition for a group of at least two people
    TeamToast,
    /// Work anniversaries, launches and similar milestones
    MilestoneMoment,
}

impl RecognitionType {
    pub const ALL: [RecognitionType; 4] = [
        RecognitionType::QuickToast,
        RecognitionType::StandingOvation,
        RecognitionType::TeamToast,
        RecognitionType::MilestoneMoment,
    ];

    /// Inclusive (min, max) number of recipients
    pub fn recipient_bounds(&self) -> (usize, usize) {
        match self {
            RecognitionType::QuickToast => (1, 1),
            RecognitionType::StandingOvation => (1, 10),
            RecognitionType::TeamToast => (2, 25),
            RecognitionType::MilestoneMoment => (1, 10),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecognitionType::QuickToast => "Quick Toast",
            RecognitionType::StandingOvation => "Standing Ovation",
            RecognitionType::TeamToast => "Team Toast",
            RecognitionType::MilestoneMoment => "Milestone Moment",
        }
    }
}

impl fmt::Display for RecognitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six company values every recognition is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanyValue {
    Innovation,
    CustomerFocus,
    Collaboration,
    Integrity,
    Excellence,
    Ownership,
}

impl CompanyValue {
    pub const ALL: [CompanyValue; 6] = [
        CompanyValue::Innovation,
        CompanyValue::CustomerFocus,
        CompanyValue::Collaboration,
        CompanyValue::Integrity,
        CompanyValue::Excellence,
        CompanyValue::Ownership,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CompanyValue::Innovation => "Innovation",
            CompanyValue::CustomerFocus => "Customer Focus",
            CompanyValue::Collaboration => "Collaboration",
            CompanyValue::Integrity => "Integrity",
            CompanyValue::Excellence => "Excellence",
            CompanyValue::Ownership => "Ownership",
        }
    }
}

impl fmt::Display for CompanyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who can see a recognition in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Team,
    Private,
}

/// A skill or domain tag as selected on a recognition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpertAreaTag {
    pub id: String,
    pub name: String,
}

impl ExpertAreaTag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A user's accumulated standing in one expert area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertArea {
    pub id: String,
    pub name: String,
    pub score: u32,
}
