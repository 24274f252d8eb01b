use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which rule produced a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRule {
    DailyLimit,
    Cooldown,
    MonthlyCap,
    Recipients,
    Message,
    ChainParent,
}

/// Outcome of every gating function.
///
/// Rejections are ordinary values surfaced to the end user; `reason` and
/// `suggested_action` are display copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCheck {
    pub allowed: bool,
    pub rule: Option<GateRule>,
    pub reason: Option<String>,
    pub suggested_action: Option<String>,
    pub cooldown_ends_at: Option<DateTime<Utc>>,
    pub remaining: Option<u32>,
}

impl GateCheck {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            rule: None,
            reason: None,
            suggested_action: None,
            cooldown_ends_at: None,
            remaining: None,
        }
    }

    pub fn allow_remaining(remaining: u32) -> Self {
        Self {
            remaining: Some(remaining),
            ..Self::allow()
        }
    }

    pub fn deny(rule: GateRule, reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            rule: Some(rule),
            reason: Some(reason.into()),
            ..Self::allow()
        }
    }

    pub fn suggest(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = Some(action.into());
        self
    }

    pub fn until(mut self, ends_at: DateTime<Utc>) -> Self {
        self.cooldown_ends_at = Some(ends_at);
        self
    }

    pub fn with_remaining(mut self, remaining: u32) -> Self {
        self.remaining = Some(remaining);
        self
    }

    pub fn reason_or_default(&self) -> &str {
        self.reason.as_deref().unwrap_or("Recognition not allowed")
    }
}
