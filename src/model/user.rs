//! User aggregate and its anti-gaming bookkeeping.
//!
//! Daily counters are only meaningful for the day stored in
//! `last_recognition_reset`, and month totals only for the month stored in
//! `last_monthly_reset`. Reads go through the `effective_*` accessors, and
//! writes call [`User::roll_period`] before incrementing anything.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{CompanyValue, ExpertArea, ExpertAreaTag, RecognitionType};
use crate::util::{is_same_month, is_today, month_start};

/// Someone this user recognized recently (cooldown bookkeeping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentRecipient {
    pub user_id: String,
    pub last_recognized_at: DateTime<Utc>,
    /// Credits sent to this recipient during the month of `last_recognized_at`
    pub credits_from_this_month: u32,
}

/// Someone who recognized this user recently (monthly cap ledger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentGiver {
    pub user_id: String,
    pub last_recognized_at: DateTime<Utc>,
    /// Credits received from this giver during the month of `last_recognized_at`
    pub credits_from_this_month: u32,
}

impl RecentRecipient {
    pub fn effective_credits(&self, now: DateTime<Utc>) -> u32 {
        if is_same_month(Some(self.last_recognized_at.date_naive()), now) {
            self.credits_from_this_month
        } else {
            0
        }
    }
}

impl RecentGiver {
    pub fn effective_credits(&self, now: DateTime<Utc>) -> u32 {
        if is_same_month(Some(self.last_recognized_at.date_naive()), now) {
            self.credits_from_this_month
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge_id: String,
    pub name: String,
    pub earned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedAward {
    pub award_id: String,
    pub name: String,
    pub recognition_id: Option<String>,
    pub granted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: String,
    pub department: String,
    pub avatar_url: Option<String>,

    /// Lifetime credits
    pub credits: u32,
    pub credits_this_month: u32,
    pub recognitions_given: u32,
    pub recognitions_received: u32,

    pub expert_areas: Vec<ExpertArea>,
    pub earned_badges: Vec<EarnedBadge>,
    pub earned_awards: Vec<EarnedAward>,
    pub values_counts: HashMap<CompanyValue, u32>,

    pub daily_quick_toasts: u32,
    pub daily_standing_ovations: u32,
    pub last_recognition_reset: Option<NaiveDate>,
    pub last_monthly_reset: Option<NaiveDate>,
    pub recent_recipients: Vec<RecentRecipient>,
    pub recent_givers: Vec<RecentGiver>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let name = name.into();
        let email = format!("{}@toastx.example", name.to_lowercase().replace(' ', "."));
        Self {
            id,
            name,
            email,
            title: title.into(),
            department: department.into(),
            ..Default::default()
        }
    }

    /// Today's count for a rate-limited recognition type. Stale days read as zero.
    pub fn effective_daily_count(&self, kind: RecognitionType, now: DateTime<Utc>) -> u32 {
        if !is_today(self.last_recognition_reset, now) {
            return 0;
        }
        match kind {
            RecognitionType::QuickToast => self.daily_quick_toasts,
            RecognitionType::StandingOvation => self.daily_standing_ovations,
            RecognitionType::TeamToast | RecognitionType::MilestoneMoment => 0,
        }
    }

    pub fn effective_credits_this_month(&self, now: DateTime<Utc>) -> u32 {
        if is_same_month(self.last_monthly_reset, now) {
            self.credits_this_month
        } else {
            0
        }
    }

    /// Zero out counters that belong to a past day or month.
    pub fn roll_period(&mut self, now: DateTime<Utc>) {
        if !is_today(self.last_recognition_reset, now) {
            self.daily_quick_toasts = 0;
            self.daily_standing_ovations = 0;
            self.last_recognition_reset = Some(now.date_naive());
        }
        if !is_same_month(self.last_monthly_reset, now) {
            self.credits_this_month = 0;
            self.last_monthly_reset = Some(month_start(now));
        }
    }

    pub fn record_daily_use(&mut self, kind: RecognitionType, now: DateTime<Utc>) {
        self.roll_period(now);
        match kind {
            RecognitionType::QuickToast => self.daily_quick_toasts += 1,
            RecognitionType::StandingOvation => self.daily_standing_ovations += 1,
            RecognitionType::TeamToast | RecognitionType::MilestoneMoment => {}
        }
    }

    pub fn recent_recipient(&self, user_id: &str) -> Option<&RecentRecipient> {
        self.recent_recipients.iter().find(|r| r.user_id == user_id)
    }

    pub fn recent_giver(&self, user_id: &str) -> Option<&RecentGiver> {
        self.recent_givers.iter().find(|g| g.user_id == user_id)
    }

    /// Credits this user has received from `giver_id` in the current month.
    pub fn credits_received_from(&self, giver_id: &str, now: DateTime<Utc>) -> u32 {
        self.recent_giver(giver_id)
            .map(|g| g.effective_credits(now))
            .unwrap_or(0)
    }

    pub fn note_recipient(&mut self, recipient_id: &str, credits: u32, now: DateTime<Utc>) {
        match self
            .recent_recipients
            .iter_mut()
            .find(|r| r.user_id == recipient_id)
        {
            Some(entry) => {
                let carried = entry.effective_credits(now);
                entry.last_recognized_at = now;
                entry.credits_from_this_month = carried + credits;
            }
            None => self.recent_recipients.push(RecentRecipient {
                user_id: recipient_id.to_string(),
                last_recognized_at: now,
                credits_from_this_month: credits,
            }),
        }
    }

    pub fn note_giver(&mut self, giver_id: &str, credits: u32, now: DateTime<Utc>) {
        match self.recent_givers.iter_mut().find(|g| g.user_id == giver_id) {
            Some(entry) => {
                let carried = entry.effective_credits(now);
                entry.last_recognized_at = now;
                entry.credits_from_this_month = carried + credits;
            }
            None => self.recent_givers.push(RecentGiver {
                user_id: giver_id.to_string(),
                last_recognized_at: now,
                credits_from_this_month: credits,
            }),
        }
    }

    pub fn add_credits(&mut self, amount: u32, now: DateTime<Utc>) {
        self.roll_period(now);
        self.credits += amount;
        self.credits_this_month += amount;
    }

    pub fn boost_expert_area(&mut self, tag: &ExpertAreaTag, boost: u32) {
        match self.expert_areas.iter_mut().find(|a| a.id == tag.id) {
            Some(area) => area.score += boost,
            None => self.expert_areas.push(ExpertArea {
                id: tag.id.clone(),
                name: tag.name.clone(),
                score: boost,
            }),
        }
    }

    pub fn value_count(&self, value: CompanyValue) -> u32 {
        self.values_counts.get(&value).copied().unwrap_or(0)
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.earned_badges.iter().any(|b| b.badge_id == badge_id)
    }
}
