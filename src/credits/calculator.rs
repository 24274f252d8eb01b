//! Credit pricing for a single recipient of a recognition.
//!
//! Steps are applied in a fixed order and each one is reported as a
//! [`CreditLine`] so the UI can show where the total came from:
//! base by type, expert-area boost, award bonus, reciprocal discount.

use serde::{Deserialize, Serialize};

use crate::model::RecognitionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCredits {
    pub recipient: u32,
    pub giver: u32,
}

/// Credit amounts. Defaults are the production table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTable {
    pub quick_toast: BaseCredits,
    pub standing_ovation: BaseCredits,
    /// Paid per team member
    pub team_toast: BaseCredits,
    pub milestone_moment: BaseCredits,

    /// Added to the recipient per selected expert area
    pub expert_area_boost: u32,

    /// Flat bonus when an award is attached
    pub award_bonus: u32,

    /// Percentage taken off the recipient total for mutual recognition
    pub reciprocal_discount_percent: u32,

    /// Window in which a return recognition counts as reciprocal
    pub reciprocal_window_hours: i64,
}

impl Default for CreditTable {
    fn default() -> Self {
        Self {
            quick_toast: BaseCredits { recipient: 5, giver: 2 },
            standing_ovation: BaseCredits { recipient: 25, giver: 5 },
            team_toast: BaseCredits { recipient: 15, giver: 3 },
            milestone_moment: BaseCredits { recipient: 0, giver: 0 },
            expert_area_boost: 10,
            award_bonus: 50,
            reciprocal_discount_percent: 50,
            reciprocal_window_hours: 48,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditLine {
    pub label: String,
    pub recipient: i64,
    pub giver: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditBreakdown {
    pub lines: Vec<CreditLine>,
    pub recipient_total: u32,
    pub giver_total: u32,
}

impl CreditTable {
    pub fn base(&self, kind: RecognitionType) -> BaseCredits {
        match kind {
            RecognitionType::QuickToast => self.quick_toast,
            RecognitionType::StandingOvation => self.standing_ovation,
            RecognitionType::TeamToast => self.team_toast,
            RecognitionType::MilestoneMoment => self.milestone_moment,
        }
    }

    pub fn calculate(
        &self,
        kind: RecognitionType,
        expert_area_count: usize,
        has_award: bool,
        is_reciprocal: bool,
    ) -> CreditBreakdown {
        let base = self.base(kind);
        let mut lines = vec![CreditLine {
            label: format!("{} base", kind.label()),
            recipient: base.recipient as i64,
            giver: base.giver as i64,
        }];
        let mut recipient_total = base.recipient;

        if expert_area_count > 0 {
            let boost = expert_area_count as u32 * self.expert_area_boost;
            recipient_total += boost;
            lines.push(CreditLine {
                label: format!(
                    "Expert areas ({} x {})",
                    expert_area_count, self.expert_area_boost
                ),
                recipient: boost as i64,
                giver: 0,
            });
        }

        if has_award {
            recipient_total += self.award_bonus;
            lines.push(CreditLine {
                label: "Award bonus".to_string(),
                recipient: self.award_bonus as i64,
                giver: 0,
            });
        }

        if is_reciprocal {
            let kept = recipient_total * (100 - self.reciprocal_discount_percent.min(100)) / 100;
            lines.push(CreditLine {
                label: format!(
                    "Reciprocal recognition (-{}%)",
                    self.reciprocal_discount_percent
                ),
                recipient: kept as i64 - recipient_total as i64,
                giver: 0,
            });
            recipient_total = kept;
        }

        CreditBreakdown {
            lines,
            recipient_total,
            giver_total: base.giver,
        }
    }
}

/// Price a recognition with the default credit table.
pub fn calculate_credits(
    kind: RecognitionType,
    expert_area_count: usize,
    has_award: bool,
    is_reciprocal: bool,
) -> CreditBreakdown {
    CreditTable::default().calculate(kind, expert_area_count, has_award, is_reciprocal)
}
