//! Credit calculation.
//!
//! ```text
//! base(type) ──► + expert areas ──► + award ──► reciprocal discount ──► monthly cap clamp
//! ```
//!
//! The first four steps are [`calculate_credits`]; the clamp is applied by
//! the recognition transaction per recipient using [`MonthlyCapPolicy`].

mod calculator;
mod monthly_cap;

pub use calculator::{calculate_credits, BaseCredits, CreditBreakdown, CreditLine, CreditTable};
pub use monthly_cap::{CapOutcome, MonthlyCapPolicy};

use chrono::{DateTime, Utc};

use crate::model::User;
use crate::util::hours_since;

/// True when `recipient_id` recognized `giver` within the reciprocal window,
/// i.e. this recognition would be a return favour.
pub fn is_reciprocal(
    giver: &User,
    recipient_id: &str,
    table: &CreditTable,
    now: DateTime<Utc>,
) -> bool {
    giver
        .recent_giver(recipient_id)
        .map(|g| hours_since(g.last_recognized_at, now) <= table.reciprocal_window_hours as f64)
        .unwrap_or(false)
}
