//! Anti-gaming checks and recipient validation.
//!
//! Pure functions over a user snapshot and an explicit `now`. Each returns a
//! [`GateCheck`]; the first failing rule wins and is returned verbatim.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use tracing::debug;

use crate::credits::{CapOutcome, MonthlyCapPolicy};
use crate::gate::{AntiGamingLimits, GateCheck, GateRule};
use crate::model::{RecognitionType, User};
use crate::util::hours_since;

fn plural(n: u32, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{} {}", n, one)
    } else {
        format!("{} {}", n, many)
    }
}

/// Check the giver's per-day allowance for `kind`.
///
/// Counters stamped with a past day are treated as reset, so a stale
/// snapshot always reports the full allowance.
pub fn check_daily_limit(
    user: &User,
    kind: RecognitionType,
    limits: &AntiGamingLimits,
    now: DateTime<Utc>,
) -> GateCheck {
    let cap = match kind {
        RecognitionType::QuickToast => limits.daily_quick_toasts,
        RecognitionType::StandingOvation => limits.daily_standing_ovations,
        RecognitionType::TeamToast | RecognitionType::MilestoneMoment => {
            return GateCheck::allow();
        }
    };

    let used = user.effective_daily_count(kind, now);
    if used >= cap {
        let (one, many) = match kind {
            RecognitionType::StandingOvation => ("Standing Ovation", "Standing Ovations"),
            _ => ("Quick Toast", "Quick Toasts"),
        };
        return GateCheck::deny(
            GateRule::DailyLimit,
            format!(
                "You've reached your daily limit of {}",
                plural(cap, one, many)
            ),
        )
        .suggest("Try a Team Toast, or come back tomorrow")
        .with_remaining(0);
    }

    GateCheck::allow_remaining(cap - used)
}

/// Check that the giver has not recognized `recipient_id` within the cooldown window.
pub fn check_recipient_cooldown(
    user: &User,
    recipient_id: &str,
    limits: &AntiGamingLimits,
    now: DateTime<Utc>,
) -> GateCheck {
    let Some(entry) = user.recent_recipient(recipient_id) else {
        return GateCheck::allow();
    };

    let elapsed = hours_since(entry.last_recognized_at, now);
    let window = limits.cooldown_hours as f64;
    if elapsed >= window {
        return GateCheck::allow();
    }

    let ends_at = Duration::try_hours(limits.cooldown_hours)
        .and_then(|cooldown| entry.last_recognized_at.checked_add_signed(cooldown));
    let hours_left = ((window - elapsed).ceil() as u32).max(1);
    let check = GateCheck::deny(
        GateRule::Cooldown,
        format!(
            "You recognized this person recently. You can recognize them again in {}",
            plural(hours_left, "hour", "hours")
        ),
    )
    .suggest("Recognize someone else in the meantime");

    // a window past chrono's range has no representable end
    match ends_at {
        Some(ends_at) => check.until(ends_at),
        None => check,
    }
}

/// Check the credits `recipient` has already received from `giver_id` this month.
pub fn check_monthly_cap(
    recipient: &User,
    giver_id: &str,
    policy: &MonthlyCapPolicy,
    now: DateTime<Utc>,
) -> GateCheck {
    let received = recipient.credits_received_from(giver_id, now);
    match policy.evaluate(received, 0) {
        CapOutcome { exhausted: true, .. } => GateCheck::deny(
            GateRule::MonthlyCap,
            format!(
                "{} has already received the maximum of {} credits from you this month",
                recipient.name, policy.max_credits_per_giver
            ),
        )
        .suggest("Recognize them again next month")
        .with_remaining(0),
        _ => GateCheck::allow_remaining(policy.remaining(received)),
    }
}

/// Daily limit, then cooldown for a single recipient.
pub fn can_recognize(
    giver: &User,
    recipient_id: &str,
    kind: RecognitionType,
    limits: &AntiGamingLimits,
    now: DateTime<Utc>,
) -> GateCheck {
    let daily = check_daily_limit(giver, kind, limits, now);
    if !daily.allowed {
        return daily;
    }

    let cooldown = check_recipient_cooldown(giver, recipient_id, limits, now);
    if !cooldown.allowed {
        return cooldown;
    }

    daily
}

/// Daily limit once, then cooldown for each recipient in order.
pub fn can_recognize_multiple(
    giver: &User,
    recipient_ids: &[String],
    kind: RecognitionType,
    limits: &AntiGamingLimits,
    now: DateTime<Utc>,
) -> GateCheck {
    let daily = check_daily_limit(giver, kind, limits, now);
    if !daily.allowed {
        debug!(giver = %giver.id, kind = ?kind, "Daily limit reached");
        return daily;
    }

    for recipient_id in recipient_ids {
        let cooldown = check_recipient_cooldown(giver, recipient_id, limits, now);
        if !cooldown.allowed {
            debug!(giver = %giver.id, recipient = %recipient_id, "Recipient still in cooldown");
            return cooldown;
        }
    }

    daily
}

/// Shape and identity checks on the recipient list. Runs before any
/// anti-gaming rule.
pub fn validate_recipient_ids(
    giver_id: &str,
    recipient_ids: &[String],
    kind: RecognitionType,
) -> GateCheck {
    if recipient_ids.is_empty() {
        return GateCheck::deny(GateRule::Recipients, "Please select at least one recipient")
            .suggest("Choose who you want to recognize");
    }

    if recipient_ids.iter().any(|id| id == giver_id) {
        return GateCheck::deny(GateRule::Recipients, "You cannot recognize yourself")
            .suggest("Recognize a colleague instead");
    }

    let mut seen = HashSet::new();
    if !recipient_ids.iter().all(|id| seen.insert(id.as_str())) {
        return GateCheck::deny(
            GateRule::Recipients,
            "Each recipient can only be selected once",
        )
        .suggest("Remove the duplicate recipients");
    }

    let (min, max) = kind.recipient_bounds();
    let count = recipient_ids.len();
    if count < min || count > max {
        let reason = match kind {
            RecognitionType::QuickToast => {
                "A Quick Toast must have exactly one recipient".to_string()
            }
            RecognitionType::TeamToast if count < min => {
                format!("A Team Toast needs at least {} recipients", min)
            }
            _ => format!("A {} can have at most {} recipients", kind.label(), max),
        };
        let suggestion = match kind {
            RecognitionType::QuickToast => "Use a Team Toast to recognize several people",
            RecognitionType::TeamToast if count < min => "Use a Quick Toast for a single person",
            _ => "Reduce the number of recipients",
        };
        return GateCheck::deny(GateRule::Recipients, reason).suggest(suggestion);
    }

    GateCheck::allow()
}

pub fn validate_message(message: &str) -> GateCheck {
    if message.trim().is_empty() {
        return GateCheck::deny(GateRule::Message, "Please write a message")
            .suggest("Tell them what they did and why it mattered");
    }
    GateCheck::allow()
}
