//! Recognition gate: anti-gaming rules for recognition creation.
//!
//! ## Rules
//!
//! | Rule | Applies to | Default |
//! |------|------------|---------|
//! | Daily limit | Quick Toast / Standing Ovation | 3 / 1 per day |
//! | Cooldown | same giver -> same recipient | 24h |
//! | Monthly cap | credits from one giver to one recipient | 500 / month |
//!
//! Recipient shape checks ([`validate_recipient_ids`]) run before these.

mod check;
mod limits;
mod validator;

pub use check::{GateCheck, GateRule};
pub use limits::{AntiGamingLimits, GateRules};
pub use validator::{
    can_recognize, can_recognize_multiple, check_daily_limit, check_monthly_cap,
    check_recipient_cooldown, validate_message, validate_recipient_ids,
};
