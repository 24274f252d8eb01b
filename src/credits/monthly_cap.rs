//! Monthly cap on credits one giver can send to one recipient.
//!
//! The gate asks whether any allowance is left; the recognition transaction
//! clamps the priced amount to what is left. Both read the recipient-side
//! ledger (`User::recent_givers`) through this one policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCapPolicy {
    pub max_credits_per_giver: u32,
}

impl Default for MonthlyCapPolicy {
    fn default() -> Self {
        Self {
            max_credits_per_giver: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapOutcome {
    /// Credits that may actually be granted
    pub granted: u32,
    /// The proposal was reduced
    pub capped: bool,
    /// Nothing is left for this month
    pub exhausted: bool,
}

impl MonthlyCapPolicy {
    pub fn remaining(&self, already_received: u32) -> u32 {
        self.max_credits_per_giver.saturating_sub(already_received)
    }

    pub fn evaluate(&self, already_received: u32, proposed: u32) -> CapOutcome {
        let remaining = self.remaining(already_received);
        let granted = proposed.min(remaining);
        CapOutcome {
            granted,
            capped: granted < proposed,
            exhausted: remaining == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_to_remaining_allowance() {
        let policy = MonthlyCapPolicy::default();
        let outcome = policy.evaluate(480, 75);
        assert_eq!(outcome.granted, 20);
        assert!(outcome.capped);
        assert!(!outcome.exhausted);
    }

    #[test]
    fn test_under_cap_passes_through() {
        let outcome = MonthlyCapPolicy::default().evaluate(0, 75);
        assert_eq!(outcome.granted, 75);
        assert!(!outcome.capped);
    }

    #[test]
    fn test_exhausted() {
        let outcome = MonthlyCapPolicy::default().evaluate(620, 5);
        assert_eq!(outcome.granted, 0);
        assert!(outcome.exhausted);
    }
}
