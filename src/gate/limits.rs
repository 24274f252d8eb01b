use serde::{Deserialize, Serialize};

use crate::credits::{CreditTable, MonthlyCapPolicy};

/// Anti-gaming limits applied to givers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntiGamingLimits {
    /// Quick toasts a user may give per calendar day
    pub daily_quick_toasts: u32,

    /// Standing ovations a user may give per calendar day
    pub daily_standing_ovations: u32,

    /// Hours before the same giver may recognize the same recipient again
    pub cooldown_hours: i64,
}

impl Default for AntiGamingLimits {
    fn default() -> Self {
        Self {
            daily_quick_toasts: 3,
            daily_standing_ovations: 1,
            cooldown_hours: 24,
        }
    }
}

/// Everything the recognition transaction needs to decide and price a toast.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateRules {
    pub limits: AntiGamingLimits,
    pub credits: CreditTable,
    pub monthly_cap: MonthlyCapPolicy,
}
