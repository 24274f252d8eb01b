use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::credits::{CreditTable, MonthlyCapPolicy};
use crate::gate::{AntiGamingLimits, GateRules};

/// Configuration for the recognition core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToastConfig {
    /// Anti-gaming limits
    pub limits: LimitsConfig,
    /// Credit amounts and monthly cap
    pub credits: CreditConfig,
    /// Snapshot persistence
    pub persistence: PersistenceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Quick toasts per giver per day
    pub daily_quick_toasts: u32,
    /// Standing ovations per giver per day
    pub daily_standing_ovations: u32,
    /// Hours between two recognitions of the same recipient
    pub cooldown_hours: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = AntiGamingLimits::default();
        Self {
            daily_quick_toasts: limits.daily_quick_toasts,
            daily_standing_ovations: limits.daily_standing_ovations,
            cooldown_hours: limits.cooldown_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditConfig {
    /// Credits one giver may send one recipient per month
    pub monthly_cap: u32,
    /// Recipient credits per selected expert area
    pub expert_area_boost: u32,
    /// Flat bonus for an attached award
    pub award_bonus: u32,
    /// Window for reciprocal-recognition discount
    pub reciprocal_window_hours: i64,
}

impl Default for CreditConfig {
    fn default() -> Self {
        let table = CreditTable::default();
        Self {
            monthly_cap: MonthlyCapPolicy::default().max_credits_per_giver,
            expert_area_boost: table.expert_area_boost,
            award_bonus: table.award_bonus,
            reciprocal_window_hours: table.reciprocal_window_hours,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Write the aggregate to a local snapshot after every change
    pub enabled: bool,
    /// Snapshot file location
    pub snapshot_path: PathBuf,
    /// Load demo users and recognitions when the snapshot is empty
    pub seed_demo_data: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            snapshot_path: PathBuf::from("data/toastx-state.json"),
            seed_demo_data: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Upper bound for hour-based windows; one year.
pub const MAX_WINDOW_HOURS: i64 = 24 * 365;

fn parse_var<T>(name: &str, target: &mut T) -> Result<()>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Ok(raw) = env::var(name) {
        *target = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value", name))?;
    }
    Ok(())
}

impl ToastConfig {
    /// Load configuration from `TOASTX_*` environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        parse_var("TOASTX_DAILY_QUICK_TOASTS", &mut config.limits.daily_quick_toasts)?;
        parse_var(
            "TOASTX_DAILY_STANDING_OVATIONS",
            &mut config.limits.daily_standing_ovations,
        )?;
        parse_var("TOASTX_COOLDOWN_HOURS", &mut config.limits.cooldown_hours)?;

        parse_var("TOASTX_MONTHLY_CAP", &mut config.credits.monthly_cap)?;
        parse_var("TOASTX_EXPERT_AREA_BOOST", &mut config.credits.expert_area_boost)?;
        parse_var("TOASTX_AWARD_BONUS", &mut config.credits.award_bonus)?;
        parse_var(
            "TOASTX_RECIPROCAL_WINDOW_HOURS",
            &mut config.credits.reciprocal_window_hours,
        )?;

        parse_var("TOASTX_PERSISTENCE_ENABLED", &mut config.persistence.enabled)?;
        if let Ok(path) = env::var("TOASTX_SNAPSHOT_PATH") {
            config.persistence.snapshot_path = PathBuf::from(path);
        }
        parse_var("TOASTX_SEED_DEMO_DATA", &mut config.persistence.seed_demo_data)?;

        if let Ok(level) = env::var("TOASTX_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;

        info!(
            "Configuration loaded: quick/day={}, ovations/day={}, cooldown={}h, monthly_cap={}",
            config.limits.daily_quick_toasts,
            config.limits.daily_standing_ovations,
            config.limits.cooldown_hours,
            config.credits.monthly_cap
        );

        Ok(config)
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.limits.cooldown_hours < 0 {
            return Err(anyhow::anyhow!("Cooldown hours cannot be negative"));
        }

        if self.limits.cooldown_hours > MAX_WINDOW_HOURS {
            return Err(anyhow::anyhow!(
                "Cooldown hours cannot exceed {} (one year)",
                MAX_WINDOW_HOURS
            ));
        }

        if self.credits.reciprocal_window_hours < 0 {
            return Err(anyhow::anyhow!("Reciprocal window cannot be negative"));
        }

        if self.credits.reciprocal_window_hours > MAX_WINDOW_HOURS {
            return Err(anyhow::anyhow!(
                "Reciprocal window cannot exceed {} hours (one year)",
                MAX_WINDOW_HOURS
            ));
        }

        if self.credits.monthly_cap == 0 {
            return Err(anyhow::anyhow!(
                "Monthly cap must be non-zero, every recognition would be rejected"
            ));
        }

        if self.limits.daily_quick_toasts == 0 && self.limits.daily_standing_ovations == 0 {
            warn!("Both daily limits are zero - only team toasts and milestones can be given");
        }

        if self.persistence.enabled && self.persistence.snapshot_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!(
                "Snapshot path cannot be empty when persistence is enabled"
            ));
        }

        Ok(())
    }

    /// Convert to the rule bundle used by the recognition transaction
    pub fn to_rules(&self) -> GateRules {
        GateRules {
            limits: AntiGamingLimits {
                daily_quick_toasts: self.limits.daily_quick_toasts,
                daily_standing_ovations: self.limits.daily_standing_ovations,
                cooldown_hours: self.limits.cooldown_hours,
            },
            credits: CreditTable {
                expert_area_boost: self.credits.expert_area_boost,
                award_bonus: self.credits.award_bonus,
                reciprocal_window_hours: self.credits.reciprocal_window_hours,
                ..CreditTable::default()
            },
            monthly_cap: MonthlyCapPolicy {
                max_credits_per_giver: self.credits.monthly_cap,
            },
        }
    }
}
