use serde::{Deserialize, Serialize};

use pharmaops_core::{DomainError, DomainResult, Money};

/// Upper bound on the forecast horizon accepted at settings-update time.
pub const MAX_HORIZON_DAYS: u32 = 366;

/// Forecast configuration for one branch.
///
/// Passed by value into every forecast run. Validation happens when settings are
/// updated or loaded, not when a forecast is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SettingsRecord")]
pub struct Settings {
    /// Balances below this (but not negative) are flagged as a warning.
    pub safe_threshold: Money,
    /// Cash on hand at the start of day 0. May be negative (overdrawn).
    pub initial_balance: Money,
    pub forecast_horizon_days: u32,
}

impl Settings {
    pub fn new(
        safe_threshold: Money,
        initial_balance: Money,
        forecast_horizon_days: u32,
    ) -> DomainResult<Self> {
        let settings = Self {
            safe_threshold,
            initial_balance,
            forecast_horizon_days,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.safe_threshold.ensure_non_negative("safe_threshold")?;

        if self.forecast_horizon_days == 0 {
            return Err(DomainError::validation("forecast_horizon_days must be positive"));
        }
        if self.forecast_horizon_days > MAX_HORIZON_DAYS {
            return Err(DomainError::validation(format!(
                "forecast_horizon_days must be at most {MAX_HORIZON_DAYS}"
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct SettingsRecord {
    safe_threshold: Money,
    initial_balance: Money,
    forecast_horizon_days: u32,
}

impl TryFrom<SettingsRecord> for Settings {
    type Error = DomainError;

    fn try_from(record: SettingsRecord) -> DomainResult<Self> {
        Settings::new(
            record.safe_threshold,
            record.initial_balance,
            record.forecast_horizon_days,
        )
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            safe_threshold: Money::ZERO,
            initial_balance: Money::ZERO,
            forecast_horizon_days: 30,
        }
    }
}
