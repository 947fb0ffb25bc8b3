use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pharmaops_core::Money;

use crate::day::ForecastDay;
use crate::risk::RiskTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Money,
}

/// Headline numbers for a forecast (dashboard tiles, log lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub horizon_days: usize,
    pub lowest_morning_balance: Option<BalancePoint>,
    pub lowest_closing_balance: Option<BalancePoint>,
    /// First date on which either window is critical.
    pub first_critical_date: Option<NaiveDate>,
    /// Day counts by closing (overall) risk.
    pub critical_days: usize,
    pub warning_days: usize,
    pub safe_days: usize,
    pub final_closing_balance: Option<Money>,
}

pub fn summarize(days: &[ForecastDay]) -> ForecastSummary {
    // Ties keep the earliest date.
    let lowest = |pick: fn(&ForecastDay) -> Money| {
        days.iter().fold(None::<BalancePoint>, |low, d| match low {
            Some(p) if p.balance <= pick(d) => Some(p),
            _ => Some(BalancePoint {
                date: d.date,
                balance: pick(d),
            }),
        })
    };

    let count = |tier: RiskTier| days.iter().filter(|d| d.overall_risk == tier).count();

    ForecastSummary {
        horizon_days: days.len(),
        lowest_morning_balance: lowest(|d| d.morning_balance),
        lowest_closing_balance: lowest(|d| d.closing_balance),
        first_critical_date: days
            .iter()
            .find(|d| d.morning_risk == RiskTier::Critical || d.overall_risk == RiskTier::Critical)
            .map(|d| d.date),
        critical_days: count(RiskTier::Critical),
        warning_days: count(RiskTier::Warning),
        safe_days: count(RiskTier::Safe),
        final_closing_balance: days.last().map(|d| d.closing_balance),
    }
}
