//! One projected day and the records that moved its balance.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pharmaops_core::{Money, TimeOfDay};
use pharmaops_treasury::{
    ActualRevenueEntry, ExpectedRevenueEntry, Expense, Obligation, PaymentType,
};

use crate::risk::RiskTier;

/// Boundary between the morning and afternoon settlement windows.
///
/// Revenue settling strictly before 10:00 is morning money. Cheques executing at
/// or before 10:00 clear in the morning.
pub const SETTLEMENT_CUTOFF: TimeOfDay = TimeOfDay::hm(10, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    Morning,
    Afternoon,
}

impl Window {
    pub fn for_revenue(settlement_time: TimeOfDay) -> Self {
        if settlement_time < SETTLEMENT_CUTOFF {
            Window::Morning
        } else {
            Window::Afternoon
        }
    }

    pub fn for_obligation(execution_time: TimeOfDay) -> Self {
        if execution_time <= SETTLEMENT_CUTOFF {
            Window::Morning
        } else {
            Window::Afternoon
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Obligation,
    Expense,
    ActualRevenue,
    ExpectedRevenue,
}

/// Snapshot of the record an item came from, as it was when the forecast ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum ItemSource {
    Obligation(Obligation),
    Expense(Expense),
    ActualRevenue(ActualRevenueEntry),
    ExpectedRevenue(ExpectedRevenueEntry),
}

impl ItemSource {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemSource::Obligation(_) => ItemKind::Obligation,
            ItemSource::Expense(_) => ItemKind::Expense,
            ItemSource::ActualRevenue(_) => ItemKind::ActualRevenue,
            ItemSource::ExpectedRevenue(_) => ItemKind::ExpectedRevenue,
        }
    }

    /// Human-readable name shown next to the amount.
    pub fn label(&self) -> String {
        match self {
            ItemSource::Obligation(o) => format!("cheque at {}", o.execution_time()),
            ItemSource::Expense(e) => e.category().to_string(),
            ItemSource::ActualRevenue(r) => match r.payment_type {
                PaymentType::Cash => "cash takings".to_string(),
                PaymentType::Visa => "card settlement".to_string(),
            },
            ItemSource::ExpectedRevenue(r) if r.reason.trim().is_empty() => {
                "expected revenue".to_string()
            }
            ItemSource::ExpectedRevenue(r) => r.reason.clone(),
        }
    }
}

/// A single record's contribution to a day's cash movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributingItem {
    pub window: Window,
    pub flow: Flow,
    pub label: String,
    pub amount: Money,
    pub source: ItemSource,
}

/// Projected cash position for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub opening_balance: Money,
    pub morning_inflow: Money,
    pub morning_outflow: Money,
    pub morning_balance: Money,
    pub afternoon_inflow: Money,
    pub afternoon_outflow: Money,
    pub closing_balance: Money,
    pub morning_risk: RiskTier,
    pub overall_risk: RiskTier,
    /// In discovery order: cheques, expenses, actual revenue, expected revenue.
    pub items: Vec<ContributingItem>,
}

impl ForecastDay {
    /// The day opens with a shortfall before the afternoon settlement arrives.
    pub fn is_morning_critical(&self) -> bool {
        self.morning_risk == RiskTier::Critical || self.morning_balance.is_negative()
    }

    /// Cheques clearing in the morning window, in discovery order.
    pub fn morning_obligations(&self) -> impl Iterator<Item = &Obligation> + '_ {
        self.items.iter().filter_map(|item| match &item.source {
            ItemSource::Obligation(o) if item.window == Window::Morning => Some(o),
            _ => None,
        })
    }

    pub fn expenses(&self) -> impl Iterator<Item = &Expense> + '_ {
        self.items.iter().filter_map(|item| match &item.source {
            ItemSource::Expense(e) => Some(e),
            _ => None,
        })
    }

    pub fn items_of(&self, kind: ItemKind) -> impl Iterator<Item = &ContributingItem> + '_ {
        self.items.iter().filter(move |item| item.source.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revenue_at_cutoff_is_afternoon_but_cheque_at_cutoff_is_morning() {
        assert_eq!(Window::for_revenue(TimeOfDay::hm(9, 59)), Window::Morning);
        assert_eq!(Window::for_revenue(SETTLEMENT_CUTOFF), Window::Afternoon);
        assert_eq!(Window::for_obligation(SETTLEMENT_CUTOFF), Window::Morning);
        assert_eq!(Window::for_obligation(TimeOfDay::hm(10, 1)), Window::Afternoon);
    }
}
