//! Day-by-day cash projection.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use pharmaops_core::Money;
use pharmaops_treasury::{ActualRevenueEntry, ExpectedRevenueEntry, Expense, Obligation, Settings};

use crate::day::{ContributingItem, Flow, ForecastDay, ItemSource, Window};
use crate::risk::classify;

/// Raw records a forecast run reads. Borrowed: the builder never mutates them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastInputs<'a> {
    pub obligations: &'a [Obligation],
    pub expenses: &'a [Expense],
    pub actual_revenue: &'a [ActualRevenueEntry],
    pub expected_revenue: &'a [ExpectedRevenueEntry],
}

/// Records grouped by calendar date, preserving input order within each date.
#[derive(Default)]
struct DayRecords<'a> {
    obligations: Vec<&'a Obligation>,
    expenses: Vec<&'a Expense>,
    actual_revenue: Vec<&'a ActualRevenueEntry>,
    expected_revenue: Vec<&'a ExpectedRevenueEntry>,
}

fn group_by_date<'a>(inputs: &ForecastInputs<'a>) -> HashMap<NaiveDate, DayRecords<'a>> {
    let mut by_date: HashMap<NaiveDate, DayRecords<'a>> = HashMap::new();

    for o in inputs.obligations.iter().filter(|o| o.is_outstanding()) {
        by_date.entry(o.due_date()).or_default().obligations.push(o);
    }
    for e in inputs.expenses {
        by_date.entry(e.expense_date()).or_default().expenses.push(e);
    }
    for r in inputs.actual_revenue {
        by_date.entry(r.revenue_date).or_default().actual_revenue.push(r);
    }
    for r in inputs.expected_revenue {
        by_date.entry(r.expected_date).or_default().expected_revenue.push(r);
    }

    by_date
}

/// Running totals for the day being projected.
struct DayLedger {
    morning_inflow: Money,
    morning_outflow: Money,
    afternoon_inflow: Money,
    afternoon_outflow: Money,
    items: Vec<ContributingItem>,
}

impl DayLedger {
    fn new() -> Self {
        Self {
            morning_inflow: Money::ZERO,
            morning_outflow: Money::ZERO,
            afternoon_inflow: Money::ZERO,
            afternoon_outflow: Money::ZERO,
            items: Vec::new(),
        }
    }

    fn record(&mut self, window: Window, flow: Flow, amount: Money, source: ItemSource) {
        let bucket = match (window, flow) {
            (Window::Morning, Flow::Inflow) => &mut self.morning_inflow,
            (Window::Morning, Flow::Outflow) => &mut self.morning_outflow,
            (Window::Afternoon, Flow::Inflow) => &mut self.afternoon_inflow,
            (Window::Afternoon, Flow::Outflow) => &mut self.afternoon_outflow,
        };
        *bucket += amount;

        self.items.push(ContributingItem {
            window,
            flow,
            label: source.label(),
            amount,
            source,
        });
    }
}

/// Project the branch's cash position for `settings.forecast_horizon_days` days
/// starting at `today`.
///
/// Each day opens on the previous day's closing balance (day 0 opens on
/// `settings.initial_balance`). Records dated outside the horizon are ignored, as
/// are paid cheques. When a date has any actual revenue, expected revenue for that
/// date is dropped entirely.
pub fn build_forecast(
    today: NaiveDate,
    settings: &Settings,
    inputs: &ForecastInputs<'_>,
) -> Vec<ForecastDay> {
    let horizon = settings.forecast_horizon_days as usize;
    let mut by_date = group_by_date(inputs);
    let mut days = Vec::with_capacity(horizon);
    let mut running = settings.initial_balance;

    for offset in 0..horizon {
        let Some(date) = today.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        let records = by_date.remove(&date).unwrap_or_default();
        let day = project_day(date, running, settings.safe_threshold, records);
        running = day.closing_balance;
        days.push(day);
    }

    days
}

fn project_day(
    date: NaiveDate,
    opening_balance: Money,
    safe_threshold: Money,
    records: DayRecords<'_>,
) -> ForecastDay {
    let mut ledger = DayLedger::new();

    for o in records.obligations {
        ledger.record(
            Window::for_obligation(o.execution_time()),
            Flow::Outflow,
            o.amount(),
            ItemSource::Obligation(o.clone()),
        );
    }

    // Expenses have no time of day; they count against the morning.
    for e in records.expenses {
        ledger.record(
            Window::Morning,
            Flow::Outflow,
            e.amount(),
            ItemSource::Expense(e.clone()),
        );
    }

    let has_actuals = !records.actual_revenue.is_empty();
    for r in records.actual_revenue {
        ledger.record(
            Window::for_revenue(r.settlement_time),
            Flow::Inflow,
            r.amount,
            ItemSource::ActualRevenue(r.clone()),
        );
    }

    if !has_actuals {
        for r in records.expected_revenue {
            ledger.record(
                Window::Afternoon,
                Flow::Inflow,
                r.expected_amount,
                ItemSource::ExpectedRevenue(r.clone()),
            );
        }
    }

    let morning_balance = opening_balance + ledger.morning_inflow - ledger.morning_outflow;
    let closing_balance = morning_balance + ledger.afternoon_inflow - ledger.afternoon_outflow;

    ForecastDay {
        date,
        opening_balance,
        morning_inflow: ledger.morning_inflow,
        morning_outflow: ledger.morning_outflow,
        morning_balance,
        afternoon_inflow: ledger.afternoon_inflow,
        afternoon_outflow: ledger.afternoon_outflow,
        closing_balance,
        morning_risk: classify(morning_balance, safe_threshold),
        overall_risk: classify(closing_balance, safe_threshold),
        items: ledger.items,
    }
}
