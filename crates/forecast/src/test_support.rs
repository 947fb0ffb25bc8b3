//! Fixtures shared by the forecast unit tests.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use pharmaops_core::{ExpenseId, Money, ObligationId, RevenueEntryId, SupplierId, TimeOfDay};
use pharmaops_treasury::{
    ActualRevenueEntry, Confidence, ExpectedRevenueEntry, Expense, ExpensePriority, ExpenseType,
    FlexibilityLevel, Obligation, ObligationPriority, PaymentType, Settings, Supplier,
};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn day(offset: u64) -> NaiveDate {
    today().checked_add_days(Days::new(offset)).unwrap()
}

pub fn settings(initial_balance: i64, safe_threshold: i64, horizon: u32) -> Settings {
    Settings::new(
        Money::from_major(safe_threshold),
        Money::from_major(initial_balance),
        horizon,
    )
    .unwrap()
}

pub fn supplier(name: &str, flexibility: FlexibilityLevel) -> Supplier {
    Supplier::new(SupplierId::new(), name, flexibility).unwrap()
}

pub fn cheque(
    supplier_id: SupplierId,
    amount: i64,
    offset: u64,
    time: TimeOfDay,
    priority: ObligationPriority,
) -> Obligation {
    Obligation::schedule(
        ObligationId::new(),
        supplier_id,
        Money::from_major(amount),
        day(offset),
        priority,
    )
    .unwrap()
    .with_execution_time(time)
}

pub fn expense(category: &str, amount: i64, offset: u64, kind: ExpenseType) -> Expense {
    Expense::new(
        ExpenseId::new(),
        category,
        Money::from_major(amount),
        day(offset),
        kind,
        ExpensePriority::Medium,
    )
    .unwrap()
}

pub fn takings(amount: i64, offset: u64, payment_type: PaymentType) -> ActualRevenueEntry {
    ActualRevenueEntry::new(
        RevenueEntryId::new(),
        day(offset),
        Money::from_major(amount),
        payment_type,
    )
    .unwrap()
}

pub fn expected(amount: i64, offset: u64) -> ExpectedRevenueEntry {
    ExpectedRevenueEntry::new(
        RevenueEntryId::new(),
        day(offset),
        Money::from_major(amount),
        Confidence::Medium,
        "weekday average",
    )
    .unwrap()
}

fn arb_time() -> impl Strategy<Value = TimeOfDay> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

fn arb_priority() -> impl Strategy<Value = ObligationPriority> {
    prop_oneof![
        Just(ObligationPriority::Critical),
        Just(ObligationPriority::Normal),
        Just(ObligationPriority::Flexible),
    ]
}

/// Records dated up to `span` days after [`today`], including some past the horizon.
pub fn arb_obligations(span: u64) -> impl Strategy<Value = Vec<Obligation>> {
    prop::collection::vec(
        (0..span, 1i64..5_000_000, arb_time(), arb_priority(), any::<bool>()),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(offset, minor, time, priority, paid)| {
                let mut o = Obligation::schedule(
                    ObligationId::new(),
                    SupplierId::new(),
                    Money::from_minor(minor),
                    day(offset),
                    priority,
                )
                .unwrap()
                .with_execution_time(time);
                if paid {
                    o.mark_paid().unwrap();
                }
                o
            })
            .collect()
    })
}

pub fn arb_expenses(span: u64) -> impl Strategy<Value = Vec<Expense>> {
    prop::collection::vec((0..span, 1i64..2_000_000, any::<bool>(), any::<bool>()), 0..8).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(offset, minor, variable, deferrable)| {
                    let kind = if variable { ExpenseType::Variable } else { ExpenseType::Fixed };
                    let e = Expense::new(
                        ExpenseId::new(),
                        "supplies",
                        Money::from_minor(minor),
                        day(offset),
                        kind,
                        ExpensePriority::Low,
                    )
                    .unwrap();
                    if deferrable { e.deferrable(5) } else { e }
                })
                .collect()
        },
    )
}

pub fn arb_actual_revenue(span: u64) -> impl Strategy<Value = Vec<ActualRevenueEntry>> {
    prop::collection::vec((0..span, 0i64..3_000_000, arb_time()), 0..8).prop_map(|rows| {
        rows.into_iter()
            .map(|(offset, minor, time)| {
                ActualRevenueEntry::new(
                    RevenueEntryId::new(),
                    day(offset),
                    Money::from_minor(minor),
                    PaymentType::Cash,
                )
                .unwrap()
                .with_settlement_time(time)
            })
            .collect()
    })
}

pub fn arb_expected_revenue(span: u64) -> impl Strategy<Value = Vec<ExpectedRevenueEntry>> {
    prop::collection::vec((0..span, 0i64..3_000_000), 0..8).prop_map(|rows| {
        rows.into_iter()
            .map(|(offset, minor)| {
                ExpectedRevenueEntry::new(
                    RevenueEntryId::new(),
                    day(offset),
                    Money::from_minor(minor),
                    Confidence::Low,
                    "",
                )
                .unwrap()
            })
            .collect()
    })
}
