use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Days, NaiveDate};
use pharmaops_core::{ExpenseId, Money, ObligationId, RevenueEntryId, SupplierId, TimeOfDay};
use pharmaops_forecast::{ForecastInputs, build_forecast, suggest};
use pharmaops_treasury::{
    ActualRevenueEntry, Confidence, ExpectedRevenueEntry, Expense, ExpensePriority, ExpenseType,
    FlexibilityLevel, Obligation, ObligationPriority, PaymentType, Settings, Supplier,
    index_suppliers,
};

struct Dataset {
    suppliers: Vec<Supplier>,
    obligations: Vec<Obligation>,
    expenses: Vec<Expense>,
    actual: Vec<ActualRevenueEntry>,
    expected: Vec<ExpectedRevenueEntry>,
}

/// A branch with several cheques and expenses every day, actual takings for the
/// first week and expected takings afterwards.
fn dataset(today: NaiveDate, horizon: u64, per_day: usize) -> Dataset {
    let levels = [FlexibilityLevel::Low, FlexibilityLevel::Medium, FlexibilityLevel::High];
    let priorities = [
        ObligationPriority::Critical,
        ObligationPriority::Normal,
        ObligationPriority::Flexible,
    ];

    let suppliers: Vec<Supplier> = (0..12)
        .map(|i| Supplier::new(SupplierId::new(), format!("supplier {i}"), levels[i % 3]).unwrap())
        .collect();

    let mut data = Dataset {
        suppliers,
        obligations: Vec::new(),
        expenses: Vec::new(),
        actual: Vec::new(),
        expected: Vec::new(),
    };

    for offset in 0..horizon {
        let date = today.checked_add_days(Days::new(offset)).unwrap();
        for i in 0..per_day {
            let supplier = &data.suppliers[i % data.suppliers.len()];
            data.obligations.push(
                Obligation::schedule(
                    ObligationId::new(),
                    supplier.id,
                    Money::from_major(400 + (i as i64) * 35),
                    date,
                    priorities[i % 3],
                )
                .unwrap()
                .with_execution_time(TimeOfDay::hm(8 + (i % 6) as u16, 30)),
            );
            let kind = if i % 2 == 0 { ExpenseType::Variable } else { ExpenseType::Fixed };
            data.expenses.push(
                Expense::new(
                    ExpenseId::new(),
                    "operations",
                    Money::from_major(120 + i as i64),
                    date,
                    kind,
                    ExpensePriority::Medium,
                )
                .unwrap()
                .deferrable(3),
            );
        }
        if offset < 7 {
            data.actual.push(
                ActualRevenueEntry::new(RevenueEntryId::new(), date, Money::from_major(2500), PaymentType::Cash)
                    .unwrap(),
            );
        }
        data.expected.push(
            ExpectedRevenueEntry::new(
                RevenueEntryId::new(),
                date,
                Money::from_major(3000),
                Confidence::Medium,
                "weekday average",
            )
            .unwrap(),
        );
    }

    data
}

fn bench_forecast(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let mut group = c.benchmark_group("forecast");

    for horizon in [30u32, 90] {
        let data = dataset(today, u64::from(horizon), 8);
        let settings = Settings::new(Money::from_major(5000), Money::from_major(1000), horizon).unwrap();
        let inputs = ForecastInputs {
            obligations: &data.obligations,
            expenses: &data.expenses,
            actual_revenue: &data.actual,
            expected_revenue: &data.expected,
        };
        let index = index_suppliers(data.suppliers.clone());

        group.bench_with_input(BenchmarkId::new("build", horizon), &inputs, |b, inputs| {
            b.iter(|| build_forecast(black_box(today), black_box(&settings), black_box(inputs)))
        });

        let days = build_forecast(today, &settings, &inputs);
        group.bench_with_input(BenchmarkId::new("suggest", horizon), &days, |b, days| {
            b.iter(|| suggest(black_box(days), black_box(&index)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_forecast);
criterion_main!(benches);
