//! Advisory: turn morning shortfalls into concrete rescheduling proposals.
//!
//! The heuristic is local and greedy. For every day whose morning window goes
//! negative it proposes, in order:
//!
//! - **A** delaying cheques that are flexible, or owed to a highly flexible supplier
//!   (largest first, low risk);
//! - **B** executing normal-priority cheques after the afternoon settlement, but only
//!   when the day closes above the morning gap (medium risk);
//! - **C** postponing deferrable variable expenses (largest first, medium risk).
//!
//! Suggestions are recomputed on every run and never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pharmaops_core::{ExpenseId, Money, ObligationId};
use pharmaops_treasury::{
    Expense, FlexibilityLevel, Obligation, ObligationPriority, SupplierIndex,
};

use crate::day::ForecastDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    DelayObligation,
    MoveToAfternoon,
    DelayExpense,
}

/// How risky acting on a suggestion is for supplier relations and operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionRisk {
    Low,
    Medium,
    High,
}

/// The record a suggestion proposes to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SuggestionTarget {
    Obligation(ObligationId),
    Expense(ExpenseId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub date: NaiveDate,
    pub kind: SuggestionKind,
    pub target: SuggestionTarget,
    /// Cash freed in the morning window if the suggestion is applied.
    pub impact: Money,
    pub reason: String,
    pub risk_level: SuggestionRisk,
}

/// Time the afternoon card settlement is expected to land, quoted in reasons.
const SETTLEMENT_ARRIVAL: &str = "13:00";

/// Produce suggestions for every morning-critical day, in day order then rule order.
///
/// Suppliers are resolved through `suppliers`; a cheque whose supplier is missing is
/// treated as having unknown flexibility.
pub fn suggest(days: &[ForecastDay], suppliers: &SupplierIndex) -> Vec<Suggestion> {
    let mut out = Vec::new();

    for day in days.iter().filter(|d| d.is_morning_critical()) {
        let gap = day.morning_balance.abs();
        delay_flexible_obligations(day, gap, suppliers, &mut out);
        move_normal_obligations(day, gap, &mut out);
        delay_variable_expenses(day, gap, &mut out);
    }

    out
}

fn delay_flexible_obligations(
    day: &ForecastDay,
    gap: Money,
    suppliers: &SupplierIndex,
    out: &mut Vec<Suggestion>,
) {
    let mut candidates: Vec<&Obligation> = day
        .morning_obligations()
        .filter(|o| {
            o.priority() == ObligationPriority::Flexible
                || supplier_flexibility(o, suppliers) == Some(FlexibilityLevel::High)
        })
        .collect();
    candidates.sort_by(|a, b| b.amount().cmp(&a.amount()));

    for o in candidates {
        let why = match suppliers.get(&o.supplier_id()) {
            Some(s) if s.flexibility_level == FlexibilityLevel::High => {
                format!("{} has high payment flexibility", s.name)
            }
            Some(s) => format!(
                "cheque is marked flexible ({} flexibility: {})",
                s.name,
                s.flexibility_level.as_str()
            ),
            None => "cheque is marked flexible (supplier not on file)".to_string(),
        };

        out.push(Suggestion {
            date: day.date,
            kind: SuggestionKind::DelayObligation,
            target: SuggestionTarget::Obligation(o.id_typed()),
            impact: o.amount(),
            reason: format!(
                "{why}; delaying this cheque frees {} against a morning gap of {gap}",
                o.amount()
            ),
            risk_level: SuggestionRisk::Low,
        });
    }
}

fn move_normal_obligations(day: &ForecastDay, gap: Money, out: &mut Vec<Suggestion>) {
    if day.closing_balance <= gap {
        return;
    }

    for o in day
        .morning_obligations()
        .filter(|o| o.priority() == ObligationPriority::Normal)
    {
        out.push(Suggestion {
            date: day.date,
            kind: SuggestionKind::MoveToAfternoon,
            target: SuggestionTarget::Obligation(o.id_typed()),
            impact: o.amount(),
            reason: format!(
                "card settlement arrives around {SETTLEMENT_ARRIVAL} and the day closes at {}; \
                 executing this cheque after settlement covers the morning gap of {gap}",
                day.closing_balance
            ),
            risk_level: SuggestionRisk::Medium,
        });
    }
}

fn delay_variable_expenses(day: &ForecastDay, gap: Money, out: &mut Vec<Suggestion>) {
    let mut candidates: Vec<&Expense> = day
        .expenses()
        .filter(|e| e.is_postponable_variable())
        .collect();
    candidates.sort_by(|a, b| b.amount().cmp(&a.amount()));

    for e in candidates {
        let window = match e.max_delay_days() {
            0 => String::new(),
            n => format!(" (up to {n} day(s))"),
        };
        out.push(Suggestion {
            date: day.date,
            kind: SuggestionKind::DelayExpense,
            target: SuggestionTarget::Expense(e.id_typed()),
            impact: e.amount(),
            reason: format!(
                "{} is a deferrable variable expense{window}; postponing it frees {} against a morning gap of {gap}",
                e.category(),
                e.amount()
            ),
            risk_level: SuggestionRisk::Medium,
        });
    }
}

fn supplier_flexibility(o: &Obligation, suppliers: &SupplierIndex) -> Option<FlexibilityLevel> {
    suppliers.get(&o.supplier_id()).map(|s| s.flexibility_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ForecastInputs, build_forecast};
    use crate::risk::RiskTier;
    use crate::test_support::*;
    use pharmaops_core::TimeOfDay;
    use pharmaops_treasury::{ExpectedRevenueEntry, ExpenseType, Settings, index_suppliers};
    use proptest::prelude::*;

    fn forecast(
        settings: &Settings,
        obligations: &[Obligation],
        expenses: &[Expense],
        expected: &[ExpectedRevenueEntry],
    ) -> Vec<ForecastDay> {
        let inputs = ForecastInputs {
            obligations,
            expenses,
            actual_revenue: &[],
            expected_revenue: expected,
        };
        build_forecast(today(), settings, &inputs)
    }

    #[test]
    fn single_flexible_cheque_yields_one_low_risk_delay() {
        let s = supplier("PharmaDist", FlexibilityLevel::High);
        let o = cheque(s.id, 1200, 0, TimeOfDay::hm(9, 0), ObligationPriority::Flexible);
        let days = forecast(&settings(1000, 500, 30), &[o.clone()], &[], &[]);

        let suggestions = suggest(&days, &index_suppliers([s]));

        assert_eq!(suggestions.len(), 1);
        let sug = &suggestions[0];
        assert_eq!(sug.kind, SuggestionKind::DelayObligation);
        assert_eq!(sug.target, SuggestionTarget::Obligation(o.id_typed()));
        assert_eq!(sug.impact, Money::from_major(1200));
        assert_eq!(sug.risk_level, SuggestionRisk::Low);
        assert_eq!(sug.date, today());
        assert!(sug.reason.contains("PharmaDist has high payment flexibility"));
    }

    #[test]
    fn suggestion_still_targets_the_morning_when_the_close_is_safe() {
        let s = supplier("PharmaDist", FlexibilityLevel::High);
        let o = cheque(s.id, 1200, 0, TimeOfDay::hm(9, 0), ObligationPriority::Flexible);
        let e = expected(2000, 0);
        let days = forecast(&settings(1000, 500, 30), &[o], &[], &[e]);
        assert_eq!(days[0].overall_risk, RiskTier::Safe);

        let suggestions = suggest(&days, &index_suppliers([s]));

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::DelayObligation);
    }

    #[test]
    fn rules_run_in_order_with_amount_ranking() {
        let flexible = supplier("PharmaDist", FlexibilityLevel::High);
        let strict = supplier("Medico", FlexibilityLevel::Low);

        let small_flex = cheque(strict.id, 100, 0, TimeOfDay::hm(8, 0), ObligationPriority::Flexible);
        let big_flex = cheque(flexible.id, 900, 0, TimeOfDay::hm(9, 0), ObligationPriority::Critical);
        let normal = cheque(strict.id, 400, 0, TimeOfDay::hm(9, 30), ObligationPriority::Normal);
        let critical = cheque(strict.id, 300, 0, TimeOfDay::hm(9, 0), ObligationPriority::Critical);

        let small_var = expense("cleaning", 50, 0, ExpenseType::Variable).deferrable(2);
        let big_var = expense("marketing", 250, 0, ExpenseType::Variable).deferrable(0);
        let fixed = expense("rent", 500, 0, ExpenseType::Fixed).deferrable(5);
        let locked = expense("payroll top-up", 80, 0, ExpenseType::Variable);

        // Opening 1000, morning out 1700 + 880 → morning -1580; afternoon +5000 → close 3420.
        let days = forecast(
            &settings(1000, 0, 2),
            &[small_flex.clone(), big_flex.clone(), normal.clone(), critical],
            &[small_var.clone(), big_var.clone(), fixed, locked],
            &[expected(5000, 0)],
        );
        assert_eq!(days[0].morning_balance, Money::from_major(-1580));

        let suggestions = suggest(&days, &index_suppliers([flexible, strict]));

        let targets: Vec<(SuggestionKind, SuggestionTarget)> =
            suggestions.iter().map(|s| (s.kind, s.target)).collect();
        assert_eq!(
            targets,
            vec![
                (SuggestionKind::DelayObligation, SuggestionTarget::Obligation(big_flex.id_typed())),
                (SuggestionKind::DelayObligation, SuggestionTarget::Obligation(small_flex.id_typed())),
                (SuggestionKind::MoveToAfternoon, SuggestionTarget::Obligation(normal.id_typed())),
                (SuggestionKind::DelayExpense, SuggestionTarget::Expense(big_var.id_typed())),
                (SuggestionKind::DelayExpense, SuggestionTarget::Expense(small_var.id_typed())),
            ]
        );
        assert!(suggestions[1].reason.contains("Medico flexibility: low"));
        assert!(suggestions[2].reason.contains("13:00"));
        assert_eq!(suggestions[2].risk_level, SuggestionRisk::Medium);
        assert!(suggestions[4].reason.contains("up to 2 day(s)"));
    }

    #[test]
    fn no_afternoon_move_when_the_close_does_not_cover_the_gap() {
        let strict = supplier("Medico", FlexibilityLevel::Low);
        let normal = cheque(strict.id, 600, 0, TimeOfDay::hm(9, 0), ObligationPriority::Normal);

        // morning -100; close -100 + 150 = 50, which does not exceed the gap of 100.
        let days = forecast(&settings(500, 0, 1), &[normal], &[], &[expected(150, 0)]);
        assert_eq!(days[0].closing_balance, Money::from_major(50));

        assert!(suggest(&days, &index_suppliers([strict])).is_empty());
    }

    #[test]
    fn afternoon_move_needs_a_close_strictly_above_the_gap() {
        let strict = supplier("Medico", FlexibilityLevel::Low);
        let normal = cheque(strict.id, 600, 0, TimeOfDay::hm(9, 0), ObligationPriority::Normal);
        let index = index_suppliers([strict]);

        // morning -100; close -100 + 200 = 100, exactly the gap.
        let level = forecast(&settings(500, 0, 1), &[normal.clone()], &[], &[expected(200, 0)]);
        assert_eq!(level[0].closing_balance, Money::from_major(100));
        assert!(suggest(&level, &index).is_empty());

        let above = forecast(&settings(500, 0, 1), &[normal.clone()], &[], &[expected(201, 0)]);
        let suggestions = suggest(&above, &index);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, SuggestionKind::MoveToAfternoon);
        assert_eq!(suggestions[0].target, SuggestionTarget::Obligation(normal.id_typed()));
    }

    #[test]
    fn missing_supplier_is_treated_as_unknown_flexibility() {
        let gone = supplier("Closed Down Ltd", FlexibilityLevel::High);
        let critical = cheque(gone.id, 500, 0, TimeOfDay::hm(9, 0), ObligationPriority::Critical);
        let flexible = cheque(gone.id, 400, 0, TimeOfDay::hm(9, 0), ObligationPriority::Flexible);

        let days = forecast(&settings(0, 0, 1), &[critical, flexible.clone()], &[], &[]);
        let suggestions = suggest(&days, &SupplierIndex::new());

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].target, SuggestionTarget::Obligation(flexible.id_typed()));
        assert!(suggestions[0].reason.contains("supplier not on file"));
    }

    #[test]
    fn afternoon_cheques_are_not_candidates() {
        let s = supplier("PharmaDist", FlexibilityLevel::High);
        let late = cheque(s.id, 700, 0, TimeOfDay::hm(14, 0), ObligationPriority::Flexible);
        let rent = expense("rent", 100, 0, ExpenseType::Fixed);

        let days = forecast(&settings(0, 0, 1), &[late], &[rent], &[]);
        assert!(days[0].is_morning_critical());

        assert!(suggest(&days, &index_suppliers([s])).is_empty());
    }

    #[test]
    fn recurring_shortfalls_produce_independent_suggestions_per_day() {
        let s = supplier("PharmaDist", FlexibilityLevel::High);
        let d0 = cheque(s.id, 100, 0, TimeOfDay::hm(9, 0), ObligationPriority::Flexible);
        let d1 = cheque(s.id, 100, 1, TimeOfDay::hm(9, 0), ObligationPriority::Flexible);

        let days = forecast(&settings(0, 0, 3), &[d0, d1], &[], &[]);
        let suggestions = suggest(&days, &index_suppliers([s]));

        let dates: Vec<NaiveDate> = suggestions.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(0), day(1)]);
    }

    #[test]
    fn warning_closes_do_not_trigger_suggestions() {
        let s = supplier("PharmaDist", FlexibilityLevel::High);
        let o = cheque(s.id, 600, 0, TimeOfDay::hm(9, 0), ObligationPriority::Flexible);
        let days = forecast(&settings(1000, 500, 1), &[o], &[], &[]);
        assert_eq!(days[0].overall_risk, RiskTier::Warning);

        assert!(suggest(&days, &index_suppliers([s])).is_empty());
    }

    #[test]
    fn suggestion_target_serializes_tagged() {
        let id = ObligationId::new();
        let json = serde_json::to_value(SuggestionTarget::Obligation(id)).unwrap();
        assert_eq!(json["kind"], "obligation");
        assert_eq!(json["id"], id.to_string());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: days that are not morning-critical never receive suggestions,
        /// and every suggestion frees a positive amount.
        #[test]
        fn only_morning_critical_days_get_suggestions(
            initial in -2_000_000i64..20_000_000i64,
            obligations in arb_obligations(20),
            expenses in arb_expenses(20),
            expected in arb_expected_revenue(20),
        ) {
            let s = Settings::new(Money::from_major(1000), Money::from_minor(initial), 20).unwrap();
            let days = forecast(&s, &obligations, &expenses, &expected);
            let suggestions = suggest(&days, &SupplierIndex::new());

            for sug in &suggestions {
                let d = days.iter().find(|d| d.date == sug.date).unwrap();
                prop_assert!(d.morning_risk == RiskTier::Critical || d.morning_balance.is_negative());
                prop_assert!(sug.impact.is_positive());
            }
            for pair in suggestions.windows(2) {
                prop_assert!(pair[0].date <= pair[1].date);
            }
        }
    }
}
