//! Suggestion execution.
//!
//! Accepting a suggestion follows a load → decide → persist pipeline:
//!
//! ```text
//! Suggestion + Acceptance
//!   ↓
//! 1. Check the acceptance (justification, time window)
//!   ↓
//! 2. Load the target record (branch-scoped)
//!   ↓
//! 3. Apply the change through the record's own rules
//!   ↓
//! 4. Persist with a single upsert
//! ```
//!
//! Any validation failure returns before step 4, so the store is left untouched.
//! Rejecting a suggestion needs no call at all.

use chrono::{Days, NaiveDate};
use tracing::{debug, info, instrument};

use pharmaops_core::{BranchId, DomainError, ExpenseId, ObligationId, TimeOfDay};
use pharmaops_forecast::{Suggestion, SuggestionKind, SuggestionTarget, Window};
use pharmaops_treasury::{Expense, Obligation};

use crate::error::EngineResult;
use crate::store::TreasuryStore;

/// Execution time proposed by a MoveToAfternoon suggestion when the caller gives none.
pub const DEFAULT_AFTERNOON_TIME: TimeOfDay = TimeOfDay::hm(13, 0);

/// What the user supplied when accepting a suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acceptance {
    /// Mandatory for cheque delays.
    pub justification: Option<String>,
    /// Overrides the default "next day" for delays.
    pub new_date: Option<NaiveDate>,
    /// Overrides the default 13:00 for afternoon moves.
    pub execution_time: Option<TimeOfDay>,
}

impl Acceptance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = Some(justification.into());
        self
    }

    pub fn with_new_date(mut self, new_date: NaiveDate) -> Self {
        self.new_date = Some(new_date);
        self
    }

    pub fn with_execution_time(mut self, execution_time: TimeOfDay) -> Self {
        self.execution_time = Some(execution_time);
        self
    }

    fn justification(&self) -> Option<&str> {
        self.justification
            .as_deref()
            .map(str::trim)
            .filter(|j| !j.is_empty())
    }
}

/// The record as persisted after execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatedRecord {
    Obligation(Obligation),
    Expense(Expense),
}

/// Apply an accepted suggestion and persist the one record it changes.
#[instrument(skip_all, fields(branch = %branch, kind = ?suggestion.kind))]
pub fn execute_suggestion<S>(
    store: &S,
    branch: BranchId,
    suggestion: &Suggestion,
    acceptance: &Acceptance,
) -> EngineResult<UpdatedRecord>
where
    S: TreasuryStore + ?Sized,
{
    match (suggestion.kind, suggestion.target) {
        (SuggestionKind::DelayObligation, SuggestionTarget::Obligation(id)) => {
            delay_obligation(store, branch, id, acceptance)
        }
        (SuggestionKind::MoveToAfternoon, SuggestionTarget::Obligation(id)) => {
            move_to_afternoon(store, branch, id, acceptance)
        }
        (SuggestionKind::DelayExpense, SuggestionTarget::Expense(id)) => {
            delay_expense(store, branch, id, acceptance)
        }
        (kind, target) => Err(DomainError::validation(format!(
            "suggestion kind {kind:?} cannot target {target:?}"
        ))
        .into()),
    }
}

fn delay_obligation<S>(
    store: &S,
    branch: BranchId,
    id: ObligationId,
    acceptance: &Acceptance,
) -> EngineResult<UpdatedRecord>
where
    S: TreasuryStore + ?Sized,
{
    let reason = acceptance
        .justification()
        .ok_or_else(|| DomainError::validation("a justification is required to delay a cheque"))?;

    let mut obligation = load_obligation(store, branch, id)?;
    let new_date = match acceptance.new_date {
        Some(date) => date,
        None => next_day(obligation.due_date())?,
    };

    obligation.delay(reason, new_date)?;
    if let Some(time) = acceptance.execution_time {
        obligation.move_execution_time(time)?;
    }

    store.upsert_obligation(branch, obligation.clone())?;
    info!(obligation = %id, new_due_date = %new_date, "cheque delayed");
    Ok(UpdatedRecord::Obligation(obligation))
}

fn move_to_afternoon<S>(
    store: &S,
    branch: BranchId,
    id: ObligationId,
    acceptance: &Acceptance,
) -> EngineResult<UpdatedRecord>
where
    S: TreasuryStore + ?Sized,
{
    let time = acceptance.execution_time.unwrap_or(DEFAULT_AFTERNOON_TIME);
    if Window::for_obligation(time) != Window::Afternoon {
        return Err(DomainError::validation(format!(
            "execution time {time} is not in the afternoon window"
        ))
        .into());
    }

    let mut obligation = load_obligation(store, branch, id)?;
    obligation.move_execution_time(time)?;

    store.upsert_obligation(branch, obligation.clone())?;
    info!(obligation = %id, execution_time = %time, "cheque moved to afternoon");
    Ok(UpdatedRecord::Obligation(obligation))
}

fn delay_expense<S>(
    store: &S,
    branch: BranchId,
    id: ExpenseId,
    acceptance: &Acceptance,
) -> EngineResult<UpdatedRecord>
where
    S: TreasuryStore + ?Sized,
{
    let mut expense = store
        .expense(branch, id)?
        .ok_or_else(DomainError::not_found)?;
    let new_date = match acceptance.new_date {
        Some(date) => date,
        None => next_day(expense.expense_date())?,
    };

    expense.postpone(new_date)?;

    store.upsert_expense(branch, expense.clone())?;
    info!(expense = %id, new_date = %new_date, "expense postponed");
    Ok(UpdatedRecord::Expense(expense))
}

fn load_obligation<S>(store: &S, branch: BranchId, id: ObligationId) -> EngineResult<Obligation>
where
    S: TreasuryStore + ?Sized,
{
    debug!(obligation = %id, "loading cheque");
    Ok(store
        .obligation(branch, id)?
        .ok_or_else(DomainError::not_found)?)
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| DomainError::validation("date out of range"))
}
