use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use pharmaops_core::{DomainError, DomainResult, Entity, ExpenseId, Money};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Fixed,
    Variable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpensePriority {
    High,
    Medium,
    Low,
}

/// A scheduled operating expense (rent, utilities, consumables, ...).
///
/// Expenses carry no time of day; the forecast treats them as morning outflows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExpenseRecord")]
pub struct Expense {
    id: ExpenseId,
    category: String,
    amount: Money,
    expense_date: NaiveDate,
    #[serde(rename = "type")]
    kind: ExpenseType,
    priority: ExpensePriority,
    delay_allowed: bool,
    /// Upper bound for a single postponement. `0` means no bound was declared.
    max_delay_days: u32,
}

impl Expense {
    /// Create a non-deferrable expense. Use [`Expense::deferrable`] to allow postponement.
    pub fn new(
        id: ExpenseId,
        category: impl Into<String>,
        amount: Money,
        expense_date: NaiveDate,
        kind: ExpenseType,
        priority: ExpensePriority,
    ) -> DomainResult<Self> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(DomainError::validation("expense category is required"));
        }
        let amount = amount.ensure_positive("expense amount")?;
        Ok(Self {
            id,
            category,
            amount,
            expense_date,
            kind,
            priority,
            delay_allowed: false,
            max_delay_days: 0,
        })
    }

    pub fn deferrable(mut self, max_delay_days: u32) -> Self {
        self.delay_allowed = true;
        self.max_delay_days = max_delay_days;
        self
    }

    pub fn id_typed(&self) -> ExpenseId {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn expense_date(&self) -> NaiveDate {
        self.expense_date
    }

    pub fn kind(&self) -> ExpenseType {
        self.kind
    }

    pub fn priority(&self) -> ExpensePriority {
        self.priority
    }

    pub fn delay_allowed(&self) -> bool {
        self.delay_allowed
    }

    pub fn max_delay_days(&self) -> u32 {
        self.max_delay_days
    }

    /// Variable spend that may be pushed back: the only kind the advisor proposes to move.
    pub fn is_postponable_variable(&self) -> bool {
        self.delay_allowed && self.kind == ExpenseType::Variable
    }

    /// Move the expense to a later date, within `max_delay_days` when one is declared.
    pub fn postpone(&mut self, new_date: NaiveDate) -> DomainResult<()> {
        if !self.delay_allowed {
            return Err(DomainError::conflict("expense does not allow delay"));
        }
        if new_date <= self.expense_date {
            return Err(DomainError::validation(format!(
                "new expense date {new_date} must be after {}",
                self.expense_date
            )));
        }
        if self.max_delay_days > 0 {
            let latest = self
                .expense_date
                .checked_add_days(Days::new(u64::from(self.max_delay_days)))
                .ok_or_else(|| DomainError::validation("expense date out of range"))?;
            if new_date > latest {
                return Err(DomainError::validation(format!(
                    "expense may be delayed by at most {} day(s) (latest {latest})",
                    self.max_delay_days
                )));
            }
        }

        self.expense_date = new_date;
        Ok(())
    }
}

/// Stored shape of an [`Expense`]; loading goes through [`Expense::new`].
#[derive(Deserialize)]
struct ExpenseRecord {
    id: ExpenseId,
    category: String,
    amount: Money,
    expense_date: NaiveDate,
    #[serde(rename = "type")]
    kind: ExpenseType,
    priority: ExpensePriority,
    #[serde(default)]
    delay_allowed: bool,
    #[serde(default)]
    max_delay_days: u32,
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = DomainError;

    fn try_from(record: ExpenseRecord) -> DomainResult<Self> {
        let expense = Expense::new(
            record.id,
            record.category,
            record.amount,
            record.expense_date,
            record.kind,
            record.priority,
        )?;

        match (record.delay_allowed, record.max_delay_days) {
            (true, max) => Ok(expense.deferrable(max)),
            (false, 0) => Ok(expense),
            (false, max) => Err(DomainError::invariant(format!(
                "expense {} declares max_delay_days = {max} but does not allow delay",
                record.id
            ))),
        }
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
