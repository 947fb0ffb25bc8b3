use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pharmaops_core::{DomainError, DomainResult, Entity, Money, ObligationId, SupplierId, TimeOfDay};

/// Cheques execute at 09:00 unless scheduled otherwise.
pub const DEFAULT_EXECUTION_TIME: TimeOfDay = TimeOfDay::hm(9, 0);

/// How much room there is to move a cheque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationPriority {
    Critical,
    Normal,
    Flexible,
}

/// Obligation status lifecycle.
///
/// `Scheduled` → `Paid` (terminal), or `Scheduled` → `Delayed` → `Delayed` ... → `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObligationStatus {
    Scheduled,
    Paid,
    Delayed,
}

/// A scheduled supplier payment (cheque).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ObligationRecord")]
pub struct Obligation {
    id: ObligationId,
    supplier_id: SupplierId,
    amount: Money,
    due_date: NaiveDate,
    execution_time: TimeOfDay,
    priority: ObligationPriority,
    status: ObligationStatus,
    delay_reason: Option<String>,
}

impl Obligation {
    /// Create a new cheque in `Scheduled` status, executing at [`DEFAULT_EXECUTION_TIME`].
    pub fn schedule(
        id: ObligationId,
        supplier_id: SupplierId,
        amount: Money,
        due_date: NaiveDate,
        priority: ObligationPriority,
    ) -> DomainResult<Self> {
        let amount = amount.ensure_positive("obligation amount")?;
        Ok(Self {
            id,
            supplier_id,
            amount,
            due_date,
            execution_time: DEFAULT_EXECUTION_TIME,
            priority,
            status: ObligationStatus::Scheduled,
            delay_reason: None,
        })
    }

    pub fn with_execution_time(mut self, execution_time: TimeOfDay) -> Self {
        self.execution_time = execution_time;
        self
    }

    pub fn id_typed(&self) -> ObligationId {
        self.id
    }

    pub fn supplier_id(&self) -> SupplierId {
        self.supplier_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn execution_time(&self) -> TimeOfDay {
        self.execution_time
    }

    pub fn priority(&self) -> ObligationPriority {
        self.priority
    }

    pub fn status(&self) -> ObligationStatus {
        self.status
    }

    pub fn delay_reason(&self) -> Option<&str> {
        self.delay_reason.as_deref()
    }

    /// Whether the cheque still weighs on the cash position (anything not yet paid).
    pub fn is_outstanding(&self) -> bool {
        self.status != ObligationStatus::Paid
    }

    pub fn mark_paid(&mut self) -> DomainResult<()> {
        self.ensure_outstanding()?;
        self.status = ObligationStatus::Paid;
        Ok(())
    }

    /// Postpone the cheque. A non-blank reason is mandatory and the new due date
    /// may not precede the current one. Can be applied repeatedly.
    pub fn delay(&mut self, reason: &str, new_due_date: NaiveDate) -> DomainResult<()> {
        self.ensure_outstanding()?;

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::validation("a delay reason is required"));
        }
        if new_due_date < self.due_date {
            return Err(DomainError::validation(format!(
                "new due date {new_due_date} precedes current due date {}",
                self.due_date
            )));
        }

        self.status = ObligationStatus::Delayed;
        self.delay_reason = Some(reason.to_string());
        self.due_date = new_due_date;
        Ok(())
    }

    /// Change only the time of day the cheque executes; status is untouched.
    pub fn move_execution_time(&mut self, execution_time: TimeOfDay) -> DomainResult<()> {
        self.ensure_outstanding()?;
        self.execution_time = execution_time;
        Ok(())
    }

    fn ensure_outstanding(&self) -> DomainResult<()> {
        if self.status == ObligationStatus::Paid {
            return Err(DomainError::conflict("obligation is already paid"));
        }
        Ok(())
    }
}

/// Stored shape of an [`Obligation`]; checked against the cheque invariants on load.
#[derive(Deserialize)]
struct ObligationRecord {
    id: ObligationId,
    supplier_id: SupplierId,
    amount: Money,
    due_date: NaiveDate,
    #[serde(default = "default_execution_time")]
    execution_time: TimeOfDay,
    priority: ObligationPriority,
    status: ObligationStatus,
    delay_reason: Option<String>,
}

fn default_execution_time() -> TimeOfDay {
    DEFAULT_EXECUTION_TIME
}

impl TryFrom<ObligationRecord> for Obligation {
    type Error = DomainError;

    fn try_from(record: ObligationRecord) -> DomainResult<Self> {
        let mut obligation = Obligation::schedule(
            record.id,
            record.supplier_id,
            record.amount,
            record.due_date,
            record.priority,
        )?
        .with_execution_time(record.execution_time);

        let delay_reason = record
            .delay_reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        if record.status == ObligationStatus::Delayed && delay_reason.is_none() {
            return Err(DomainError::invariant(format!(
                "obligation {} is delayed without a reason",
                record.id
            )));
        }

        obligation.status = record.status;
        obligation.delay_reason = delay_reason;
        Ok(obligation)
    }
}

impl Entity for Obligation {
    type Id = ObligationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
