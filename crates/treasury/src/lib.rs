//! Treasury records for a pharmacy branch: suppliers, cheques, expenses and revenue.
//!
//! Pure domain logic only (validation and lifecycle rules). Loading and saving
//! these records is the persistence collaborator's job.

pub mod expense;
pub mod obligation;
pub mod revenue;
pub mod settings;
pub mod supplier;

pub use expense::{Expense, ExpensePriority, ExpenseType};
pub use obligation::{DEFAULT_EXECUTION_TIME, Obligation, ObligationPriority, ObligationStatus};
pub use revenue::{
    ActualRevenueEntry, Confidence, DEFAULT_EXPECTED_TIME, ExpectedRevenueEntry, PaymentType,
};
pub use settings::{MAX_HORIZON_DAYS, Settings};
pub use supplier::{FlexibilityLevel, Supplier, SupplierIndex, index_suppliers};
