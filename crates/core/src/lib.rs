//! `pharmaops-core`: shared building blocks for the treasury and forecast crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the domain error model, fixed-point money and time-of-day.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod time;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BranchId, ExpenseId, ObligationId, RevenueEntryId, SupplierId};
pub use money::Money;
pub use time::TimeOfDay;
pub use value_object::ValueObject;
