//! `pharmaops-forecast`
//!
//! **Responsibility:** liquidity projection and advisory for one branch.
//!
//! - [`build_forecast`] threads the cash balance day by day over the horizon,
//!   split into a morning and an afternoon settlement window.
//! - [`classify`] maps a balance to a [`RiskTier`].
//! - [`suggest`] turns morning shortfalls into rescheduling [`Suggestion`]s.
//!
//! Everything here is a pure function of its inputs: no IO, no clock, no
//! mutation of treasury records. Applying a suggestion happens in the infra layer.

pub mod builder;
pub mod day;
pub mod risk;
pub mod suggestion;
pub mod summary;

#[cfg(test)]
mod test_support;

pub use builder::{ForecastInputs, build_forecast};
pub use day::{ContributingItem, Flow, ForecastDay, ItemKind, ItemSource, SETTLEMENT_CUTOFF, Window};
pub use risk::{RiskTier, classify};
pub use suggestion::{Suggestion, SuggestionKind, SuggestionRisk, SuggestionTarget, suggest};
pub use summary::{BalancePoint, ForecastSummary, summarize};
