//! `pharmaops-infra`
//!
//! **Responsibility:** everything around the pure forecast engine that touches
//! the outside world.
//!
//! - [`store`]: the persistence collaborator trait and an in-memory implementation
//! - [`executor`]: applying accepted suggestions to treasury records
//! - [`service`]: load → build → suggest → summarize, with structured logging
//! - [`config`]: TOML configuration for defaults and logging

pub mod config;
pub mod error;
pub mod executor;
pub mod service;
pub mod store;


pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, EngineResult};
pub use executor::{Acceptance, UpdatedRecord, execute_suggestion};
pub use service::{ForecastReport, ForecastService};
pub use store::{InMemoryTreasuryStore, StoreError, StoreResult, TreasuryStore};
