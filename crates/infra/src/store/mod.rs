//! Persistence collaborator boundary.
//!
//! The forecast engine only reads snapshots and writes single-record upserts
//! through [`TreasuryStore`]. Retries, remote sync and local fallback belong to
//! the implementation behind the trait, never to the engine.

pub mod branch_store;
pub mod treasury;

use thiserror::Error;

pub use branch_store::{BranchStore, InMemoryBranchStore};
pub use treasury::{InMemoryTreasuryStore, TreasuryStore};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a persistence collaborator. Surfaced to callers unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached (or its state is unusable).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
}
