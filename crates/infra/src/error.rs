use thiserror::Error;

use pharmaops_core::DomainError;

use crate::store::StoreError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Error returned by the service and executor.
///
/// Validation failures happen before any write; store failures are passed
/// through exactly as the collaborator reported them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
