use thiserror::Error;

use bierklub_auth::CredentialError;
use bierklub_core::DomainError;

use crate::store::StoreError;

/// Failure of a query or workflow.
///
/// Rejected form input is not an error; workflows report it through their
/// outcome type.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound))
    }
}
