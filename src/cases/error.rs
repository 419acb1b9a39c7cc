use thiserror::Error;

use crate::repository::StoreError;

#[derive(Debug, Error)]
pub enum CaseError {
    /// The entity addressed by the request does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// An id carried in the request body does not resolve.
    #[error("referenced {0} not found")]
    ReferenceNotFound(&'static str),
    #[error("{0} already exists")]
    DuplicateEntity(&'static str),
    #[error("invalid password")]
    InvalidCredentials,
    #[error("user account is disabled")]
    AccountDisabled,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
