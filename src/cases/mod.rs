//! Business rules sitting between the HTTP handlers and the repositories.
//!
//! Every write that references other documents resolves all of them before
//! anything is persisted, so a missing reference never leaves a partial
//! write behind.

use mongodb::bson::{oid::ObjectId, DateTime};
use tracing::info;

use crate::{
    models::{Activatable, Deletable},
    repository::{Document, Repository},
};

pub mod accident;
pub mod catalog;
pub mod employee;
pub mod error;
pub mod project;
pub mod user;

pub use error::CaseError;

/// Loads the document addressed by the request.
pub(crate) async fn load<T: Document>(
    repository: &dyn Repository<T>,
    _id: &ObjectId,
) -> Result<T, CaseError> {
    repository
        .find_by_id(_id)
        .await?
        .ok_or(CaseError::NotFound(T::ENTITY))
}

/// Loads a document referenced from another document's body.
pub(crate) async fn resolve<T: Document>(
    repository: &dyn Repository<T>,
    _id: &ObjectId,
) -> Result<T, CaseError> {
    repository
        .find_by_id(_id)
        .await?
        .ok_or(CaseError::ReferenceNotFound(T::ENTITY))
}

pub(crate) async fn set_active<T: Document + Activatable>(
    repository: &dyn Repository<T>,
    _id: &ObjectId,
    active: bool,
) -> Result<T, CaseError> {
    let mut document = load(repository, _id).await?;
    document.set_active(active, DateTime::now());
    repository.replace(&document).await?;

    info!(entity = T::ENTITY, id = %_id, active, "activation changed");
    Ok(document)
}

pub(crate) async fn soft_delete<T: Document + Deletable>(
    repository: &dyn Repository<T>,
    _id: &ObjectId,
) -> Result<T, CaseError> {
    let mut document = load(repository, _id).await?;
    document.mark_deleted(DateTime::now());
    repository.replace(&document).await?;

    info!(entity = T::ENTITY, id = %_id, "soft deleted");
    Ok(document)
}

/// Overwrites `slot` only when `value` differs, reporting whether it did.
pub(crate) fn assign_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot != value {
        *slot = value;
        true
    } else {
        false
    }
}
