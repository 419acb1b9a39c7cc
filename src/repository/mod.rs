//! Document store access.
//!
//! Cases talk to a [`Repository`] per document type and never to the driver
//! directly, which lets the same cases run on MongoDB or on the in-memory
//! store used for local runs and tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

pub mod error;
pub mod memory;
pub mod mongo;

pub use error::StoreError;

/// A type persisted as one document of a named collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    const COLLECTION: &'static str;
    /// Snake case entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> Option<ObjectId>;
    fn set_id(&mut self, _id: ObjectId);
}

#[async_trait]
pub trait Repository<T: Document>: Send + Sync {
    /// Assigns a fresh id to `document`, inserts it and returns the id.
    async fn create(&self, document: &mut T) -> Result<ObjectId, StoreError>;
    /// `Ok(None)` means no document has this id.
    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<T>, StoreError>;
    /// First document whose string `field` equals `value`.
    async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<T>, StoreError>;
    /// Every document of the collection, including inactive and soft deleted ones.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;
    /// Replaces the whole stored document that has the same id.
    async fn replace(&self, document: &T) -> Result<(), StoreError>;
}
