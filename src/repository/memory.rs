//! In-process document store.
//!
//! Documents are kept as BSON per collection so they go through the same
//! serialization as the MongoDB backend. Everything is lost when the
//! process exits.

use std::{
    collections::HashMap,
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Bson, Document as BsonDocument};

use super::{Document, Repository, StoreError};

#[derive(Debug, Default)]
pub struct MemoryDatabase {
    collections: Mutex<HashMap<&'static str, Vec<BsonDocument>>>,
}

impl MemoryDatabase {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<&'static str, Vec<BsonDocument>>>, StoreError> {
        self.collections.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Number of documents stored in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|collections| collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

pub struct MemoryRepository<T: Document> {
    db: Arc<MemoryDatabase>,
    document: PhantomData<fn() -> T>,
}

impl<T: Document> MemoryRepository<T> {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self {
            db,
            document: PhantomData,
        }
    }

    fn decode(document: &BsonDocument) -> Result<T, StoreError> {
        bson::from_document(document.clone()).map_err(|source| StoreError::Decode {
            collection: T::COLLECTION,
            source,
        })
    }
}

fn has_id(document: &BsonDocument, _id: &ObjectId) -> bool {
    document.get_object_id("_id").map_or(false, |stored| stored == *_id)
}

#[async_trait]
impl<T: Document> Repository<T> for MemoryRepository<T> {
    async fn create(&self, document: &mut T) -> Result<ObjectId, StoreError> {
        let _id = ObjectId::new();
        document.set_id(_id);

        let encoded = bson::to_document(&*document).map_err(|source| StoreError::Encode {
            collection: T::COLLECTION,
            source,
        })?;
        self.db
            .lock()?
            .entry(T::COLLECTION)
            .or_default()
            .push(encoded);
        Ok(_id)
    }
    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<T>, StoreError> {
        let collections = self.db.lock()?;
        collections
            .get(T::COLLECTION)
            .and_then(|documents| documents.iter().find(|document| has_id(document, _id)))
            .map(Self::decode)
            .transpose()
    }
    async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<T>, StoreError> {
        let expected = Bson::String(value.to_string());
        let collections = self.db.lock()?;
        collections
            .get(T::COLLECTION)
            .and_then(|documents| {
                documents
                    .iter()
                    .find(|document| document.get(field) == Some(&expected))
            })
            .map(Self::decode)
            .transpose()
    }
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let collections = self.db.lock()?;
        collections
            .get(T::COLLECTION)
            .map(|documents| documents.iter().map(Self::decode).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
    async fn replace(&self, document: &T) -> Result<(), StoreError> {
        let _id = document.id().ok_or(StoreError::MissingId(T::COLLECTION))?;
        let encoded = bson::to_document(document).map_err(|source| StoreError::Encode {
            collection: T::COLLECTION,
            source,
        })?;

        let mut collections = self.db.lock()?;
        if let Some(stored) = collections
            .get_mut(T::COLLECTION)
            .and_then(|documents| documents.iter_mut().find(|stored| has_id(stored, &_id)))
        {
            *stored = encoded;
        }
        Ok(())
    }
}
