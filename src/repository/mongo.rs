use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document as BsonDocument},
    Collection,
};
use tracing::error;

use super::{Document, Repository, StoreError};

pub struct MongoRepository<T: Document> {
    collection: Collection<T>,
}

impl<T: Document> MongoRepository<T> {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection::<T>(T::COLLECTION),
        }
    }

    fn failure(operation: &'static str, source: mongodb::error::Error) -> StoreError {
        error!(
            collection = T::COLLECTION,
            func = operation,
            error = %source,
            "store operation failed"
        );
        StoreError::Driver {
            operation,
            collection: T::COLLECTION,
            source,
        }
    }
}

#[async_trait]
impl<T: Document> Repository<T> for MongoRepository<T> {
    async fn create(&self, document: &mut T) -> Result<ObjectId, StoreError> {
        let _id = ObjectId::new();
        document.set_id(_id);

        self.collection
            .insert_one(&*document, None)
            .await
            .map_err(|source| Self::failure("insert_one", source))?;
        Ok(_id)
    }
    async fn find_by_id(&self, _id: &ObjectId) -> Result<Option<T>, StoreError> {
        self.collection
            .find_one(doc! { "_id": *_id }, None)
            .await
            .map_err(|source| Self::failure("find_one", source))
    }
    async fn find_one_by(&self, field: &str, value: &str) -> Result<Option<T>, StoreError> {
        let mut filter = BsonDocument::new();
        filter.insert(field, value);

        self.collection
            .find_one(filter, None)
            .await
            .map_err(|source| Self::failure("find_one", source))
    }
    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let cursor = self
            .collection
            .find(None, None)
            .await
            .map_err(|source| Self::failure("find", source))?;

        cursor
            .try_collect::<Vec<T>>()
            .await
            .map_err(|source| Self::failure("find", source))
    }
    async fn replace(&self, document: &T) -> Result<(), StoreError> {
        let _id = document.id().ok_or(StoreError::MissingId(T::COLLECTION))?;

        self.collection
            .replace_one(doc! { "_id": _id }, document, None)
            .await
            .map_err(|source| Self::failure("replace_one", source))
            .map(|_| ())
    }
}
