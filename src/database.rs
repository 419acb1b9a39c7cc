use std::sync::Arc;

use mongodb::Client;
use tracing::info;

use crate::{
    config::{Config, StoreKind},
    repository::{
        memory::{MemoryDatabase, MemoryRepository},
        mongo::MongoRepository,
        Document, Repository,
    },
};

/// Handle to the document store every repository is built from.
#[derive(Clone)]
pub enum Database {
    Mongo(mongodb::Database),
    Memory(Arc<MemoryDatabase>),
}

pub async fn connect(config: &Config) -> Result<Database, mongodb::error::Error> {
    match config.store {
        StoreKind::Mongo => {
            let client = Client::with_uri_str(&config.mongodb_uri).await?;
            info!(database = %config.mongodb_database, "using mongodb store");
            Ok(Database::Mongo(client.database(&config.mongodb_database)))
        }
        StoreKind::Memory => {
            info!("using in-memory store");
            Ok(Database::memory())
        }
    }
}

impl Database {
    pub fn memory() -> Self {
        Database::Memory(Arc::new(MemoryDatabase::default()))
    }

    pub fn repository<T: Document>(&self) -> Arc<dyn Repository<T>> {
        match self {
            Database::Mongo(db) => Arc::new(MongoRepository::<T>::new(db)),
            Database::Memory(db) => Arc::new(MemoryRepository::<T>::new(db.clone())),
        }
    }
}
