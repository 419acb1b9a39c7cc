use mongodb::bson;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} on `{collection}` failed: {source}")]
    Driver {
        operation: &'static str,
        collection: &'static str,
        #[source]
        source: mongodb::error::Error,
    },
    #[error("encoding a `{collection}` document failed: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: bson::ser::Error,
    },
    #[error("decoding a `{collection}` document failed: {source}")]
    Decode {
        collection: &'static str,
        #[source]
        source: bson::de::Error,
    },
    #[error("cannot replace a `{0}` document without an id")]
    MissingId(&'static str),
    #[error("in-memory store lock poisoned")]
    Poisoned,
}
