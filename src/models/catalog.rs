//! Name-only reference data (classifications, gravities, injured parts,
//! supervisors, positions and nationalities).
//!
//! Every kind shares the same document shape and lifecycle, so a single
//! generic entry type is parameterized by a zero-sized kind marker that
//! names the collection.

use std::{fmt::Debug, marker::PhantomData};

use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::{hex_id, to_utc, to_utc_opt, Activatable, Deletable};
use crate::repository::Document;

pub trait CatalogKind:
    Clone + Copy + Debug + Default + PartialEq + Send + Sync + Unpin + 'static
{
    /// Collection holding the entries.
    const COLLECTION: &'static str;
    /// Snake case name of a single entry, also used as the response payload key.
    const ENTITY: &'static str;
    /// Payload key for lists of entries.
    const PLURAL: &'static str;
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(bound = "")]
pub struct CatalogEntry<K: CatalogKind> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
    #[serde(skip)]
    kind: PhantomData<K>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct CatalogEntryRequest {
    pub name: String,
}
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CatalogEntryResponse {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
    pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl<K: CatalogKind> CatalogEntry<K> {
    /// A fresh, active entry stamped with `now`.
    pub fn new(name: String, now: DateTime) -> Self {
        Self {
            _id: None,
            name,
            is_active: true,
            is_deleted: false,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            kind: PhantomData,
        }
    }
}

impl<K: CatalogKind> Document for CatalogEntry<K> {
    const COLLECTION: &'static str = K::COLLECTION;
    const ENTITY: &'static str = K::ENTITY;

    fn id(&self) -> Option<ObjectId> {
        self._id
    }
    fn set_id(&mut self, _id: ObjectId) {
        self._id = Some(_id);
    }
}

impl<K: CatalogKind> Activatable for CatalogEntry<K> {
    fn set_active(&mut self, active: bool, at: DateTime) {
        self.is_active = active;
        self.updated_at = at;
    }
}

impl<K: CatalogKind> Deletable for CatalogEntry<K> {
    fn mark_deleted(&mut self, at: DateTime) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
}

impl<K: CatalogKind> From<&CatalogEntry<K>> for CatalogEntryResponse {
    fn from(entry: &CatalogEntry<K>) -> Self {
        Self {
            id: hex_id(&entry._id),
            name: entry.name.clone(),
            is_active: entry.is_active,
            is_deleted: entry.is_deleted,
            created_at: to_utc(entry.created_at),
            updated_at: to_utc(entry.updated_at),
            deleted_at: to_utc_opt(entry.deleted_at),
        }
    }
}
