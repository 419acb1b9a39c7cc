use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};

pub mod accident;
pub mod catalog;
pub mod employee;
pub mod project;
pub mod user;

/// Documents that are soft deleted instead of being removed from their collection.
pub trait Deletable {
    fn mark_deleted(&mut self, at: DateTime);
}

/// Documents carrying an `is_active` flag that can be flipped independently of deletion.
pub trait Activatable {
    fn set_active(&mut self, active: bool, at: DateTime);
}

pub(crate) fn hex_id(_id: &Option<ObjectId>) -> String {
    _id.map(|_id| _id.to_hex()).unwrap_or_default()
}

pub(crate) fn to_utc(time: DateTime) -> chrono::DateTime<Utc> {
    time.to_chrono()
}

pub(crate) fn to_utc_opt(time: Option<DateTime>) -> Option<chrono::DateTime<Utc>> {
    time.map(to_utc)
}
