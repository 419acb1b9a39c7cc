use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::{hex_id, to_utc, to_utc_opt, Deletable};
use crate::repository::Document;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    /// Bcrypt hash, never the plain password.
    pub password: String,
    pub last_login: Option<DateTime>,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct UserCredential {
    pub email: String,
    pub password: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct UserUpdateRequest {
    pub name: String,
    pub email: String,
    /// Left empty or omitted to keep the current password.
    #[serde(default)]
    pub password: Option<String>,
}
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub last_login: Option<chrono::DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
    pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl Document for User {
    const COLLECTION: &'static str = "users";
    const ENTITY: &'static str = "user";

    fn id(&self) -> Option<ObjectId> {
        self._id
    }
    fn set_id(&mut self, _id: ObjectId) {
        self._id = Some(_id);
    }
}

impl Deletable for User {
    fn mark_deleted(&mut self, at: DateTime) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
}

impl User {
    pub fn restore(&mut self, at: DateTime) {
        self.is_deleted = false;
        self.deleted_at = None;
        self.updated_at = at;
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: hex_id(&user._id),
            name: user.name.clone(),
            email: user.email.clone(),
            last_login: to_utc_opt(user.last_login),
            is_deleted: user.is_deleted,
            created_at: to_utc(user.created_at),
            updated_at: to_utc(user.updated_at),
            deleted_at: to_utc_opt(user.deleted_at),
        }
    }
}
