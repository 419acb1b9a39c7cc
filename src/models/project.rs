use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::{hex_id, to_utc, to_utc_opt, Activatable, Deletable};
use crate::repository::Document;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub start_date: DateTime,
    pub end_date: Option<DateTime>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}
#[derive(Clone, Debug)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub start_date: DateTime,
    pub end_date: Option<DateTime>,
    pub is_active: Option<bool>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: chrono::DateTime<Utc>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub is_active: Option<bool>,
}
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: chrono::DateTime<Utc>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
    pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl Document for Project {
    const COLLECTION: &'static str = "projects";
    const ENTITY: &'static str = "project";

    fn id(&self) -> Option<ObjectId> {
        self._id
    }
    fn set_id(&mut self, _id: ObjectId) {
        self._id = Some(_id);
    }
}

impl Activatable for Project {
    fn set_active(&mut self, active: bool, at: DateTime) {
        self.is_active = active;
        self.updated_at = at;
    }
}

impl Deletable for Project {
    fn mark_deleted(&mut self, at: DateTime) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
        self.updated_at = at;
    }
}

impl From<ProjectRequest> for ProjectInput {
    fn from(request: ProjectRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            start_date: DateTime::from_chrono(request.start_date),
            end_date: request.end_date.map(DateTime::from_chrono),
            is_active: request.is_active,
        }
    }
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: hex_id(&project._id),
            name: project.name.clone(),
            description: project.description.clone(),
            start_date: to_utc(project.start_date),
            end_date: to_utc_opt(project.end_date),
            is_active: project.is_active,
            is_deleted: project.is_deleted,
            created_at: to_utc(project.created_at),
            updated_at: to_utc(project.updated_at),
            deleted_at: to_utc_opt(project.deleted_at),
        }
    }
}
