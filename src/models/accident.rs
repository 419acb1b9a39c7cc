use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::{
    catalog::{CatalogEntry, CatalogEntryResponse, CatalogKind},
    employee::{Employee, EmployeeResponse},
    hex_id,
    project::{Project, ProjectResponse},
    to_utc, to_utc_opt, Deletable,
};
use crate::repository::Document;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClassificationKind;
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GravityKind;
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InjuredPartKind;

impl CatalogKind for ClassificationKind {
    const COLLECTION: &'static str = "classifications";
    const ENTITY: &'static str = "classification";
    const PLURAL: &'static str = "classifications";
}
impl CatalogKind for GravityKind {
    const COLLECTION: &'static str = "gravities";
    const ENTITY: &'static str = "gravity";
    const PLURAL: &'static str = "gravities";
}
impl CatalogKind for InjuredPartKind {
    const COLLECTION: &'static str = "injured_parts";
    const ENTITY: &'static str = "injured_part";
    const PLURAL: &'static str = "injured_parts";
}

pub type Classification = CatalogEntry<ClassificationKind>;
pub type Gravity = CatalogEntry<GravityKind>;
pub type InjuredPart = CatalogEntry<InjuredPartKind>;

/// A recorded accident. Every referenced record is embedded by value as it
/// stood when the accident was created or last updated.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Accident {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub description: String,
    pub construction_area: String,
    pub accident_date: DateTime,
    pub classification: Classification,
    pub gravity: Gravity,
    pub injured_part: InjuredPart,
    pub project: Project,
    pub employee: Employee,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}
#[derive(Clone, Debug)]
pub struct AccidentInput {
    pub description: String,
    pub construction_area: String,
    pub accident_date: DateTime,
    pub classification_id: ObjectId,
    pub gravity_id: ObjectId,
    pub injured_part_id: ObjectId,
    pub project_id: ObjectId,
    pub employee_id: ObjectId,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct AccidentRequest {
    pub description: String,
    pub construction_area: String,
    pub accident_date: chrono::DateTime<Utc>,
    pub classification_id: String,
    pub gravity_id: String,
    pub injured_part_id: String,
    pub project_id: String,
    pub employee_id: String,
}
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AccidentResponse {
    pub id: String,
    pub description: String,
    pub construction_area: String,
    pub accident_date: chrono::DateTime<Utc>,
    pub classification: CatalogEntryResponse,
    pub gravity: CatalogEntryResponse,
    pub injured_part: CatalogEntryResponse,
    pub project: ProjectResponse,
    pub employee: EmployeeResponse,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
    pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl Document for Accident {
    const COLLECTION: &'static str = "accidents";
    const ENTITY: &'static str = "accident";

    fn id(&self) -> Option<ObjectId> {
        self._id
    }
    fn set_id(&mut self, _id: ObjectId) {
        self._id = Some(_id);
    }
}

impl Deletable for Accident {
    fn mark_deleted(&mut self, at: DateTime) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
}

impl AccidentRequest {
    /// Converts the request into case input, failing with the name of the
    /// first reference field that is not a valid object id.
    pub fn into_input(self) -> Result<AccidentInput, &'static str> {
        Ok(AccidentInput {
            classification_id: self
                .classification_id
                .parse()
                .map_err(|_| "classification_id")?,
            gravity_id: self.gravity_id.parse().map_err(|_| "gravity_id")?,
            injured_part_id: self.injured_part_id.parse().map_err(|_| "injured_part_id")?,
            project_id: self.project_id.parse().map_err(|_| "project_id")?,
            employee_id: self.employee_id.parse().map_err(|_| "employee_id")?,
            description: self.description,
            construction_area: self.construction_area,
            accident_date: DateTime::from_chrono(self.accident_date),
        })
    }
}

impl From<&Accident> for AccidentResponse {
    fn from(accident: &Accident) -> Self {
        Self {
            id: hex_id(&accident._id),
            description: accident.description.clone(),
            construction_area: accident.construction_area.clone(),
            accident_date: to_utc(accident.accident_date),
            classification: CatalogEntryResponse::from(&accident.classification),
            gravity: CatalogEntryResponse::from(&accident.gravity),
            injured_part: CatalogEntryResponse::from(&accident.injured_part),
            project: ProjectResponse::from(&accident.project),
            employee: EmployeeResponse::from(&accident.employee),
            is_deleted: accident.is_deleted,
            created_at: to_utc(accident.created_at),
            updated_at: to_utc(accident.updated_at),
            deleted_at: to_utc_opt(accident.deleted_at),
        }
    }
}
