use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::{
    catalog::{CatalogEntry, CatalogEntryResponse, CatalogKind},
    hex_id, to_utc, to_utc_opt, Activatable, Deletable,
};
use crate::repository::Document;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SupervisorKind;
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionKind;
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NationalityKind;

impl CatalogKind for SupervisorKind {
    const COLLECTION: &'static str = "supervisors";
    const ENTITY: &'static str = "supervisor";
    const PLURAL: &'static str = "supervisors";
}
impl CatalogKind for PositionKind {
    const COLLECTION: &'static str = "positions";
    const ENTITY: &'static str = "position";
    const PLURAL: &'static str = "positions";
}
impl CatalogKind for NationalityKind {
    const COLLECTION: &'static str = "nationalities";
    const ENTITY: &'static str = "nationality";
    const PLURAL: &'static str = "nationalities";
}

pub type Supervisor = CatalogEntry<SupervisorKind>;
pub type Position = CatalogEntry<PositionKind>;
pub type Nationality = CatalogEntry<NationalityKind>;

/// An employee together with snapshots of its supervisor, position and
/// nationality as they were when the employee was last written.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Employee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub identification_type: String,
    pub identification_number: String,
    pub email: String,
    pub in_law: bool,
    pub contract_type: String,
    pub start_date: DateTime,
    pub end_date: Option<DateTime>,
    pub supervisor: Supervisor,
    pub position: Position,
    pub nationality: Nationality,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub deleted_at: Option<DateTime>,
}
#[derive(Clone, Debug)]
pub struct EmployeeInput {
    pub name: String,
    pub identification_type: String,
    pub identification_number: String,
    pub email: String,
    pub in_law: bool,
    pub contract_type: String,
    pub start_date: DateTime,
    pub end_date: Option<DateTime>,
    pub supervisor_id: ObjectId,
    pub position_id: ObjectId,
    pub nationality_id: ObjectId,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct EmployeeRequest {
    pub name: String,
    pub identification_type: String,
    pub identification_number: String,
    pub email: String,
    #[serde(default)]
    pub in_law: bool,
    pub contract_type: String,
    pub start_date: chrono::DateTime<Utc>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub supervisor_id: String,
    pub position_id: String,
    pub nationality_id: String,
}
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub identification_type: String,
    pub identification_number: String,
    pub email: String,
    pub in_law: bool,
    pub contract_type: String,
    pub start_date: chrono::DateTime<Utc>,
    pub end_date: Option<chrono::DateTime<Utc>>,
    pub supervisor: CatalogEntryResponse,
    pub position: CatalogEntryResponse,
    pub nationality: CatalogEntryResponse,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
    pub deleted_at: Option<chrono::DateTime<Utc>>,
}

impl Document for Employee {
    const COLLECTION: &'static str = "employees";
    const ENTITY: &'static str = "employee";

    fn id(&self) -> Option<ObjectId> {
        self._id
    }
    fn set_id(&mut self, _id: ObjectId) {
        self._id = Some(_id);
    }
}

impl Activatable for Employee {
    fn set_active(&mut self, active: bool, at: DateTime) {
        self.is_active = active;
        self.updated_at = at;
    }
}

impl Deletable for Employee {
    fn mark_deleted(&mut self, at: DateTime) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }
}

impl EmployeeRequest {
    /// Converts the request into case input, failing with the name of the
    /// first reference field that is not a valid object id.
    pub fn into_input(self) -> Result<EmployeeInput, &'static str> {
        Ok(EmployeeInput {
            supervisor_id: self.supervisor_id.parse().map_err(|_| "supervisor_id")?,
            position_id: self.position_id.parse().map_err(|_| "position_id")?,
            nationality_id: self.nationality_id.parse().map_err(|_| "nationality_id")?,
            name: self.name,
            identification_type: self.identification_type,
            identification_number: self.identification_number,
            email: self.email,
            in_law: self.in_law,
            contract_type: self.contract_type,
            start_date: DateTime::from_chrono(self.start_date),
            end_date: self.end_date.map(DateTime::from_chrono),
        })
    }
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: hex_id(&employee._id),
            name: employee.name.clone(),
            identification_type: employee.identification_type.clone(),
            identification_number: employee.identification_number.clone(),
            email: employee.email.clone(),
            in_law: employee.in_law,
            contract_type: employee.contract_type.clone(),
            start_date: to_utc(employee.start_date),
            end_date: to_utc_opt(employee.end_date),
            supervisor: CatalogEntryResponse::from(&employee.supervisor),
            position: CatalogEntryResponse::from(&employee.position),
            nationality: CatalogEntryResponse::from(&employee.nationality),
            is_active: employee.is_active,
            is_deleted: employee.is_deleted,
            created_at: to_utc(employee.created_at),
            updated_at: to_utc(employee.updated_at),
            deleted_at: to_utc_opt(employee.deleted_at),
        }
    }
}
