use actix_web::{error::InternalError, get, web, HttpResponse};
use mongodb::bson::oid::ObjectId;
use serde_json::json;
use tracing::error;

use crate::{
    cases::{
        accident::AccidentCases, catalog::CatalogCases, employee::EmployeeCases,
        project::ProjectCases, user::UserCases, CaseError,
    },
    database::Database,
    models::{
        accident::{ClassificationKind, GravityKind, InjuredPartKind},
        employee::{NationalityKind, PositionKind, SupervisorKind},
    },
};

pub mod accident;
pub mod catalog;
pub mod employee;
pub mod project;
pub mod user;

/// Cases shared by every worker, built once at start-up.
#[derive(Clone)]
pub struct AppState {
    accidents: web::Data<AccidentCases>,
    employees: web::Data<EmployeeCases>,
    projects: web::Data<ProjectCases>,
    users: web::Data<UserCases>,
    classifications: web::Data<CatalogCases<ClassificationKind>>,
    gravities: web::Data<CatalogCases<GravityKind>>,
    injured_parts: web::Data<CatalogCases<InjuredPartKind>>,
    supervisors: web::Data<CatalogCases<SupervisorKind>>,
    positions: web::Data<CatalogCases<PositionKind>>,
    nationalities: web::Data<CatalogCases<NationalityKind>>,
}

impl AppState {
    pub fn new(db: &Database, password_cost: u32) -> Self {
        Self {
            accidents: web::Data::new(AccidentCases::new(db)),
            employees: web::Data::new(EmployeeCases::new(db)),
            projects: web::Data::new(ProjectCases::new(db)),
            users: web::Data::new(UserCases::new(db, password_cost)),
            classifications: web::Data::new(CatalogCases::new(db)),
            gravities: web::Data::new(CatalogCases::new(db)),
            injured_parts: web::Data::new(CatalogCases::new(db)),
            supervisors: web::Data::new(CatalogCases::new(db)),
            positions: web::Data::new(CatalogCases::new(db)),
            nationalities: web::Data::new(CatalogCases::new(db)),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, state: &AppState) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({ "message": err.to_string() }));
        InternalError::from_response(err, response).into()
    });

    cfg.app_data(json_config)
        .app_data(state.accidents.clone())
        .app_data(state.employees.clone())
        .app_data(state.projects.clone())
        .app_data(state.users.clone())
        .app_data(state.classifications.clone())
        .app_data(state.gravities.clone())
        .app_data(state.injured_parts.clone())
        .app_data(state.supervisors.clone())
        .app_data(state.positions.clone())
        .app_data(state.nationalities.clone())
        .service(health)
        .service(accident::get_accidents)
        .service(accident::get_accident)
        .service(accident::create_accident)
        .service(accident::update_accident)
        .service(accident::delete_accident)
        .service(accident::refresh_accident_employees)
        .service(employee::get_employees)
        .service(employee::get_employee)
        .service(employee::create_employee)
        .service(employee::update_employee)
        .service(employee::delete_employee)
        .service(employee::activate_employee)
        .service(employee::deactivate_employee)
        .service(project::get_projects)
        .service(project::get_project)
        .service(project::create_project)
        .service(project::update_project)
        .service(project::delete_project)
        .service(project::activate_project)
        .service(project::deactivate_project)
        .service(user::register)
        .service(user::login)
        .service(user::get_user)
        .service(user::get_user_by_email)
        .service(user::update_user)
        .service(user::activate_user)
        .service(user::deactivate_user)
        .service(catalog::scope::<ClassificationKind>("/classifications"))
        .service(catalog::scope::<GravityKind>("/gravities"))
        .service(catalog::scope::<InjuredPartKind>("/injured-parts"))
        .service(catalog::scope::<SupervisorKind>("/supervisors"))
        .service(catalog::scope::<PositionKind>("/positions"))
        .service(catalog::scope::<NationalityKind>("/nationalities"));
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "ok" }))
}

pub(crate) fn parse_id(id: &str) -> Result<ObjectId, HttpResponse> {
    id.parse()
        .map_err(|_| HttpResponse::BadRequest().json(json!({ "message": "invalid id" })))
}

pub(crate) fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "message": message.into() }))
}

/// Turns a case failure into its response. Store and hashing failures are
/// logged and answered with a generic `error <action>` message.
pub(crate) fn failure(error: CaseError, action: &str) -> HttpResponse {
    let message = json!({ "message": error.to_string() });

    match error {
        CaseError::NotFound(_) => HttpResponse::NotFound().json(message),
        CaseError::ReferenceNotFound(_) => HttpResponse::BadRequest().json(message),
        CaseError::DuplicateEntity(_) => HttpResponse::Conflict().json(message),
        CaseError::InvalidCredentials | CaseError::AccountDisabled => {
            HttpResponse::Unauthorized().json(message)
        }
        CaseError::Hashing(_) | CaseError::Store(_) => {
            error!(error = %error, action, "request failed");
            HttpResponse::InternalServerError().json(json!({ "message": format!("error {action}") }))
        }
    }
}
