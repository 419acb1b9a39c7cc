use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use super::{bad_request, failure, parse_id};
use crate::{
    cases::project::ProjectCases,
    models::project::{ProjectRequest, ProjectResponse},
};

#[get("/projects")]
pub async fn get_projects(cases: web::Data<ProjectCases>) -> HttpResponse {
    match cases.get_projects().await {
        Ok(projects) => HttpResponse::Ok().json(json!({
            "message": "projects found",
            "projects": projects.iter().map(ProjectResponse::from).collect::<Vec<_>>(),
        })),
        Err(error) => failure(error, "getting projects"),
    }
}
#[get("/projects/{project_id}")]
pub async fn get_project(
    cases: web::Data<ProjectCases>,
    project_id: web::Path<String>,
) -> HttpResponse {
    let project_id = match parse_id(&project_id) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    match cases.get_project(&project_id).await {
        Ok(project) => HttpResponse::Ok().json(json!({
            "message": "project found",
            "project": ProjectResponse::from(&project),
        })),
        Err(error) => failure(error, "getting project"),
    }
}
#[post("/projects")]
pub async fn create_project(
    cases: web::Data<ProjectCases>,
    payload: web::Json<ProjectRequest>,
) -> HttpResponse {
    let payload: ProjectRequest = payload.into_inner();
    if payload.name.trim().is_empty() {
        return bad_request("project must have a name");
    }

    match cases.create_project(payload.into()).await {
        Ok(project) => HttpResponse::Created().json(json!({
            "message": "project created",
            "project": ProjectResponse::from(&project),
        })),
        Err(error) => failure(error, "creating project"),
    }
}
#[put("/projects/{project_id}")]
pub async fn update_project(
    cases: web::Data<ProjectCases>,
    project_id: web::Path<String>,
    payload: web::Json<ProjectRequest>,
) -> HttpResponse {
    let project_id = match parse_id(&project_id) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };
    let payload: ProjectRequest = payload.into_inner();
    if payload.name.trim().is_empty() {
        return bad_request("project must have a name");
    }

    match cases.update_project(&project_id, payload.into()).await {
        Ok(project) => HttpResponse::Ok().json(json!({
            "message": "project updated",
            "project": ProjectResponse::from(&project),
        })),
        Err(error) => failure(error, "updating project"),
    }
}
#[delete("/projects/{project_id}")]
pub async fn delete_project(
    cases: web::Data<ProjectCases>,
    project_id: web::Path<String>,
) -> HttpResponse {
    let project_id = match parse_id(&project_id) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    match cases.delete_project(&project_id).await {
        Ok(project) => HttpResponse::Ok().json(json!({
            "message": "project deleted",
            "project": ProjectResponse::from(&project),
        })),
        Err(error) => failure(error, "deleting project"),
    }
}
#[put("/projects/activate/{project_id}")]
pub async fn activate_project(
    cases: web::Data<ProjectCases>,
    project_id: web::Path<String>,
) -> HttpResponse {
    let project_id = match parse_id(&project_id) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    match cases.activate_project(&project_id).await {
        Ok(project) => HttpResponse::Ok().json(json!({
            "message": "project activated",
            "project": ProjectResponse::from(&project),
        })),
        Err(error) => failure(error, "activating project"),
    }
}
#[put("/projects/deactivate/{project_id}")]
pub async fn deactivate_project(
    cases: web::Data<ProjectCases>,
    project_id: web::Path<String>,
) -> HttpResponse {
    let project_id = match parse_id(&project_id) {
        Ok(project_id) => project_id,
        Err(response) => return response,
    };

    match cases.deactivate_project(&project_id).await {
        Ok(project) => HttpResponse::Ok().json(json!({
            "message": "project deactivated",
            "project": ProjectResponse::from(&project),
        })),
        Err(error) => failure(error, "deactivating project"),
    }
}
