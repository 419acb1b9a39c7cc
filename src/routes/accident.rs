use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use super::{bad_request, failure, parse_id};
use crate::{
    cases::accident::AccidentCases,
    models::accident::{AccidentRequest, AccidentResponse},
};

#[get("/accidents")]
pub async fn get_accidents(cases: web::Data<AccidentCases>) -> HttpResponse {
    match cases.get_accidents().await {
        Ok(accidents) => HttpResponse::Ok().json(json!({
            "message": "accidents found",
            "accidents": accidents.iter().map(AccidentResponse::from).collect::<Vec<_>>(),
        })),
        Err(error) => failure(error, "getting accidents"),
    }
}
#[get("/accidents/{accident_id}")]
pub async fn get_accident(
    cases: web::Data<AccidentCases>,
    accident_id: web::Path<String>,
) -> HttpResponse {
    let accident_id = match parse_id(&accident_id) {
        Ok(accident_id) => accident_id,
        Err(response) => return response,
    };

    match cases.get_accident(&accident_id).await {
        Ok(accident) => HttpResponse::Ok().json(json!({
            "message": "accident found",
            "accident": AccidentResponse::from(&accident),
        })),
        Err(error) => failure(error, "getting accident"),
    }
}
#[post("/accidents")]
pub async fn create_accident(
    cases: web::Data<AccidentCases>,
    payload: web::Json<AccidentRequest>,
) -> HttpResponse {
    let input = match payload.into_inner().into_input() {
        Ok(input) => input,
        Err(field) => return bad_request(format!("invalid {field}")),
    };
    if input.description.trim().is_empty() {
        return bad_request("accident must have a description");
    }

    match cases.create_accident(input).await {
        Ok(accident) => HttpResponse::Created().json(json!({
            "message": "accident created",
            "accident": AccidentResponse::from(&accident),
        })),
        Err(error) => failure(error, "creating accident"),
    }
}
#[put("/accidents/{accident_id}")]
pub async fn update_accident(
    cases: web::Data<AccidentCases>,
    accident_id: web::Path<String>,
    payload: web::Json<AccidentRequest>,
) -> HttpResponse {
    let accident_id = match parse_id(&accident_id) {
        Ok(accident_id) => accident_id,
        Err(response) => return response,
    };
    let input = match payload.into_inner().into_input() {
        Ok(input) => input,
        Err(field) => return bad_request(format!("invalid {field}")),
    };
    if input.description.trim().is_empty() {
        return bad_request("accident must have a description");
    }

    match cases.update_accident(&accident_id, input).await {
        Ok(accident) => HttpResponse::Ok().json(json!({
            "message": "accident updated",
            "accident": AccidentResponse::from(&accident),
        })),
        Err(error) => failure(error, "updating accident"),
    }
}
#[delete("/accidents/{accident_id}")]
pub async fn delete_accident(
    cases: web::Data<AccidentCases>,
    accident_id: web::Path<String>,
) -> HttpResponse {
    let accident_id = match parse_id(&accident_id) {
        Ok(accident_id) => accident_id,
        Err(response) => return response,
    };

    match cases.delete_accident(&accident_id).await {
        Ok(accident) => HttpResponse::Ok().json(json!({
            "message": "accident deleted",
            "accident": AccidentResponse::from(&accident),
        })),
        Err(error) => failure(error, "deleting accident"),
    }
}
#[put("/accidents/updates/update-all-employee")]
pub async fn refresh_accident_employees(cases: web::Data<AccidentCases>) -> HttpResponse {
    match cases.refresh_accident_employees().await {
        Ok(refreshed) => HttpResponse::Ok().json(json!({
            "message": "accident employees updated",
            "updated": refreshed,
        })),
        Err(error) => failure(error, "updating accident employees"),
    }
}
