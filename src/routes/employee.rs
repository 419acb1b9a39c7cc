use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use super::{bad_request, failure, parse_id};
use crate::{
    cases::employee::EmployeeCases,
    models::employee::{EmployeeInput, EmployeeRequest, EmployeeResponse},
};

fn validate(payload: EmployeeRequest) -> Result<EmployeeInput, HttpResponse> {
    let input = payload
        .into_input()
        .map_err(|field| bad_request(format!("invalid {field}")))?;

    if input.name.trim().is_empty() {
        return Err(bad_request("employee must have a name"));
    }
    if input.identification_number.trim().is_empty() {
        return Err(bad_request("employee must have an identification number"));
    }
    Ok(input)
}

#[get("/employees")]
pub async fn get_employees(cases: web::Data<EmployeeCases>) -> HttpResponse {
    match cases.get_employees().await {
        Ok(employees) => HttpResponse::Ok().json(json!({
            "message": "employees found",
            "employees": employees.iter().map(EmployeeResponse::from).collect::<Vec<_>>(),
        })),
        Err(error) => failure(error, "getting employees"),
    }
}
#[get("/employees/{employee_id}")]
pub async fn get_employee(
    cases: web::Data<EmployeeCases>,
    employee_id: web::Path<String>,
) -> HttpResponse {
    let employee_id = match parse_id(&employee_id) {
        Ok(employee_id) => employee_id,
        Err(response) => return response,
    };

    match cases.get_employee(&employee_id).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "message": "employee found",
            "employee": EmployeeResponse::from(&employee),
        })),
        Err(error) => failure(error, "getting employee"),
    }
}
#[post("/employees")]
pub async fn create_employee(
    cases: web::Data<EmployeeCases>,
    payload: web::Json<EmployeeRequest>,
) -> HttpResponse {
    let input = match validate(payload.into_inner()) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match cases.create_employee(input).await {
        Ok(employee) => HttpResponse::Created().json(json!({
            "message": "employee created",
            "employee": EmployeeResponse::from(&employee),
        })),
        Err(error) => failure(error, "creating employee"),
    }
}
#[put("/employees/{employee_id}")]
pub async fn update_employee(
    cases: web::Data<EmployeeCases>,
    employee_id: web::Path<String>,
    payload: web::Json<EmployeeRequest>,
) -> HttpResponse {
    let employee_id = match parse_id(&employee_id) {
        Ok(employee_id) => employee_id,
        Err(response) => return response,
    };
    let input = match validate(payload.into_inner()) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match cases.update_employee(&employee_id, input).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "message": "employee updated",
            "employee": EmployeeResponse::from(&employee),
        })),
        Err(error) => failure(error, "updating employee"),
    }
}
#[delete("/employees/{employee_id}")]
pub async fn delete_employee(
    cases: web::Data<EmployeeCases>,
    employee_id: web::Path<String>,
) -> HttpResponse {
    let employee_id = match parse_id(&employee_id) {
        Ok(employee_id) => employee_id,
        Err(response) => return response,
    };

    match cases.delete_employee(&employee_id).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "message": "employee deleted",
            "employee": EmployeeResponse::from(&employee),
        })),
        Err(error) => failure(error, "deleting employee"),
    }
}
#[put("/employees/activate/{employee_id}")]
pub async fn activate_employee(
    cases: web::Data<EmployeeCases>,
    employee_id: web::Path<String>,
) -> HttpResponse {
    let employee_id = match parse_id(&employee_id) {
        Ok(employee_id) => employee_id,
        Err(response) => return response,
    };

    match cases.activate_employee(&employee_id).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "message": "employee activated",
            "employee": EmployeeResponse::from(&employee),
        })),
        Err(error) => failure(error, "activating employee"),
    }
}
#[put("/employees/deactivate/{employee_id}")]
pub async fn deactivate_employee(
    cases: web::Data<EmployeeCases>,
    employee_id: web::Path<String>,
) -> HttpResponse {
    let employee_id = match parse_id(&employee_id) {
        Ok(employee_id) => employee_id,
        Err(response) => return response,
    };

    match cases.deactivate_employee(&employee_id).await {
        Ok(employee) => HttpResponse::Ok().json(json!({
            "message": "employee deactivated",
            "employee": EmployeeResponse::from(&employee),
        })),
        Err(error) => failure(error, "deactivating employee"),
    }
}
