use actix_web::{delete, get, post, put, web, HttpResponse};
use regex::Regex;
use serde_json::json;

use super::{bad_request, failure, parse_id};
use crate::{
    cases::user::UserCases,
    models::user::{UserCredential, UserRequest, UserResponse, UserUpdateRequest},
};

const EMAIL_PATTERN: &str =
    r"^([a-z0-9_+]([a-z0-9_+.]*[a-z0-9_+])?)@([a-z0-9]+([\-\.]{1}[a-z0-9]+)*\.[a-z]{2,6})";
const MIN_PASSWORD_LEN: usize = 8;

fn is_valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).map_or(false, |email_regex| email_regex.is_match(email))
}

#[post("/auth/register")]
pub async fn register(cases: web::Data<UserCases>, payload: web::Json<UserRequest>) -> HttpResponse {
    let payload: UserRequest = payload.into_inner();

    if payload.name.trim().is_empty() {
        return bad_request("user must have a name");
    }
    if payload.password.len() < MIN_PASSWORD_LEN {
        return bad_request("user must have a valid password");
    }
    if !is_valid_email(&payload.email) {
        return bad_request("user must have a valid email");
    }

    match cases.register(payload).await {
        Ok(user) => HttpResponse::Created().json(json!({
            "message": "user registered",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "registering user"),
    }
}
#[post("/auth/login")]
pub async fn login(cases: web::Data<UserCases>, payload: web::Json<UserCredential>) -> HttpResponse {
    match cases.login(payload.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "user logged in",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "logging in user"),
    }
}
#[get("/auth/user/{user_id}")]
pub async fn get_user(cases: web::Data<UserCases>, user_id: web::Path<String>) -> HttpResponse {
    let user_id = match parse_id(&user_id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match cases.get_user(&user_id).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "user found",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "getting user"),
    }
}
#[get("/auth/user/email/{email}")]
pub async fn get_user_by_email(
    cases: web::Data<UserCases>,
    email: web::Path<String>,
) -> HttpResponse {
    match cases.get_user_by_email(&email).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "user found",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "getting user"),
    }
}
#[put("/auth/user/{user_id}")]
pub async fn update_user(
    cases: web::Data<UserCases>,
    user_id: web::Path<String>,
    payload: web::Json<UserUpdateRequest>,
) -> HttpResponse {
    let user_id = match parse_id(&user_id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };
    let payload: UserUpdateRequest = payload.into_inner();

    if payload.name.trim().is_empty() {
        return bad_request("user must have a name");
    }
    if !is_valid_email(&payload.email) {
        return bad_request("user must have a valid email");
    }
    if let Some(password) = &payload.password {
        if !password.is_empty() && password.len() < MIN_PASSWORD_LEN {
            return bad_request("user must have a valid password");
        }
    }

    match cases.update_user(&user_id, payload).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "user updated",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "updating user"),
    }
}
#[put("/auth/user/activate/{user_id}")]
pub async fn activate_user(cases: web::Data<UserCases>, user_id: web::Path<String>) -> HttpResponse {
    let user_id = match parse_id(&user_id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match cases.activate_user(&user_id).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "user activated",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "activating user"),
    }
}
#[delete("/auth/user/deactivate/{user_id}")]
pub async fn deactivate_user(
    cases: web::Data<UserCases>,
    user_id: web::Path<String>,
) -> HttpResponse {
    let user_id = match parse_id(&user_id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match cases.deactivate_user(&user_id).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "user deactivated",
            "user": UserResponse::from(&user),
        })),
        Err(error) => failure(error, "deactivating user"),
    }
}
