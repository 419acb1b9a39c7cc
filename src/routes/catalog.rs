//! Routes shared by every catalog kind. Each kind is mounted as its own
//! scope with the same seven endpoints.

use actix_web::{web, HttpResponse, Scope};
use serde_json::json;

use super::{bad_request, failure, parse_id};
use crate::{
    cases::catalog::CatalogCases,
    models::catalog::{CatalogEntryRequest, CatalogEntryResponse, CatalogKind},
};

pub fn scope<K: CatalogKind>(path: &str) -> Scope {
    web::scope(path)
        .service(
            web::resource("")
                .route(web::post().to(create::<K>))
                .route(web::get().to(list::<K>)),
        )
        .service(web::resource("/activate/{entry_id}").route(web::put().to(activate::<K>)))
        .service(web::resource("/deactivate/{entry_id}").route(web::put().to(deactivate::<K>)))
        .service(
            web::resource("/{entry_id}")
                .route(web::get().to(get::<K>))
                .route(web::put().to(update::<K>))
                .route(web::delete().to(delete::<K>)),
        )
}

fn entry_body<K: CatalogKind>(message: String, response: CatalogEntryResponse) -> serde_json::Value {
    let entity = K::ENTITY;
    json!({ "message": message, entity: response })
}

async fn list<K: CatalogKind>(cases: web::Data<CatalogCases<K>>) -> HttpResponse {
    match cases.list().await {
        Ok(entries) => {
            let plural = K::PLURAL;
            HttpResponse::Ok().json(json!({
                "message": format!("{plural} found"),
                plural: entries.iter().map(CatalogEntryResponse::from).collect::<Vec<_>>(),
            }))
        }
        Err(error) => failure(error, &format!("getting {}", K::PLURAL)),
    }
}
async fn get<K: CatalogKind>(
    cases: web::Data<CatalogCases<K>>,
    entry_id: web::Path<String>,
) -> HttpResponse {
    let entry_id = match parse_id(&entry_id) {
        Ok(entry_id) => entry_id,
        Err(response) => return response,
    };

    match cases.get(&entry_id).await {
        Ok(entry) => HttpResponse::Ok().json(entry_body::<K>(
            format!("{} found", K::ENTITY),
            CatalogEntryResponse::from(&entry),
        )),
        Err(error) => failure(error, &format!("getting {}", K::ENTITY)),
    }
}
async fn create<K: CatalogKind>(
    cases: web::Data<CatalogCases<K>>,
    payload: web::Json<CatalogEntryRequest>,
) -> HttpResponse {
    let payload: CatalogEntryRequest = payload.into_inner();
    if payload.name.trim().is_empty() {
        return bad_request(format!("{} must have a name", K::ENTITY));
    }

    match cases.create(payload.name).await {
        Ok(entry) => HttpResponse::Created().json(entry_body::<K>(
            format!("{} created", K::ENTITY),
            CatalogEntryResponse::from(&entry),
        )),
        Err(error) => failure(error, &format!("creating {}", K::ENTITY)),
    }
}
async fn update<K: CatalogKind>(
    cases: web::Data<CatalogCases<K>>,
    entry_id: web::Path<String>,
    payload: web::Json<CatalogEntryRequest>,
) -> HttpResponse {
    let entry_id = match parse_id(&entry_id) {
        Ok(entry_id) => entry_id,
        Err(response) => return response,
    };
    let payload: CatalogEntryRequest = payload.into_inner();
    if payload.name.trim().is_empty() {
        return bad_request(format!("{} must have a name", K::ENTITY));
    }

    match cases.update(&entry_id, payload.name).await {
        Ok(entry) => HttpResponse::Ok().json(entry_body::<K>(
            format!("{} updated", K::ENTITY),
            CatalogEntryResponse::from(&entry),
        )),
        Err(error) => failure(error, &format!("updating {}", K::ENTITY)),
    }
}
async fn delete<K: CatalogKind>(
    cases: web::Data<CatalogCases<K>>,
    entry_id: web::Path<String>,
) -> HttpResponse {
    let entry_id = match parse_id(&entry_id) {
        Ok(entry_id) => entry_id,
        Err(response) => return response,
    };

    match cases.delete(&entry_id).await {
        Ok(entry) => HttpResponse::Ok().json(entry_body::<K>(
            format!("{} deleted", K::ENTITY),
            CatalogEntryResponse::from(&entry),
        )),
        Err(error) => failure(error, &format!("deleting {}", K::ENTITY)),
    }
}
async fn activate<K: CatalogKind>(
    cases: web::Data<CatalogCases<K>>,
    entry_id: web::Path<String>,
) -> HttpResponse {
    let entry_id = match parse_id(&entry_id) {
        Ok(entry_id) => entry_id,
        Err(response) => return response,
    };

    match cases.activate(&entry_id).await {
        Ok(entry) => HttpResponse::Ok().json(entry_body::<K>(
            format!("{} activated", K::ENTITY),
            CatalogEntryResponse::from(&entry),
        )),
        Err(error) => failure(error, &format!("activating {}", K::ENTITY)),
    }
}
async fn deactivate<K: CatalogKind>(
    cases: web::Data<CatalogCases<K>>,
    entry_id: web::Path<String>,
) -> HttpResponse {
    let entry_id = match parse_id(&entry_id) {
        Ok(entry_id) => entry_id,
        Err(response) => return response,
    };

    match cases.deactivate(&entry_id).await {
        Ok(entry) => HttpResponse::Ok().json(entry_body::<K>(
            format!("{} deactivated", K::ENTITY),
            CatalogEntryResponse::from(&entry),
        )),
        Err(error) => failure(error, &format!("deactivating {}", K::ENTITY)),
    }
}
