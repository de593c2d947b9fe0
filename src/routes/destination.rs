use actix_web::{web, HttpResponse, Responder};

use crate::services::catalog::{normalize_key, Catalog};

pub async fn get_destinations(catalog: web::Data<Catalog>) -> impl Responder {
    HttpResponse::Ok().json(catalog.summaries())
}

pub async fn get_destination(
    catalog: web::Data<Catalog>,
    path: web::Path<String>,
) -> impl Responder {
    match catalog.get(&normalize_key(&path.into_inner())) {
        Some(destination) => HttpResponse::Ok().json(destination),
        None => HttpResponse::NotFound().body("Destination not found."),
    }
}
