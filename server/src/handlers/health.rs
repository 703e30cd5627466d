use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::store::RegistrationStore;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub registrations: usize,
}

#[get("/health")]
pub async fn health_check(store: web::Data<RegistrationStore>) -> HttpResponse {
    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        registrations: store.count(),
    };

    HttpResponse::Ok().json(response)
}
