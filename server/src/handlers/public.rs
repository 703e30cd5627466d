use actix_web::{get, http::header::ContentType, post, web, HttpResponse};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    store::RegistrationStore,
    views,
};

use super::form;

#[get("/")]
pub async fn registration_form(config: web::Data<AppConfig>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::registration_form(&config.event_name))
}

#[post("/register")]
pub async fn register(
    body: web::Bytes,
    store: web::Data<RegistrationStore>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse> {
    let fields = form::registration_fields(&body);
    let store = store.into_inner();

    let registration = web::block(move || store.append(fields))
        .await
        .map_err(|err| AppError::Internal(format!("registration task failed: {err}")))?;

    log::info!("New registration {}", registration.id);

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::confirmation(&config.event_name, &registration)))
}
