use actix_web::{
    get,
    http::header::{self, ContentDisposition, ContentType},
    post, web, HttpRequest, HttpResponse,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    session::{redirect_to, redirect_to_login, SessionGate, PANEL_PATH},
    store::RegistrationStore,
    views,
};

use super::form;

#[get("/admin")]
pub async fn admin_entry(req: HttpRequest, gate: web::Data<SessionGate>) -> HttpResponse {
    if gate.is_authenticated(&req) {
        redirect_to(PANEL_PATH)
    } else {
        redirect_to_login()
    }
}

#[get("/admin/login")]
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::login_form(None))
}

#[post("/admin/login")]
pub async fn login(body: web::Bytes, gate: web::Data<SessionGate>) -> Result<HttpResponse> {
    match gate.authenticate(&form::pin(&body)) {
        Ok(cookie) => {
            log::info!("Admin login succeeded");
            Ok(HttpResponse::Found()
                .cookie(cookie)
                .insert_header((header::LOCATION, PANEL_PATH))
                .finish())
        }
        Err(AppError::InvalidPin) => {
            log::warn!("Admin login failed: invalid PIN");
            Ok(HttpResponse::Ok()
                .content_type(ContentType::html())
                .body(views::login_form(Some("Invalid PIN"))))
        }
        Err(err) => Err(err),
    }
}

#[get("/logout")]
pub async fn logout(gate: web::Data<SessionGate>) -> HttpResponse {
    HttpResponse::Found()
        .cookie(gate.clear_credential())
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[get("/panel")]
pub async fn panel(
    store: web::Data<RegistrationStore>,
    config: web::Data<AppConfig>,
) -> HttpResponse {
    let registrations = store.list();

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(views::admin_panel(&config.event_name, &registrations))
}

#[get("/export/json")]
pub async fn export_json(store: web::Data<RegistrationStore>) -> Result<HttpResponse> {
    let body = store.to_json()?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .insert_header(ContentDisposition::attachment("registrations.json"))
        .body(body))
}

#[get("/export/csv")]
pub async fn export_csv(store: web::Data<RegistrationStore>) -> Result<HttpResponse> {
    let body = store.to_csv()?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition::attachment("registrations.csv"))
        .body(body))
}

#[get("/reset")]
pub async fn reset(store: web::Data<RegistrationStore>) -> Result<HttpResponse> {
    let store = store.into_inner();

    web::block(move || store.clear())
        .await
        .map_err(|err| AppError::Internal(format!("reset task failed: {err}")))?;

    log::warn!("Registrations reset by admin");

    Ok(redirect_to(PANEL_PATH))
}
