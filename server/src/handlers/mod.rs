pub mod admin;
pub mod form;
pub mod health;
pub mod public;

use actix_web::{middleware::from_fn, web};

use crate::middleware::admin_guard_middleware;

pub use admin::{admin_entry, export_csv, export_json, login, login_page, logout, panel, reset};
pub use health::health_check;
pub use public::{register, registration_form};

/// Registers every route. Shared state (`RegistrationStore`, `SessionGate`,
/// `AppConfig`) must already be attached as `web::Data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(registration_form)
        .service(register)
        .service(admin_entry)
        .service(login_page)
        .service(login)
        .service(logout)
        .service(
            web::scope("/admin")
                .wrap(from_fn(admin_guard_middleware))
                .service(panel)
                .service(export_json)
                .service(export_csv)
                .service(reset),
        );
}
