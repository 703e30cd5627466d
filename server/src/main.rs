use std::sync::Arc;

use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use anyhow::Context;

use registration_server::auth_token::AdminTokenService;
use registration_server::config::{AppConfig, SecretSource};
use registration_server::handlers;
use registration_server::session::{SessionGate, SESSION_TTL};
use registration_server::store::{JsonFileSink, RegistrationStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (for development)
    // Try loading from current directory first, then from server/ directory
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("server/.env").ok();
    }

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting registration server...");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    log::info!("Event: {}", config.event_name);

    if config.secret_source == SecretSource::DerivedFromPin {
        log::warn!(
            "ADMIN_SECRET is not set; admin cookies are signed with a secret derived from ADMIN_PIN. \
             Anyone who knows the PIN can forge an admin session. Set ADMIN_SECRET (>= 32 bytes)."
        );
    }
    if config.admin_pin == registration_server::config::DEFAULT_PIN {
        log::warn!("ADMIN_PIN is the default value; change it before going live");
    }

    let tokens = AdminTokenService::new(config.admin_secret.clone().into_bytes(), SESSION_TTL)
        .context("failed to initialise admin cookie signing")?;
    let gate = SessionGate::new(config.admin_pin.clone(), tokens, config.secure_cookies);

    let store = RegistrationStore::open(Arc::new(JsonFileSink::new(&config.data_file)));
    log::info!(
        "Registration store ready with {} entries (storage: {})",
        store.count(),
        store.storage()
    );

    let host = config.host.clone();
    let port = config.port;
    log::info!("Starting HTTP server at {}:{}...", host, port);

    HttpServer::new(move || {
        App::new()
            // Shared state
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(gate.clone()))
            .app_data(web::Data::new(config.clone()))
            // Middleware
            .wrap(actix_middleware::Logger::default())
            .wrap(actix_middleware::Compress::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
