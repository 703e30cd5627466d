// Library exports for testing and reuse

pub mod auth_token;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod store;
pub mod views;
