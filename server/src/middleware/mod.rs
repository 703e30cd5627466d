pub mod auth;

pub use auth::admin_guard_middleware;
