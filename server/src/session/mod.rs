pub mod gate;

pub use gate::{
    redirect_to, redirect_to_login, SessionGate, ADMIN_COOKIE, LOGIN_PATH, PANEL_PATH,
    SESSION_TTL,
};
