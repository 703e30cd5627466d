use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::header,
    HttpRequest, HttpResponse,
};

use crate::auth_token::{now_ms, AdminTokenService};
use crate::error::{AppError, Result};

pub const ADMIN_COOKIE: &str = "admin_ok";
pub const LOGIN_PATH: &str = "/admin/login";
pub const PANEL_PATH: &str = "/admin/panel";
pub const SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// PIN check plus the signed `admin_ok` cookie that stands in for a session.
///
/// There is no server-side session table: a cookie with a valid signature and
/// an unexpired payload is accepted until it expires, even after logout on
/// another device.
#[derive(Clone)]
pub struct SessionGate {
    pin: Arc<str>,
    tokens: AdminTokenService,
    secure_cookies: bool,
}

impl SessionGate {
    pub fn new(pin: impl Into<Arc<str>>, tokens: AdminTokenService, secure_cookies: bool) -> Self {
        Self {
            pin: pin.into(),
            tokens,
            secure_cookies,
        }
    }

    pub fn authenticate(&self, pin: &str) -> Result<Cookie<'static>> {
        self.authenticate_at(pin, now_ms())
    }

    pub fn authenticate_at(&self, pin: &str, issued_at_ms: u64) -> Result<Cookie<'static>> {
        if pin != &*self.pin {
            return Err(AppError::InvalidPin);
        }

        let token = self.tokens.issue_admin_token(issued_at_ms)?;
        let max_age = CookieDuration::seconds(self.tokens.ttl().as_secs() as i64);

        Ok(Cookie::build(ADMIN_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(max_age)
            .finish())
    }

    pub fn is_authenticated(&self, req: &HttpRequest) -> bool {
        self.is_authenticated_at(req, now_ms())
    }

    pub fn is_authenticated_at(&self, req: &HttpRequest, reference_ms: u64) -> bool {
        let Some(cookie) = req.cookie(ADMIN_COOKIE) else {
            return false;
        };

        match self.tokens.verify(cookie.value(), reference_ms) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("Rejected admin cookie: {}", err);
                false
            }
        }
    }

    pub fn require_authenticated(&self, req: &HttpRequest) -> Result<()> {
        if self.is_authenticated(req) {
            Ok(())
        } else {
            Err(AppError::Unauthenticated)
        }
    }

    pub fn clear_credential(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(ADMIN_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish();
        cookie.make_removal();
        cookie
    }
}

pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn redirect_to_login() -> HttpResponse {
    redirect_to(LOGIN_PATH)
}
