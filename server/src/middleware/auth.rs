use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::session::{redirect_to_login, SessionGate};

/// Guards admin-only routes. Requests without a valid admin cookie are
/// redirected to the PIN form instead of receiving an error page.
pub async fn admin_guard_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let allowed = req
        .app_data::<web::Data<SessionGate>>()
        .map(|gate| gate.require_authenticated(req.request()).is_ok())
        .unwrap_or(false);

    let response = if allowed {
        next.call(req).await?.map_into_left_body()
    } else {
        log::debug!("Redirecting unauthenticated request for {}", req.path());
        req.into_response(redirect_to_login()).map_into_right_body()
    };

    Ok(response)
}
