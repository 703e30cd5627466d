use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;

use crate::auth_token::AuthTokenError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Auth token error: {0}")]
    AuthToken(#[from] AuthTokenError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidPin => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AuthToken(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_response = ErrorResponse {
            success: false,
            error: self.to_string(),
        };

        HttpResponse::build(status).json(error_response)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
