use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("address space not found: {0}")]
    SpaceNotFound(String),

    #[error("address space already exists: {0}")]
    SpaceAlreadyExists(String),

    #[error("address not found: {0}")]
    AddressNotFound(String),

    #[error("address already exists: {0}")]
    AddressAlreadyExists(String),

    #[error("invalid resource: {0}")]
    Model(#[from] maas_models::ModelError),

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::SpaceNotFound(_)
            | ServiceError::AddressNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ServiceError::SpaceAlreadyExists(_)
            | ServiceError::AddressAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            ServiceError::Model(_) | ServiceError::Validation(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ServiceError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::{Json, http::StatusCode};
        use serde_json::json;

        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
