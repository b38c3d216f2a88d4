//! Custom error types for the API service

use auth::AuthError;
use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::contact::ContactError;

pub(crate) const FILE_TOO_LARGE: &str = "File too large";

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Unauthorized access
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource with message
    #[error("{0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Auth(err) => match err {
                AuthError::Validation(_)
                | AuthError::DuplicateEmail
                | AuthError::InvalidOrExpiredToken => (StatusCode::BAD_REQUEST, err.to_string()),
                AuthError::InvalidCredentials | AuthError::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                AuthError::Hashing(_) | AuthError::Database(_) => internal(),
            },
            ApiError::Catalog(err) => match err {
                CatalogError::GenreNotFound
                | CatalogError::BookNotFound
                | CatalogError::DownloadUnavailable => (StatusCode::NOT_FOUND, err.to_string()),
                CatalogError::Upstream(_)
                | CatalogError::UpstreamTimeout
                | CatalogError::Database(_) => internal(),
            },
            ApiError::Contact(err) => match err {
                ContactError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                ContactError::Database(_) => internal(),
            },
            ApiError::InternalServerError | ApiError::Database(_) => internal(),
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::BadRequest(FILE_TOO_LARGE.to_string());
        }
        ApiError::BadRequest(err.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
