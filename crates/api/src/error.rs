//! HTTP-facing error type. Every failure a handler can produce is mapped to a
//! status code and a `{"detail": …}` body here, and nowhere else.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use db::QueryError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body did not match the entity schema.
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    /// The store failed; the message is the underlying cause.
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound      => StatusCode::NOT_FOUND,
            Self::Store(_)      => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound => Self::NotFound,
            QueryError::Store(msg) => Self::Store(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
