//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! This is the one place where handler failures become status codes.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<persona_core::Error> for ApiError {
  fn from(err: persona_core::Error) -> Self {
    use persona_core::Error;
    match err {
      Error::NotFound(_) => Self::NotFound(err.to_string()),
      Error::Validation(_) | Error::DuplicateEmail(_) => Self::BadRequest(err.to_string()),
      Error::Store(e) => Self::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        tracing::debug!(message = %m, "not found");
        StatusCode::NOT_FOUND.into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "message": m }))).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "unhandled store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
