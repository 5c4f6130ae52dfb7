//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  /// Store or identity node failure. The detail is logged, never returned.
  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn bad_request(message: impl Into<String>) -> Self { Self::BadRequest(message.into()) }
}

impl From<glossa_core::Error> for ApiError {
  fn from(e: glossa_core::Error) -> Self {
    match e {
      glossa_core::Error::BadRequest(message) => Self::BadRequest(message),
      other => Self::Internal(Box::new(other)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    error!(error = %self, "unable to handle request");
    let (status, message) = match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
