//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Clients only ever see two shapes: `404 resource not found` and
//! `422 unprocessable`. The detail carried by each variant is logged and
//! never sent.

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

  #[error("unprocessable: {0}")]
  Unprocessable(String),

  /// Any failure the handler did not anticipate. Rendered as 422.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unprocessable(_) | ApiError::Store(_) => {
        StatusCode::UNPROCESSABLE_ENTITY
      }
    }
  }

  fn message(&self) -> &'static str {
    match self {
      ApiError::NotFound(_) => "resource not found",
      ApiError::Unprocessable(_) | ApiError::Store(_) => "unprocessable",
    }
  }
}

impl From<trivia_core::Error> for ApiError {
  fn from(e: trivia_core::Error) -> Self {
    match &e {
      trivia_core::Error::InvalidPage(_) => ApiError::NotFound(e.to_string()),
      trivia_core::Error::MissingField(_) => ApiError::Unprocessable(e.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::Unprocessable(r.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::NotFound(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    match &self {
      ApiError::Store(e) => tracing::error!(error = %e, "request failed"),
      other => tracing::debug!(error = %other, "request rejected"),
    }
    (
      status,
      Json(json!({
        "success": false,
        "error":   status.as_u16(),
        "message": self.message(),
      })),
    )
      .into_response()
  }
}
