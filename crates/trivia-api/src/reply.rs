//! The `{"success": true, ...}` envelope shared by every successful response.

use axum::Json;
use serde::Serialize;

use crate::ApiError;

#[derive(Debug, Serialize)]
pub struct Success<T> {
  success: bool,
  #[serde(flatten)]
  body:    T,
}

/// What every handler returns.
pub type Reply<T> = Result<Json<Success<T>>, ApiError>;

pub fn success<T: Serialize>(body: T) -> Json<Success<T>> {
  Json(Success { success: true, body })
}
