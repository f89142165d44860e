//! Error type for `trivia-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid row count: {0}")]
  InvalidCount(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
