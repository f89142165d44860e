//! Error types for `trivia-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("page {0} is out of range")]
  InvalidPage(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
