//! Fixed-size, 1-indexed pagination over the id-ordered question list.

use crate::{Error, Result};

/// Number of questions returned per page.
pub const QUESTIONS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  number: i64,
  offset: i64,
}

impl Page {
  /// Validate a 1-indexed page number.
  ///
  /// Fails for numbers below 1 and for pages whose row offset does not fit in
  /// an `i64` (SQLite's integer width).
  pub fn new(number: i64) -> Result<Self> {
    if number < 1 {
      return Err(Error::InvalidPage(number));
    }
    let offset = (number - 1)
      .checked_mul(i64::from(QUESTIONS_PER_PAGE))
      .ok_or(Error::InvalidPage(number))?;
    Ok(Self { number, offset })
  }

  pub fn number(&self) -> i64 { self.number }

  /// Rows to skip before this page starts.
  pub fn offset(&self) -> i64 { self.offset }

  pub fn limit(&self) -> i64 { i64::from(QUESTIONS_PER_PAGE) }
}

impl Default for Page {
  fn default() -> Self { Self { number: 1, offset: 0 } }
}
