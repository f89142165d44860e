//! Row decoding and custom SQL functions.

use rusqlite::functions::FunctionFlags;
use trivia_core::{category::Category, question::Question};

/// Column list matching [`question_from_row`].
pub const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

pub fn question_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Question> {
  Ok(Question {
    id:         row.get(0)?,
    question:   row.get(1)?,
    answer:     row.get(2)?,
    category:   row.get(3)?,
    difficulty: row.get(4)?,
  })
}

pub fn category_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
  Ok(Category {
    id:   row.get(0)?,
    kind: row.get(1)?,
  })
}

/// Name of the Unicode-aware lowercase function registered on every
/// connection. SQLite's built-in `lower()` only folds ASCII.
pub const FOLD_CASE: &str = "fold_case";

/// Register [`FOLD_CASE`] on `conn`.
pub fn register_fold_case(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_CASE,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}
