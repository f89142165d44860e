//! [`SqliteStore`] — the SQLite implementation of [`TriviaStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};

use trivia_core::{
  category::Category,
  page::Page,
  question::{NewQuestion, Question},
  store::{QuizFilter, TriviaStore},
};

use crate::{
  encode::{
    FOLD_CASE, QUESTION_COLUMNS, category_from_row, question_from_row,
    register_fold_case,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A trivia store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_fold_case(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a question `SELECT` with positional parameters.
  async fn select_questions(&self, sql: String, values: Vec<Value>) -> Result<Vec<Question>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values), question_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── TriviaStore impl ────────────────────────────────────────────────────────

impl TriviaStore for SqliteStore {
  type Error = Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn add_category(&self, kind: String) -> Result<Category> {
    let label = kind.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (type) VALUES (?1)",
          rusqlite::params![label],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, kind = %kind, "added category");
    Ok(Category { id, kind })
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, type FROM categories ORDER BY id")?;
        let rows = stmt
          .query_map([], category_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn get_category(&self, id: i64) -> Result<Option<Category>> {
    let row = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, type FROM categories WHERE id = ?1",
            rusqlite::params![id],
            category_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(row)
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn count_questions(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM questions", [], |r| r.get(0))?)
      })
      .await?;
    u64::try_from(n).map_err(|_| Error::InvalidCount(n))
  }

  async fn list_questions(&self, page: Page) -> Result<Vec<Question>> {
    self
      .select_questions(
        format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id LIMIT ? OFFSET ?"),
        vec![page.limit().into(), page.offset().into()],
      )
      .await
  }

  async fn get_question(&self, id: i64) -> Result<Option<Question>> {
    let row = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?1"),
            rusqlite::params![id],
            question_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(row)
  }

  async fn add_question(&self, input: NewQuestion) -> Result<Question> {
    let NewQuestion { question, answer, category, difficulty } = input;
    let (q, a) = (question.clone(), answer.clone());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO questions (question, answer, category, difficulty)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![q, a, category, difficulty],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, category, "added question");
    Ok(Question { id, question, answer, category, difficulty })
  }

  async fn delete_question(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM questions WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    tracing::debug!(id, removed, "delete question");
    Ok(removed > 0)
  }

  async fn search_questions(&self, term: &str) -> Result<Vec<Question>> {
    // instr() matches the term literally; no LIKE wildcards to escape.
    self
      .select_questions(
        format!(
          "SELECT {QUESTION_COLUMNS} FROM questions
           WHERE instr({FOLD_CASE}(question), {FOLD_CASE}(?)) > 0
           ORDER BY id"
        ),
        vec![term.to_owned().into()],
      )
      .await
  }

  async fn questions_in_category(&self, category_id: i64) -> Result<Vec<Question>> {
    self
      .select_questions(
        format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE category = ? ORDER BY id"),
        vec![category_id.into()],
      )
      .await
  }

  async fn quiz_candidates(&self, filter: &QuizFilter) -> Result<Vec<Question>> {
    let mut conds: Vec<&'static str> = vec![];
    let mut values: Vec<Value> = vec![];

    // One JSON array parameter, so the exclusion list is not bounded by
    // SQLite's host parameter limit.
    if !filter.exclude.is_empty() {
      conds.push("id NOT IN (SELECT value FROM json_each(?))");
      values.push(Value::Text(serde_json::to_string(&filter.exclude)?));
    }
    if let Some(category) = filter.category {
      conds.push("category = ?");
      values.push(category.into());
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    self
      .select_questions(
        format!("SELECT {QUESTION_COLUMNS} FROM questions {where_clause} ORDER BY id"),
        values,
      )
      .await
  }
}
