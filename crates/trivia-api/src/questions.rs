//! Handlers for `/questions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/questions` | `?page=N` (1-indexed, 10 per page); 404 past the last page |
//! | `POST`   | `/questions` | Body: [`CreateOrSearchBody`]; search when `searchTerm` is set |
//! | `DELETE` | `/questions/{id}` | 404 if absent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
};
use serde::{Deserialize, Serialize};
use trivia_core::{
  category::{CategoryMap, category_map},
  page::Page,
  question::{NewQuestion, Question},
  store::TriviaStore,
};

use crate::{
  error::ApiError,
  lenient,
  reply::{Reply, success},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
  pub questions:       Vec<Question>,
  pub total_questions: u64,
  pub categories:      CategoryMap,
}

/// `GET /questions[?page=N]`
///
/// An unparseable `page` falls back to the first page.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Reply<QuestionPage>
where
  S: TriviaStore,
{
  let page = match params {
    Ok(Query(ListParams { page: Some(n) })) => Page::new(n)?,
    _ => Page::default(),
  };

  let questions = store.list_questions(page).await.map_err(ApiError::store)?;
  if questions.is_empty() {
    return Err(ApiError::NotFound(format!("page {} is empty", page.number())));
  }

  let total_questions = store.count_questions().await.map_err(ApiError::store)?;
  let categories = store.list_categories().await.map_err(ApiError::store)?;

  Ok(success(QuestionPage {
    questions,
    total_questions,
    categories: category_map(categories),
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub deleted: i64,
}

/// `DELETE /questions/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Reply<Deleted>
where
  S: TriviaStore,
{
  let Path(id) = path?;

  let removed = store.delete_question(id).await.map_err(ApiError::store)?;
  if !removed {
    return Err(ApiError::NotFound(format!("question {id} not found")));
  }

  tracing::info!(id, "deleted question");
  Ok(success(Deleted { deleted: id }))
}

// ─── Create or search ─────────────────────────────────────────────────────────

/// JSON body accepted by `POST /questions`.
///
/// A non-empty `searchTerm` turns the request into a search and every other
/// field is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateOrSearchBody {
  #[serde(rename = "searchTerm")]
  pub search_term: Option<String>,
  pub question:    Option<String>,
  pub answer:      Option<String>,
  #[serde(default, deserialize_with = "lenient::opt_int")]
  pub category:    Option<i64>,
  #[serde(default, deserialize_with = "lenient::opt_int")]
  pub difficulty:  Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreateOrSearch {
  Created {
    created: i64,
  },
  #[serde(rename_all = "camelCase")]
  Found {
    questions:        Vec<Question>,
    total_questions:  u64,
    current_category: Option<String>,
  },
}

/// `POST /questions`
pub async fn create_or_search<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateOrSearchBody>, JsonRejection>,
) -> Reply<CreateOrSearch>
where
  S: TriviaStore,
{
  let Json(body) = body?;

  if let Some(term) = body.search_term.filter(|t| !t.is_empty()) {
    let questions = store
      .search_questions(&term)
      .await
      .map_err(ApiError::store)?;
    let total_questions = store.count_questions().await.map_err(ApiError::store)?;

    tracing::debug!(term = %term, hits = questions.len(), "searched questions");
    return Ok(success(CreateOrSearch::Found {
      questions,
      total_questions,
      current_category: None,
    }));
  }

  let input = NewQuestion::from_parts(
    body.question,
    body.answer,
    body.category,
    body.difficulty,
  )?;
  let question = store.add_question(input).await.map_err(ApiError::store)?;

  tracing::info!(id = question.id, category = question.category, "created question");
  Ok(success(CreateOrSearch::Created { created: question.id }))
}
