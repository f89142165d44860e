//! Handlers for `/categories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/categories` | 404 if the store has no categories |
//! | `GET`  | `/categories/{id}/questions` | 404 if the category is unknown or empty |

use std::sync::Arc;

use axum::extract::{Path, State, rejection::PathRejection};
use serde::Serialize;
use trivia_core::{
  category::{CategoryMap, category_map},
  question::Question,
  store::TriviaStore,
};

use crate::{
  error::ApiError,
  reply::{Reply, success},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategoryList {
  pub categories: CategoryMap,
}

/// `GET /categories`
pub async fn list<S>(State(store): State<Arc<S>>) -> Reply<CategoryList>
where
  S: TriviaStore,
{
  let categories = store.list_categories().await.map_err(ApiError::store)?;
  if categories.is_empty() {
    return Err(ApiError::NotFound("no categories".into()));
  }

  Ok(success(CategoryList { categories: category_map(categories) }))
}

// ─── Questions in one category ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuestions {
  pub questions:        Vec<Question>,
  /// Count across every category, not just this one.
  pub total_questions:  u64,
  pub current_category: String,
}

/// `GET /categories/{id}/questions`
pub async fn questions<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Reply<CategoryQuestions>
where
  S: TriviaStore,
{
  let Path(id) = path?;

  let category = store
    .get_category(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("category {id} not found")))?;

  let questions = store
    .questions_in_category(id)
    .await
    .map_err(ApiError::store)?;
  if questions.is_empty() {
    return Err(ApiError::NotFound(format!("category {id} has no questions")));
  }

  let total_questions = store.count_questions().await.map_err(ApiError::store)?;

  Ok(success(CategoryQuestions {
    questions,
    total_questions,
    current_category: category.kind,
  }))
}
