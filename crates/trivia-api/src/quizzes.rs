//! Handler for `POST /quizzes`.
//!
//! Body: `{"previous_questions": [ids], "quiz_category": {"id": n}}` where
//! `id = 0` draws from every category.

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use rand::seq::SliceRandom as _;
use serde::{Deserialize, Serialize};
use trivia_core::{
  question::Question,
  store::{QuizFilter, TriviaStore},
};

use crate::{
  error::ApiError,
  lenient,
  reply::{Reply, success},
};

#[derive(Debug, Deserialize)]
pub struct QuizBody {
  #[serde(default, deserialize_with = "lenient::opt_int_list")]
  pub previous_questions: Option<Vec<i64>>,
  pub quiz_category:      Option<QuizCategory>,
}

/// Clients also send the category label; only the id is used.
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
  #[serde(deserialize_with = "lenient::int")]
  pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct NextQuestion {
  pub question: Question,
}

/// `POST /quizzes` — a question drawn uniformly from those not yet seen.
pub async fn next_question<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<QuizBody>, JsonRejection>,
) -> Reply<NextQuestion>
where
  S: TriviaStore,
{
  let Json(body) = body?;
  let previous = body
    .previous_questions
    .ok_or_else(|| ApiError::Unprocessable("previous_questions is required".into()))?;
  let category = body
    .quiz_category
    .ok_or_else(|| ApiError::Unprocessable("quiz_category is required".into()))?;

  let filter = QuizFilter::new(previous, category.id);
  let candidates = store
    .quiz_candidates(&filter)
    .await
    .map_err(ApiError::store)?;

  let question = candidates
    .choose(&mut rand::thread_rng())
    .cloned()
    .ok_or_else(|| ApiError::NotFound("no questions left for this quiz".into()))?;

  tracing::debug!(
    id = question.id,
    remaining = candidates.len() - 1,
    "drew quiz question"
  );
  Ok(success(NextQuestion { question }))
}
