//! Question — a trivia item with text, answer, difficulty and category.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A persisted question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id:         i64,
  pub question:   String,
  pub answer:     String,
  pub category:   i64,
  pub difficulty: i64,
}

/// Input for [`TriviaStore::add_question`](crate::store::TriviaStore::add_question).
/// The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
  pub question:   String,
  pub answer:     String,
  pub category:   i64,
  pub difficulty: i64,
}

impl NewQuestion {
  /// Build a question from individually optional parts, failing on the first
  /// one that is absent.
  pub fn from_parts(
    question: Option<String>,
    answer: Option<String>,
    category: Option<i64>,
    difficulty: Option<i64>,
  ) -> Result<Self> {
    Ok(Self {
      question:   question.ok_or(Error::MissingField("question"))?,
      answer:     answer.ok_or(Error::MissingField("answer"))?,
      category:   category.ok_or(Error::MissingField("category"))?,
      difficulty: difficulty.ok_or(Error::MissingField("difficulty"))?,
    })
  }
}
