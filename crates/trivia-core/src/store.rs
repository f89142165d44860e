//! The `TriviaStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `trivia-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  category::Category,
  page::Page,
  question::{NewQuestion, Question},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`TriviaStore::quiz_candidates`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizFilter {
  /// Question ids the player has already seen.
  pub exclude:  Vec<i64>,
  /// Restrict to one category; `None` means every category.
  pub category: Option<i64>,
}

impl QuizFilter {
  /// Category id `0` is the "any category" sentinel used by quiz clients.
  pub fn new(previous: Vec<i64>, category_id: i64) -> Self {
    Self {
      exclude:  previous,
      category: (category_id != 0).then_some(category_id),
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a trivia store backend.
///
/// Every method returns a `Send` future so the trait can be used from a
/// multi-threaded runtime behind `axum`. Ordered listings are by ascending id.
pub trait TriviaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Categories ────────────────────────────────────────────────────────

  /// Create and persist a category with the given label.
  fn add_category(
    &self,
    kind: String,
  ) -> impl Future<Output = Result<Category, Self::Error>> + Send + '_;

  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  /// Returns `None` if no category has this id.
  fn get_category(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Category>, Self::Error>> + Send + '_;

  // ── Questions ─────────────────────────────────────────────────────────

  /// Total number of questions across all categories.
  fn count_questions(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// One page of the id-ordered question list. Empty past the last page.
  fn list_questions(
    &self,
    page: Page,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  /// Returns `None` if no question has this id.
  fn get_question(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// Persist a new question and return it with its assigned id.
  ///
  /// Fails if `input.category` does not reference an existing category.
  fn add_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  /// Remove a question. Returns `false` if nothing had this id.
  fn delete_question(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Case-insensitive substring match on question text.
  fn search_questions<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + 'a;

  fn questions_in_category(
    &self,
    category_id: i64,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  /// Every question matching `filter`, for the caller to draw from.
  fn quiz_candidates<'a>(
    &'a self,
    filter: &'a QuizFilter,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + 'a;
}
