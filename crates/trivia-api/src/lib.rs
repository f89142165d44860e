//! JSON REST API for the trivia question bank.
//!
//! Exposes an axum [`Router`] backed by any [`trivia_core::store::TriviaStore`].
//! CORS, tracing and transport concerns are the caller's responsibility.
//!
//! Every response body carries `success`; failures add `error` (the status
//! code) and a fixed `message`.

pub mod categories;
pub mod error;
pub mod lenient;
pub mod questions;
pub mod quizzes;
pub mod reply;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use trivia_core::store::TriviaStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// Unmatched paths answer with the JSON 404 body rather than axum's empty one.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TriviaStore + 'static,
{
  Router::new()
    // Categories
    .route("/categories", get(categories::list::<S>))
    .route("/categories/{id}/questions", get(categories::questions::<S>))
    // Questions
    .route(
      "/questions",
      get(questions::list::<S>).post(questions::create_or_search::<S>),
    )
    .route("/questions/{id}", delete(questions::delete_one::<S>))
    // Quizzes
    .route("/quizzes", post(quizzes::next_question::<S>))
    .fallback(fallback)
    .with_state(store)
}

async fn fallback() -> ApiError {
  ApiError::NotFound("no such route".into())
}

#[cfg(test)]
mod tests;
