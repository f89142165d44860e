//! HTTP server wiring for the trivia API.
//!
//! Wraps [`trivia_api::api_router`] with CORS and request tracing, and owns
//! the runtime configuration and first-start category seeding.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{Method, header},
};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use trivia_core::{category::DEFAULT_CATEGORIES, store::TriviaStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `trivia.toml` and
/// `TRIVIA_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Insert [`DEFAULT_CATEGORIES`] when the store has none.
  pub seed_categories: bool,
}

impl ServerConfig {
  /// Layer built-in defaults, the optional TOML file at `path`, and the
  /// environment.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000)?
      .set_default("store_path", "trivia.db")?
      .set_default("seed_categories", true)?
      .add_source(config::File::from(path.into()).required(false))
      .add_source(config::Environment::with_prefix("TRIVIA"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Any origin, the usual verbs, and the two headers browser clients send.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([
      Method::GET,
      Method::PUT,
      Method::POST,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build the complete application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: TriviaStore + 'static,
{
  trivia_api::api_router(store)
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer())
}

// ─── Seeding ──────────────────────────────────────────────────────────────────

/// Insert the default categories if the store has none. Returns how many
/// were added.
pub async fn seed_categories<S>(store: &S) -> Result<usize, S::Error>
where
  S: TriviaStore,
{
  if !store.list_categories().await?.is_empty() {
    return Ok(0);
  }
  for kind in DEFAULT_CATEGORIES {
    store.add_category(kind.to_owned()).await?;
  }
  tracing::info!(count = DEFAULT_CATEGORIES.len(), "seeded default categories");
  Ok(DEFAULT_CATEGORIES.len())
}

// ─── Integration tests ────────────────────────────────────────────────────────
