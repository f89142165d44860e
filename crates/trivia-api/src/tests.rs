//! Router tests against an in-memory `SqliteStore`.

use std::{collections::HashSet, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use trivia_core::{question::NewQuestion, store::TriviaStore};
use trivia_store_sqlite::SqliteStore;

use crate::api_router;

async fn empty_store() -> Arc<SqliteStore> {
  Arc::new(SqliteStore::open_in_memory().await.unwrap())
}

/// Categories 1 (Science), 2 (Art), 3 (Geography) and one question in each of
/// the first two, plus a second Science question.
async fn store() -> Arc<SqliteStore> {
  let s = empty_store().await;
  for kind in ["Science", "Art", "Geography"] {
    s.add_category(kind.into()).await.unwrap();
  }
  add(&s, "What is the chemical symbol for gold?", 1).await;
  add(&s, "Which artist painted the ceiling of the Sistine Chapel?", 2).await;
  add(&s, "What is the boiling point of water in Kelvin?", 1).await;
  s
}

async fn add(s: &SqliteStore, text: &str, category: i64) -> i64 {
  s.add_question(NewQuestion {
    question: text.into(),
    answer: "answer".into(),
    category,
    difficulty: 2,
  })
  .await
  .unwrap()
  .id
}

async fn send(
  store: Arc<SqliteStore>,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let app: Router = api_router(store);
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode) {
  assert_eq!(status, expected, "body: {body}");
  assert_eq!(body["success"], json!(false));
  assert_eq!(body["error"], json!(expected.as_u16()));
  let message = if expected == StatusCode::NOT_FOUND {
    "resource not found"
  } else {
    "unprocessable"
  };
  assert_eq!(body["message"], json!(message));
}

// ── Categories ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn categories_are_keyed_by_textual_id() {
  let (status, body) = send(store().await, "GET", "/categories", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], json!(true));
  assert_eq!(
    body["categories"],
    json!({ "1": "Science", "2": "Art", "3": "Geography" })
  );
}

#[tokio::test]
async fn categories_404_when_none_exist() {
  let (status, body) = send(empty_store().await, "GET", "/categories", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

// ── Paginated questions ────────────────────────────────────────────────────────

#[tokio::test]
async fn first_page_lists_questions_and_categories() {
  let (status, body) = send(store().await, "GET", "/questions", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["questions"].as_array().unwrap().len(), 3);
  assert_eq!(body["totalQuestions"], json!(3));
  assert_eq!(body["categories"]["2"], json!("Art"));

  let first = &body["questions"][0];
  assert_eq!(first["id"], json!(1));
  assert_eq!(first["category"], json!(1));
  assert_eq!(first["difficulty"], json!(2));
  assert_eq!(first["answer"], json!("answer"));
}

#[tokio::test]
async fn pages_hold_ten_questions() {
  let s = store().await;
  for i in 0..9 {
    add(&s, &format!("filler {i}"), 3).await;
  }

  let (status, body) = send(s.clone(), "GET", "/questions?page=1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["questions"].as_array().unwrap().len(), 10);
  assert_eq!(body["totalQuestions"], json!(12));

  let (status, body) = send(s, "GET", "/questions?page=2", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["questions"].as_array().unwrap().len(), 2);
  assert_eq!(body["questions"][0]["id"], json!(11));
}

#[tokio::test]
async fn page_past_the_end_is_404() {
  let (status, body) = send(store().await, "GET", "/questions?page=2", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);

  let (status, body) = send(store().await, "GET", "/questions?page=1000", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_positive_page_is_404_and_garbage_page_is_first() {
  let (status, body) = send(store().await, "GET", "/questions?page=0", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);

  let (status, body) = send(store().await, "GET", "/questions?page=abc", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["questions"][0]["id"], json!(1));
}

#[tokio::test]
async fn empty_bank_first_page_is_404() {
  let s = empty_store().await;
  s.add_category("Science".into()).await.unwrap();
  let (status, body) = send(s, "GET", "/questions", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

// ── Delete ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_question() {
  let s = store().await;
  let (status, body) = send(s.clone(), "DELETE", "/questions/2", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "success": true, "deleted": 2 }));

  let (_, body) = send(s.clone(), "GET", "/questions", None).await;
  let ids: Vec<i64> = body["questions"]
    .as_array()
    .unwrap()
    .iter()
    .map(|q| q["id"].as_i64().unwrap())
    .collect();
  assert_eq!(ids, vec![1, 3]);
  assert_eq!(body["totalQuestions"], json!(2));

  let (status, body) = send(s, "DELETE", "/questions/2", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_question_is_404() {
  let (status, body) = send(store().await, "DELETE", "/questions/800", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_with_non_numeric_id_is_404() {
  let (status, body) = send(store().await, "DELETE", "/questions/abc", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

// ── Create ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_question_is_retrievable() {
  let s = store().await;
  let (status, body) = send(
    s.clone(),
    "POST",
    "/questions",
    Some(json!({
      "question": "This is a question",
      "answer": "This is an answer",
      "difficulty": 5,
      "category": 3,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], json!(true));
  let id = body["created"].as_i64().unwrap();

  let stored = s.get_question(id).await.unwrap().unwrap();
  assert_eq!(stored.question, "This is a question");
  assert_eq!(stored.difficulty, 5);

  let (_, body) = send(s, "GET", "/categories/3/questions", None).await;
  assert_eq!(body["questions"][0]["id"], json!(id));
}

#[tokio::test]
async fn create_accepts_string_category() {
  let s = store().await;
  let (status, _) = send(
    s.clone(),
    "POST",
    "/questions",
    Some(json!({ "question": "Q", "answer": "A", "difficulty": "1", "category": "2" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(s.questions_in_category(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn create_with_missing_field_is_422() {
  let s = store().await;
  let (status, body) = send(
    s.clone(),
    "POST",
    "/questions",
    Some(json!({ "question": "Q", "answer": "A", "category": 1 })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);

  let (status, body) = send(
    s.clone(),
    "POST",
    "/questions",
    Some(json!({ "question": "Q", "answer": null, "difficulty": 5, "category": 1 })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);

  assert_eq!(s.count_questions().await.unwrap(), 3);
}

#[tokio::test]
async fn create_with_unknown_category_is_422() {
  let (status, body) = send(
    store().await,
    "POST",
    "/questions",
    Some(json!({ "question": "Q", "answer": "A", "difficulty": 1, "category": 99 })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_body_is_422() {
  let app: Router = api_router(store().await);
  let req = Request::builder()
    .method("POST")
    .uri("/questions")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let resp = app.oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

  let (status, body) = send(store().await, "POST", "/questions", Some(json!([1, 2]))).await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Search ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn search_matches_case_insensitively() {
  let s = store().await;
  add(&s, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", 2).await;
  add(&s, "What movie TITLE won best picture?", 3).await;

  let (status, body) = send(
    s,
    "POST",
    "/questions",
    Some(json!({ "searchTerm": "title" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["currentCategory"], Value::Null);
  assert_eq!(body["totalQuestions"], json!(5));

  let hits = body["questions"].as_array().unwrap();
  assert_eq!(hits.len(), 2);
  for q in hits {
    let text = q["question"].as_str().unwrap().to_lowercase();
    assert!(text.contains("title"), "unexpected hit: {text}");
  }
}

#[tokio::test]
async fn search_folds_accented_letters() {
  let s = store().await;
  add(&s, "Which ÉCOLE is oldest?", 3).await;

  let (status, body) = send(s, "POST", "/questions", Some(json!({ "searchTerm": "école" }))).await;
  assert_eq!(status, StatusCode::OK);
  let hits = body["questions"].as_array().unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0]["question"], json!("Which ÉCOLE is oldest?"));
}

#[tokio::test]
async fn search_without_hits_is_still_ok() {
  let (status, body) = send(
    store().await,
    "POST",
    "/questions",
    Some(json!({ "searchTerm": "zeppelin" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["questions"], json!([]));
}

#[tokio::test]
async fn unknown_search_key_is_treated_as_incomplete_create() {
  let (status, body) = send(
    store().await,
    "POST",
    "/questions",
    Some(json!({ "invalidSearchTermKey": "Invalid" })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);

  let (status, body) = send(
    store().await,
    "POST",
    "/questions",
    Some(json!({ "searchTerm": "" })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Questions by category ──────────────────────────────────────────────────────

#[tokio::test]
async fn category_questions_lists_only_that_category() {
  let (status, body) = send(store().await, "GET", "/categories/1/questions", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["currentCategory"], json!("Science"));
  assert_eq!(body["totalQuestions"], json!(3));

  let questions = body["questions"].as_array().unwrap();
  assert_eq!(questions.len(), 2);
  assert!(questions.iter().all(|q| q["category"] == json!(1)));
}

#[tokio::test]
async fn unknown_or_empty_category_is_404() {
  let (status, body) = send(store().await, "GET", "/categories/36/questions", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);

  let (status, body) = send(store().await, "GET", "/categories/3/questions", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

// ── Quizzes ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn quiz_never_repeats_previous_questions() {
  let s = store().await;
  let mut seen: Vec<i64> = vec![];

  for _ in 0..3 {
    let (status, body) = send(
      s.clone(),
      "POST",
      "/quizzes",
      Some(json!({ "previous_questions": seen, "quiz_category": { "id": 0, "type": "click" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["question"]["id"].as_i64().unwrap();
    assert!(!seen.contains(&id), "{id} was already asked");
    seen.push(id);
  }

  let distinct: HashSet<i64> = seen.iter().copied().collect();
  assert_eq!(distinct.len(), 3);

  let (status, body) = send(
    s,
    "POST",
    "/quizzes",
    Some(json!({ "previous_questions": seen, "quiz_category": { "id": 0 } })),
  )
  .await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quiz_stays_within_category() {
  let s = store().await;
  let (status, body) = send(
    s.clone(),
    "POST",
    "/quizzes",
    Some(json!({ "previous_questions": [1], "quiz_category": { "id": "1", "type": "Science" } })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["question"]["id"], json!(3));
  assert_eq!(body["question"]["category"], json!(1));

  let (status, body) = send(
    s,
    "POST",
    "/quizzes",
    Some(json!({ "previous_questions": [1, 3], "quiz_category": { "id": 1 } })),
  )
  .await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quiz_with_very_long_history_still_draws() {
  let previous: Vec<i64> = (1000..40000).collect();
  let (status, body) = send(
    store().await,
    "POST",
    "/quizzes",
    Some(json!({ "previous_questions": previous, "quiz_category": { "id": 0 } })),
  )
  .await;
  assert_eq!(status, StatusCode::OK, "body: {body}");
  let id = body["question"]["id"].as_i64().unwrap();
  assert!((1..=3).contains(&id));
}

#[tokio::test]
async fn quiz_for_unknown_category_is_404() {
  let (status, body) = send(
    store().await,
    "POST",
    "/quizzes",
    Some(json!({ "previous_questions": [], "quiz_category": { "id": 18, "type": "Invalid category" } })),
  )
  .await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quiz_without_required_fields_is_422() {
  let (status, body) = send(
    store().await,
    "POST",
    "/quizzes",
    Some(json!({ "quiz_category": { "id": 0 } })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);

  let (status, body) = send(
    store().await,
    "POST",
    "/quizzes",
    Some(json!({ "previous_questions": [] })),
  )
  .await;
  assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY);
}

// ── Fallback ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_route_gets_json_404() {
  let (status, body) = send(store().await, "GET", "/nope", None).await;
  assert_error(status, &body, StatusCode::NOT_FOUND);
}
