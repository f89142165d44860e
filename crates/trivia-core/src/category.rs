//! Category — a labelled grouping for questions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Labels inserted into an empty store when seeding is enabled, in id order.
pub const DEFAULT_CATEGORIES: [&str; 6] =
  ["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

/// A category row. Categories are never updated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id:   i64,
  #[serde(rename = "type")]
  pub kind: String,
}

/// The `{"<id>": "<type>"}` object returned by the category listings.
pub type CategoryMap = BTreeMap<String, String>;

/// Collapse a category list into its id → label mapping.
pub fn category_map(categories: impl IntoIterator<Item = Category>) -> CategoryMap {
  categories
    .into_iter()
    .map(|c| (c.id.to_string(), c.kind))
    .collect()
}
