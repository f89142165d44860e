//! Serde helpers for integer fields that clients may send as strings.
//!
//! Quiz and question forms in the browser key categories by object key, so
//! `"3"` and `3` must both decode to `3`.

use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrText {
  Int(i64),
  Text(String),
}

impl IntOrText {
  fn resolve<E: de::Error>(self) -> Result<i64, E> {
    match self {
      IntOrText::Int(n) => Ok(n),
      IntOrText::Text(s) => s
        .trim()
        .parse()
        .map_err(|_| E::custom(format!("expected an integer, got {s:?}"))),
    }
  }
}

pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
  IntOrText::deserialize(d)?.resolve()
}

pub fn opt_int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
  Option::<IntOrText>::deserialize(d)?
    .map(IntOrText::resolve)
    .transpose()
}

pub fn opt_int_list<'de, D: Deserializer<'de>>(
  d: D,
) -> Result<Option<Vec<i64>>, D::Error> {
  Option::<Vec<IntOrText>>::deserialize(d)?
    .map(|items| items.into_iter().map(IntOrText::resolve).collect())
    .transpose()
}
