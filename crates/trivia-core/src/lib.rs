//! Core types and trait definitions for the trivia question bank.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod category;
pub mod error;
pub mod page;
pub mod question;
pub mod store;

pub use error::{Error, Result};
