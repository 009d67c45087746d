//! Database layer
//!
//! SQLite-backed persistence for Bluelog. Provides pool creation, embedded
//! code-based migrations, and trait-based repositories for each entity.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
