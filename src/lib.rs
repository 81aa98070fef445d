//! # Restoreview - Restaurant Review Store
//!
//! A small relational data-access layer over SQLite.
//!
//! Restoreview provides:
//! - A fixed three-table schema (restaurants, customers, reviews) with foreign keys
//! - Entity types that persist themselves and answer relationship queries
//! - A caller-owned `Store` handle that scopes one connection per logical operation
//! - A sample-data seeder and a demo driver exercising every entity operation

pub mod storage;
pub mod model;
pub mod seed;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use storage::{Store, DbStats};
pub use model::{Customer, Restaurant, Review, ReviewRecord, Saved};

/// Result type alias for Restoreview operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Restoreview operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} has not been saved yet")]
    Unsaved(&'static str),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Seed error: {0}")]
    Seed(String),
}
