//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - restaurants(id, name, price)
//! - customers(id, first_name, last_name)
//! - reviews(id, restaurant_id, customer_id, star_rating)

pub mod schema;
pub mod sqlite;

pub use sqlite::{Store, DbStats};
