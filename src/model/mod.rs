//! Entity types - restaurants, customers and the reviews linking them
//!
//! Each entity mirrors one row and knows how to write itself and answer
//! relationship questions against a [`Store`](crate::Store):
//! - `Restaurant`: name and price
//! - `Customer`: first and last name
//! - `Review`: a star rating joining one restaurant and one customer

pub mod restaurant;
pub mod customer;
pub mod review;

pub use restaurant::Restaurant;
pub use customer::Customer;
pub use review::{Review, ReviewRecord};

use serde::Serialize;

/// Outcome of a `save` call.
///
/// Entities without an id are inserted and receive the generated key;
/// entities that already carry one are updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "id", rename_all = "lowercase")]
pub enum Saved {
    Created(i64),
    Updated(i64),
}

impl Saved {
    /// The id of the row that was written
    pub fn id(&self) -> i64 {
        match self {
            Saved::Created(id) | Saved::Updated(id) => *id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Saved::Created(_))
    }
}
