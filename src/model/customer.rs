//! Customers and the queries scoped to one customer

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use crate::{Error, Result, Store};
use super::review::{ReviewRecord, REVIEW_COLUMNS};
use super::{Restaurant, Review, Saved};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
}

impl Customer {
    /// Create an unsaved customer
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn require_id(&self) -> Result<i64> {
        self.id.ok_or(Error::Unsaved("customer"))
    }

    /// Helper to convert an `(id, first_name, last_name)` row to a Customer
    pub(crate) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            first_name: row.get(1)?,
            last_name: row.get(2)?,
        })
    }

    /// First and last name joined by a single space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Insert the customer and take the generated id, or update the existing row
    pub fn save(&mut self, store: &Store) -> Result<Saved> {
        match self.id {
            None => {
                let id = store.with_connection(|conn| {
                    conn.execute(
                        "INSERT INTO customers (first_name, last_name) VALUES (?1, ?2)",
                        params![self.first_name, self.last_name],
                    )?;
                    Ok(conn.last_insert_rowid())
                })?;
                self.id = Some(id);
                tracing::debug!("Inserted customer {} ({})", id, self.full_name());
                Ok(Saved::Created(id))
            }
            Some(id) => {
                let changed = store.with_connection(|conn| {
                    Ok(conn.execute(
                        "UPDATE customers SET first_name = ?1, last_name = ?2 WHERE id = ?3",
                        params![self.first_name, self.last_name, id],
                    )?)
                })?;
                if changed == 0 {
                    return Err(Error::NotFound { entity: "customer", id });
                }
                tracing::debug!("Updated customer {} ({})", id, self.full_name());
                Ok(Saved::Updated(id))
            }
        }
    }

    /// Get a customer by id
    pub fn find(store: &Store, id: i64) -> Result<Option<Customer>> {
        store.with_connection(|conn| {
            conn.query_row(
                "SELECT id, first_name, last_name FROM customers WHERE id = ?1",
                [id],
                Customer::from_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// All customers ordered by id
    pub fn all(store: &Store) -> Result<Vec<Customer>> {
        store.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT id, first_name, last_name FROM customers ORDER BY id")?;
            let customers = stmt
                .query_map([], Customer::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(customers)
        })
    }

    /// Every review this customer has left
    pub fn reviews(&self, store: &Store) -> Result<Vec<ReviewRecord>> {
        let id = self.require_id()?;
        store.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM reviews WHERE customer_id = ?1",
                REVIEW_COLUMNS
            ))?;
            let reviews = stmt
                .query_map([id], ReviewRecord::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(reviews)
        })
    }

    /// Names of the restaurants this customer reviewed, once per review
    pub fn restaurants(&self, store: &Store) -> Result<Vec<String>> {
        let id = self.require_id()?;
        store.with_connection(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT restaurants.name
                FROM restaurants JOIN reviews ON restaurants.id = reviews.restaurant_id
                WHERE reviews.customer_id = ?1
                "#,
            )?;
            let names = stmt
                .query_map([id], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(names)
        })
    }

    /// The restaurant behind this customer's highest rated review.
    ///
    /// Returns a freshly read restaurant, or `None` if the customer has no reviews.
    /// Equal ratings fall back to whatever order SQLite returns.
    pub fn favorite_restaurant(&self, store: &Store) -> Result<Option<Restaurant>> {
        let id = self.require_id()?;
        store.with_connection(|conn| {
            conn.query_row(
                r#"
                SELECT restaurants.id, restaurants.name, restaurants.price
                FROM reviews JOIN restaurants ON restaurants.id = reviews.restaurant_id
                WHERE reviews.customer_id = ?1
                ORDER BY reviews.star_rating DESC
                LIMIT 1
                "#,
                [id],
                Restaurant::from_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Record a review of `restaurant` by this customer, returning the new review id
    pub fn add_review(&self, store: &Store, restaurant: &Restaurant, star_rating: i64) -> Result<i64> {
        let saved = Review::new(restaurant, self, star_rating).save(store)?;
        Ok(saved.id())
    }

    /// Delete every review this customer left for `restaurant`, returning how many went
    pub fn delete_reviews(&self, store: &Store, restaurant: &Restaurant) -> Result<usize> {
        let customer_id = self.require_id()?;
        let restaurant_id = restaurant.require_id()?;
        let deleted = store.with_connection(|conn| {
            Ok(conn.execute(
                "DELETE FROM reviews WHERE restaurant_id = ?1 AND customer_id = ?2",
                params![restaurant_id, customer_id],
            )?)
        })?;
        tracing::debug!("Deleted {} review(s) by customer {} for restaurant {}",
            deleted, customer_id, restaurant_id);
        Ok(deleted)
    }
}
