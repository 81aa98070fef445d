//! Reviews - star ratings linking a restaurant and a customer

use rusqlite::params;
use serde::Serialize;
use crate::{Error, Result, Store};
use super::{Customer, Restaurant, Saved};

/// Columns selected whenever a review row is read back as a [`ReviewRecord`]
pub(crate) const REVIEW_COLUMNS: &str = "reviews.id, reviews.restaurant_id, reviews.customer_id, reviews.star_rating";

/// Format the one-line summary shared by `Review::full_review` and `Restaurant::all_reviews`
pub(crate) fn review_line(restaurant_name: &str, customer_name: &str, star_rating: i64) -> String {
    format!("Review for {} by {}: {} stars.", restaurant_name, customer_name, star_rating)
}

/// A review row as stored, with references held as ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    pub id: i64,
    pub restaurant_id: i64,
    pub customer_id: i64,
    pub star_rating: i64,
}

impl ReviewRecord {
    /// Build a record from a row selected with [`REVIEW_COLUMNS`]
    pub(crate) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            restaurant_id: row.get(1)?,
            customer_id: row.get(2)?,
            star_rating: row.get(3)?,
        })
    }
}

/// An in-memory review of `restaurant` by `customer`.
///
/// Both referenced entities must be saved before the review itself can be.
#[derive(Debug, Clone, Serialize)]
pub struct Review<'a> {
    id: Option<i64>,
    restaurant: &'a Restaurant,
    customer: &'a Customer,
    pub star_rating: i64,
}

impl<'a> Review<'a> {
    pub fn new(restaurant: &'a Restaurant, customer: &'a Customer, star_rating: i64) -> Self {
        Self {
            id: None,
            restaurant,
            customer,
            star_rating,
        }
    }

    /// Surrogate key, `None` until the first save
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn customer(&self) -> &'a Customer {
        self.customer
    }

    pub fn restaurant(&self) -> &'a Restaurant {
        self.restaurant
    }

    /// Insert the review, or update it if it already has an id.
    /// Uses the current ids of the referenced restaurant and customer.
    pub fn save(&mut self, store: &Store) -> Result<Saved> {
        let restaurant_id = self.restaurant.require_id()?;
        let customer_id = self.customer.require_id()?;
        let star_rating = self.star_rating;

        match self.id {
            None => {
                let id = store.with_connection(|conn| {
                    conn.execute(
                        "INSERT INTO reviews (restaurant_id, customer_id, star_rating) VALUES (?1, ?2, ?3)",
                        params![restaurant_id, customer_id, star_rating],
                    )?;
                    Ok(conn.last_insert_rowid())
                })?;
                self.id = Some(id);
                tracing::debug!("Inserted review {} ({} stars, restaurant {}, customer {})",
                    id, star_rating, restaurant_id, customer_id);
                Ok(Saved::Created(id))
            }
            Some(id) => {
                let changed = store.with_connection(|conn| {
                    Ok(conn.execute(
                        "UPDATE reviews SET restaurant_id = ?1, customer_id = ?2, star_rating = ?3 WHERE id = ?4",
                        params![restaurant_id, customer_id, star_rating, id],
                    )?)
                })?;
                if changed == 0 {
                    return Err(Error::NotFound { entity: "review", id });
                }
                tracing::debug!("Updated review {}", id);
                Ok(Saved::Updated(id))
            }
        }
    }

    /// e.g. `Review for Kilimanjaro by Mary Ann: 4 stars.`
    pub fn full_review(&self) -> String {
        review_line(&self.restaurant.name, &self.customer.full_name(), self.star_rating)
    }
}

impl std::fmt::Display for Review<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_review())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::test_support::temp_store;

    fn saved_pair(store: &Store) -> (Restaurant, Customer) {
        let mut restaurant = Restaurant::new("Kilimanjaro", 4);
        restaurant.save(store).unwrap();
        let mut customer = Customer::new("Mary", "Ann");
        customer.save(store).unwrap();
        (restaurant, customer)
    }

    #[test]
    fn test_accessors_return_held_references() {
        let restaurant = Restaurant::new("Kilimanjaro", 4);
        let customer = Customer::new("Mary", "Ann");
        let review = Review::new(&restaurant, &customer, 4);

        assert!(std::ptr::eq(review.restaurant(), &restaurant));
        assert!(std::ptr::eq(review.customer(), &customer));
        assert_eq!(review.customer().full_name(), "Mary Ann");
        assert_eq!(review.restaurant().name, "Kilimanjaro");
        assert_eq!(review.id(), None);
    }

    #[test]
    fn test_full_review() {
        let restaurant = Restaurant::new("Kilimanjaro", 4);
        let customer = Customer::new("Mary", "Ann");
        let review = Review::new(&restaurant, &customer, 4);

        assert_eq!(review.full_review(), "Review for Kilimanjaro by Mary Ann: 4 stars.");
        assert_eq!(review.to_string(), review.full_review());
    }

    #[test]
    fn test_save_assigns_id_and_links_rows() {
        let (_dir, store) = temp_store();
        let (restaurant, customer) = saved_pair(&store);

        let mut review = Review::new(&restaurant, &customer, 4);
        let saved = review.save(&store).unwrap();
        assert!(saved.is_created());
        assert_eq!(review.id(), Some(saved.id()));

        let records = restaurant.reviews(&store).unwrap();
        assert_eq!(records, vec![ReviewRecord {
            id: saved.id(),
            restaurant_id: restaurant.id().unwrap(),
            customer_id: customer.id().unwrap(),
            star_rating: 4,
        }]);
    }

    #[test]
    fn test_resave_updates_rating() {
        let (_dir, store) = temp_store();
        let (restaurant, customer) = saved_pair(&store);

        let mut review = Review::new(&restaurant, &customer, 2);
        let first = review.save(&store).unwrap();
        review.star_rating = 5;
        let second = review.save(&store).unwrap();

        assert_eq!(second, Saved::Updated(first.id()));
        let records = customer.reviews(&store).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].star_rating, 5);
    }

    #[test]
    fn test_save_requires_saved_references() {
        let (_dir, store) = temp_store();
        let restaurant = Restaurant::new("Sarova", 3);
        let mut customer = Customer::new("Joy", "Njeri");
        customer.save(&store).unwrap();

        let mut review = Review::new(&restaurant, &customer, 3);
        assert!(matches!(review.save(&store), Err(Error::Unsaved("restaurant"))));
        assert_eq!(store.stats().unwrap().reviews, 0);
    }

    #[test]
    fn test_save_with_stale_reference_is_constraint_error() {
        let (_dir, store) = temp_store();
        let (restaurant, customer) = saved_pair(&store);
        store.clear_all().unwrap();

        let mut review = Review::new(&restaurant, &customer, 4);
        assert!(matches!(review.save(&store), Err(Error::Storage(_))));
    }
}
