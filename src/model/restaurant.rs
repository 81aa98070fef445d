//! Restaurants and the queries scoped to one restaurant

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use crate::{Error, Result, Store};
use super::review::{review_line, ReviewRecord, REVIEW_COLUMNS};
use super::{Customer, Saved};

/// A restaurant row.
///
/// `price` doubles as the rank key for [`Restaurant::fanciest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    id: Option<i64>,
    pub name: String,
    pub price: i64,
}

impl Restaurant {
    /// Create an unsaved restaurant
    pub fn new(name: impl Into<String>, price: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
        }
    }

    /// Surrogate key, `None` until the first save
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn require_id(&self) -> Result<i64> {
        self.id.ok_or(Error::Unsaved("restaurant"))
    }

    /// Helper to convert an `(id, name, price)` row to a Restaurant
    pub(crate) fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }

    /// Insert the restaurant and take the generated id, or update the existing row
    pub fn save(&mut self, store: &Store) -> Result<Saved> {
        match self.id {
            None => {
                let id = store.with_connection(|conn| {
                    conn.execute(
                        "INSERT INTO restaurants (name, price) VALUES (?1, ?2)",
                        params![self.name, self.price],
                    )?;
                    Ok(conn.last_insert_rowid())
                })?;
                self.id = Some(id);
                tracing::debug!("Inserted restaurant {} ({})", id, self.name);
                Ok(Saved::Created(id))
            }
            Some(id) => {
                let changed = store.with_connection(|conn| {
                    Ok(conn.execute(
                        "UPDATE restaurants SET name = ?1, price = ?2 WHERE id = ?3",
                        params![self.name, self.price, id],
                    )?)
                })?;
                if changed == 0 {
                    return Err(Error::NotFound { entity: "restaurant", id });
                }
                tracing::debug!("Updated restaurant {} ({})", id, self.name);
                Ok(Saved::Updated(id))
            }
        }
    }

    /// Get a restaurant by id
    pub fn find(store: &Store, id: i64) -> Result<Option<Restaurant>> {
        store.with_connection(|conn| {
            conn.query_row(
                "SELECT id, name, price FROM restaurants WHERE id = ?1",
                [id],
                Restaurant::from_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// All restaurants ordered by id
    pub fn all(store: &Store) -> Result<Vec<Restaurant>> {
        store.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, price FROM restaurants ORDER BY id")?;
            let restaurants = stmt
                .query_map([], Restaurant::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(restaurants)
        })
    }

    /// The restaurant with the highest price, `None` if there are no restaurants.
    /// Equal prices fall back to whatever order SQLite returns.
    pub fn fanciest(store: &Store) -> Result<Option<Restaurant>> {
        store.with_connection(|conn| {
            conn.query_row(
                "SELECT id, name, price FROM restaurants ORDER BY price DESC LIMIT 1",
                [],
                Restaurant::from_row,
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Every review left for this restaurant
    pub fn reviews(&self, store: &Store) -> Result<Vec<ReviewRecord>> {
        let id = self.require_id()?;
        store.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM reviews WHERE restaurant_id = ?1",
                REVIEW_COLUMNS
            ))?;
            let reviews = stmt
                .query_map([id], ReviewRecord::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(reviews)
        })
    }

    /// Customers who reviewed this restaurant, once per review
    pub fn customers(&self, store: &Store) -> Result<Vec<Customer>> {
        let id = self.require_id()?;
        store.with_connection(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT customers.id, customers.first_name, customers.last_name
                FROM customers JOIN reviews ON customers.id = reviews.customer_id
                WHERE reviews.restaurant_id = ?1
                "#,
            )?;
            let customers = stmt
                .query_map([id], Customer::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(customers)
        })
    }

    /// One formatted line per review of this restaurant
    pub fn all_reviews(&self, store: &Store) -> Result<Vec<String>> {
        let id = self.require_id()?;
        store.with_connection(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT customers.first_name, customers.last_name, reviews.star_rating
                FROM customers JOIN reviews ON customers.id = reviews.customer_id
                WHERE reviews.restaurant_id = ?1
                "#,
            )?;
            let lines = stmt
                .query_map([id], |row| {
                    let first: String = row.get(0)?;
                    let last: String = row.get(1)?;
                    let rating: i64 = row.get(2)?;
                    Ok(review_line(&self.name, &format!("{} {}", first, last), rating))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(lines)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::test_support::temp_store;

    #[test]
    fn test_save_assigns_positive_id() {
        let (_dir, store) = temp_store();
        let mut restaurant = Restaurant::new("Kilimanjaro", 4);

        let saved = restaurant.save(&store).unwrap();
        let id = restaurant.id().unwrap();
        assert!(id > 0);
        assert_eq!(saved, Saved::Created(id));

        let stored = Restaurant::find(&store, id).unwrap().unwrap();
        assert_eq!(stored, restaurant);
    }

    #[test]
    fn test_resave_updates_in_place() {
        let (_dir, store) = temp_store();
        let mut restaurant = Restaurant::new("Serena", 2);
        let first = restaurant.save(&store).unwrap();

        restaurant.price = 5;
        let second = restaurant.save(&store).unwrap();

        assert_eq!(second, Saved::Updated(first.id()));
        assert_eq!(store.stats().unwrap().restaurants, 1);
        assert_eq!(Restaurant::find(&store, first.id()).unwrap().unwrap().price, 5);
    }

    #[test]
    fn test_save_after_row_removed_is_not_found() {
        let (_dir, store) = temp_store();
        let mut restaurant = Restaurant::new("Sarova", 1);
        restaurant.save(&store).unwrap();
        store.clear_all().unwrap();

        assert!(matches!(
            restaurant.save(&store),
            Err(Error::NotFound { entity: "restaurant", .. })
        ));
    }

    #[test]
    fn test_fanciest() {
        let (_dir, store) = temp_store();
        assert_eq!(Restaurant::fanciest(&store).unwrap(), None);

        for (name, price) in [("KFC", 1), ("Serena", 5), ("Sarova", 3), ("Ole Sereni", 5)] {
            Restaurant::new(name, price).save(&store).unwrap();
        }

        let fanciest = Restaurant::fanciest(&store).unwrap().unwrap();
        assert_eq!(fanciest.price, 5);
        assert!(fanciest.name == "Serena" || fanciest.name == "Ole Sereni");
        assert!(fanciest.id().is_some());
    }

    #[test]
    fn test_find_missing_and_all() {
        let (_dir, store) = temp_store();
        assert_eq!(Restaurant::find(&store, 42).unwrap(), None);

        Restaurant::new("KFC", 1).save(&store).unwrap();
        Restaurant::new("Serena", 2).save(&store).unwrap();

        let names: Vec<_> = Restaurant::all(&store).unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["KFC", "Serena"]);
    }

    #[test]
    fn test_reviews_and_customers() {
        let (_dir, store) = temp_store();
        let mut kfc = Restaurant::new("KFC", 2);
        kfc.save(&store).unwrap();
        let mut mary = Customer::new("Mary", "Ann");
        mary.save(&store).unwrap();
        let mut chep = Customer::new("Chep", "Kiprop");
        chep.save(&store).unwrap();

        assert!(kfc.reviews(&store).unwrap().is_empty());

        mary.add_review(&store, &kfc, 5).unwrap();
        chep.add_review(&store, &kfc, 3).unwrap();
        mary.add_review(&store, &kfc, 4).unwrap();

        let mut ratings: Vec<_> = kfc.reviews(&store).unwrap().iter().map(|r| r.star_rating).collect();
        ratings.sort();
        assert_eq!(ratings, vec![3, 4, 5]);

        let mut names: Vec<_> = kfc.customers(&store).unwrap().iter().map(Customer::full_name).collect();
        names.sort();
        assert_eq!(names, vec!["Chep Kiprop", "Mary Ann", "Mary Ann"]);
    }

    #[test]
    fn test_all_reviews_single() {
        let (_dir, store) = temp_store();
        let mut kilimanjaro = Restaurant::new("Kilimanjaro", 4);
        kilimanjaro.save(&store).unwrap();
        let mut mary = Customer::new("Mary", "Ann");
        mary.save(&store).unwrap();

        crate::Review::new(&kilimanjaro, &mary, 4).save(&store).unwrap();

        assert_eq!(
            kilimanjaro.all_reviews(&store).unwrap(),
            vec!["Review for Kilimanjaro by Mary Ann: 4 stars.".to_string()]
        );
    }

    #[test]
    fn test_queries_on_unsaved_restaurant() {
        let (_dir, store) = temp_store();
        let restaurant = Restaurant::new("Nowhere", 1);

        assert!(matches!(restaurant.reviews(&store), Err(Error::Unsaved("restaurant"))));
        assert!(matches!(restaurant.all_reviews(&store), Err(Error::Unsaved(_))));
    }
}
