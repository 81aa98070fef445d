//! Sample data and the demo driver
//!
//! `seed` writes a fixture of restaurants, customers and reviews;
//! `run_demo` then calls every entity operation once and collects the results.

use rand::Rng;
use serde::Serialize;
use crate::{Customer, Error, Restaurant, Result, Review, ReviewRecord, Store};

/// Where seeded restaurants get their price from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// Every restaurant gets the same price
    Fixed(i64),
    /// Uniform in `1..=5`
    Random,
}

impl PriceSource {
    fn next_price(&self, rng: &mut impl Rng) -> i64 {
        match self {
            PriceSource::Fixed(price) => *price,
            PriceSource::Random => rng.gen_range(1..=5),
        }
    }
}

/// A review link between fixture entries, by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReview {
    pub restaurant: usize,
    pub customer: usize,
    pub star_rating: i64,
}

/// Fixture rows to write into a store
#[derive(Debug, Clone)]
pub struct SeedData {
    pub restaurants: Vec<String>,
    pub customers: Vec<(String, String)>,
    pub reviews: Vec<SeedReview>,
}

impl SeedData {
    /// The stock fixture: six restaurants, five customers, eight reviews
    pub fn sample() -> Self {
        let restaurants = ["Kilimanjaro", "KFC", "Serena", "Ole Sereni", "Sarova", "Serena"];
        let customers = [
            ("Mary", "Ann"),
            ("Joyce", "Wambui"),
            ("Terry", "Maina"),
            ("Joy", "Njeri"),
            ("Chep", "Kiprop"),
        ];
        let reviews = [
            (0, 0, 4),
            (1, 0, 5),
            (0, 1, 3),
            (2, 2, 4),
            (3, 3, 5),
            (4, 3, 3),
            (5, 4, 4),
            (1, 4, 5),
        ];

        Self {
            restaurants: restaurants.iter().map(|s| s.to_string()).collect(),
            customers: customers
                .iter()
                .map(|(first, last)| (first.to_string(), last.to_string()))
                .collect(),
            reviews: reviews
                .iter()
                .map(|&(restaurant, customer, star_rating)| SeedReview { restaurant, customer, star_rating })
                .collect(),
        }
    }
}

/// Entities written by [`seed`], all carrying their ids
#[derive(Debug, Clone, Serialize)]
pub struct Seeded {
    pub restaurants: Vec<Restaurant>,
    pub customers: Vec<Customer>,
    pub review_ids: Vec<i64>,
}

/// Save every restaurant, customer and review of `data`, in that order
pub fn seed(store: &Store, data: &SeedData, prices: PriceSource, rng: &mut impl Rng) -> Result<Seeded> {
    let mut restaurants = Vec::with_capacity(data.restaurants.len());
    for name in &data.restaurants {
        let mut restaurant = Restaurant::new(name.as_str(), prices.next_price(rng));
        restaurant.save(store)?;
        restaurants.push(restaurant);
    }

    let mut customers = Vec::with_capacity(data.customers.len());
    for (first, last) in &data.customers {
        let mut customer = Customer::new(first.as_str(), last.as_str());
        customer.save(store)?;
        customers.push(customer);
    }

    let mut review_ids = Vec::with_capacity(data.reviews.len());
    for link in &data.reviews {
        let restaurant = restaurants.get(link.restaurant).ok_or_else(|| {
            Error::Seed(format!("review refers to restaurant #{}", link.restaurant))
        })?;
        let customer = customers.get(link.customer).ok_or_else(|| {
            Error::Seed(format!("review refers to customer #{}", link.customer))
        })?;
        let saved = Review::new(restaurant, customer, link.star_rating).save(store)?;
        review_ids.push(saved.id());
    }

    tracing::info!(
        "Seeded {} restaurants, {} customers, {} reviews",
        restaurants.len(),
        customers.len(),
        review_ids.len()
    );

    Ok(Seeded { restaurants, customers, review_ids })
}

/// Results of one pass over every entity operation
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub review_customer: String,
    pub review_restaurant: String,
    pub full_review: String,
    pub restaurant_reviews: Vec<ReviewRecord>,
    pub restaurant_customers: Vec<String>,
    pub restaurant_all_reviews: Vec<String>,
    pub customer_reviews: Vec<ReviewRecord>,
    pub customer_restaurants: Vec<String>,
    pub customer_full_name: String,
    pub favorite_restaurant: Option<Restaurant>,
    pub added_review_id: i64,
    pub deleted_reviews: usize,
    pub fanciest: Option<Restaurant>,
}

/// Exercise every entity operation against a seeded store.
///
/// Works on the first customer and the first and third restaurants: adds a
/// five star review of the third restaurant, then deletes the customer's reviews
/// of the first one.
pub fn run_demo(store: &Store, seeded: &Seeded) -> Result<DemoReport> {
    let customer = seeded
        .customers
        .first()
        .ok_or_else(|| Error::Seed("demo needs at least one customer".into()))?;
    let (first, third) = match seeded.restaurants.as_slice() {
        [first, _, third, ..] => (first, third),
        _ => return Err(Error::Seed("demo needs at least three restaurants".into())),
    };

    // In memory only; never saved.
    let review = Review::new(first, customer, 4);

    let report = DemoReport {
        review_customer: review.customer().full_name(),
        review_restaurant: review.restaurant().name.clone(),
        full_review: review.full_review(),
        restaurant_reviews: first.reviews(store)?,
        restaurant_customers: first.customers(store)?.iter().map(Customer::full_name).collect(),
        restaurant_all_reviews: first.all_reviews(store)?,
        customer_reviews: customer.reviews(store)?,
        customer_restaurants: customer.restaurants(store)?,
        customer_full_name: customer.full_name(),
        favorite_restaurant: customer.favorite_restaurant(store)?,
        added_review_id: customer.add_review(store, third, 5)?,
        deleted_reviews: customer.delete_reviews(store, first)?,
        fanciest: Restaurant::fanciest(store)?,
    };

    tracing::debug!("Demo finished: {} review(s) deleted", report.deleted_reviews);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::test_support::temp_store;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_seed_sample_fixed_prices() {
        let (_dir, store) = temp_store();
        let mut rng = StdRng::seed_from_u64(42);

        let seeded = seed(&store, &SeedData::sample(), PriceSource::Fixed(3), &mut rng).unwrap();

        assert_eq!(seeded.restaurants.len(), 6);
        assert_eq!(seeded.customers.len(), 5);
        assert_eq!(seeded.review_ids.len(), 8);
        assert!(seeded.restaurants.iter().all(|r| r.price == 3 && r.id().is_some()));

        let stats = store.stats().unwrap();
        assert_eq!((stats.restaurants, stats.customers, stats.reviews), (6, 5, 8));
    }

    #[test]
    fn test_seed_random_prices_in_range() {
        let (_dir, store) = temp_store();
        let mut rng = StdRng::seed_from_u64(7);

        let seeded = seed(&store, &SeedData::sample(), PriceSource::Random, &mut rng).unwrap();

        assert!(seeded.restaurants.iter().all(|r| (1..=5).contains(&r.price)));
        let max = seeded.restaurants.iter().map(|r| r.price).max().unwrap();
        assert_eq!(Restaurant::fanciest(&store).unwrap().unwrap().price, max);
    }

    #[test]
    fn test_seed_rejects_dangling_link() {
        let (_dir, store) = temp_store();
        let mut data = SeedData::sample();
        data.reviews.push(SeedReview { restaurant: 99, customer: 0, star_rating: 1 });

        let result = seed(&store, &data, PriceSource::Fixed(1), &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(Error::Seed(_))));
    }

    #[test]
    fn test_demo_report() {
        let (_dir, store) = temp_store();
        let mut rng = StdRng::seed_from_u64(42);
        let seeded = seed(&store, &SeedData::sample(), PriceSource::Fixed(2), &mut rng).unwrap();

        let report = run_demo(&store, &seeded).unwrap();

        assert_eq!(report.review_customer, "Mary Ann");
        assert_eq!(report.review_restaurant, "Kilimanjaro");
        assert_eq!(report.full_review, "Review for Kilimanjaro by Mary Ann: 4 stars.");
        assert_eq!(report.customer_full_name, "Mary Ann");

        let mut ratings: Vec<_> = report.restaurant_reviews.iter().map(|r| r.star_rating).collect();
        ratings.sort();
        assert_eq!(ratings, vec![3, 4]);

        let mut customers = report.restaurant_customers.clone();
        customers.sort();
        assert_eq!(customers, vec!["Joyce Wambui", "Mary Ann"]);

        let mut lines = report.restaurant_all_reviews.clone();
        lines.sort();
        assert_eq!(lines, vec![
            "Review for Kilimanjaro by Joyce Wambui: 3 stars.",
            "Review for Kilimanjaro by Mary Ann: 4 stars.",
        ]);

        assert_eq!(report.customer_reviews.len(), 2);
        let mut visited = report.customer_restaurants.clone();
        visited.sort();
        assert_eq!(visited, vec!["KFC", "Kilimanjaro"]);

        assert_eq!(report.favorite_restaurant.as_ref().map(|r| r.name.as_str()), Some("KFC"));
        assert_eq!(report.deleted_reviews, 1);
        assert_eq!(report.fanciest.as_ref().map(|r| r.price), Some(2));

        let mary = &seeded.customers[0];
        let mut after: Vec<_> = mary.restaurants(&store).unwrap();
        after.sort();
        assert_eq!(after, vec!["KFC", "Serena"]);
        assert!(seeded.restaurants[0]
            .reviews(&store)
            .unwrap()
            .iter()
            .all(|r| r.customer_id != mary.id().unwrap()));
    }

    #[test]
    fn test_demo_needs_three_restaurants() {
        let (_dir, store) = temp_store();
        let data = SeedData {
            restaurants: vec!["KFC".into()],
            customers: vec![("Mary".into(), "Ann".into())],
            reviews: Vec::new(),
        };
        let seeded = seed(&store, &data, PriceSource::Fixed(1), &mut StdRng::seed_from_u64(1)).unwrap();

        assert!(matches!(run_demo(&store, &seeded), Err(Error::Seed(_))));
    }
}
