use crate::{OutputMode, emit_success};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use restoreview::seed::{self, PriceSource, SeedData};
use restoreview::ui::{self, Icons, bullet, header, info, section, stars, success, summary_row};
use restoreview::{Customer, Error, Restaurant, Store};
use std::path::Path;

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn seed_store(database: &Path, prices: PriceSource, rng_seed: Option<u64>, reset: bool) -> anyhow::Result<(Store, seed::Seeded)> {
    let store = Store::open(database)?;
    if reset {
        store.clear_all()?;
        tracing::info!("Cleared existing rows in {}", database.display());
    }
    let seeded = seed::seed(&store, &SeedData::sample(), prices, &mut rng_for(rng_seed))?;
    Ok((store, seeded))
}

pub fn run_init(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let created = Store::at(database).initialize_schema()?;
    if output_mode.is_human() {
        if created {
            success(&format!("Created schema in {}", database.display()));
        } else {
            success(&format!("Schema already present in {}", database.display()));
        }
    } else {
        emit_success(output_mode, "init", serde_json::json!({
            "database": database.display().to_string(),
            "created": created,
        }))?;
    }
    Ok(())
}

pub fn run_seed(database: &Path, prices: PriceSource, rng_seed: Option<u64>, reset: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let (store, seeded) = seed_store(database, prices, rng_seed, reset)?;

    if output_mode.is_human() {
        header(&format!("Seeded {}", database.display()));
        println!("{}", ui::restaurant_table(&seeded.restaurants));
        println!("{}", ui::customer_table(&seeded.customers));
        summary_row("Reviews written:", &seeded.review_ids.len().to_string());
        println!("{}", ui::stats_table(&store.stats()?));
    } else {
        emit_success(output_mode, "seed", serde_json::to_value(&seeded)?)?;
    }
    Ok(())
}

pub fn run_demo(database: &Path, prices: PriceSource, rng_seed: Option<u64>, reset: bool, output_mode: OutputMode) -> anyhow::Result<()> {
    let (store, seeded) = seed_store(database, prices, rng_seed, reset)?;
    let report = seed::run_demo(&store, &seeded)?;

    if !output_mode.is_human() {
        return emit_success(output_mode, "demo", serde_json::to_value(&report)?);
    }

    header("Restaurant review demo");

    section("Review customer()");
    bullet(&report.review_customer);

    section("Review restaurant()");
    bullet(&report.review_restaurant);

    section("Review full_review()");
    bullet(&report.full_review);

    section("Restaurant reviews()");
    for review in &report.restaurant_reviews {
        bullet(&format!("{} {} stars by customer ID {}", stars(review.star_rating), review.star_rating, review.customer_id));
    }

    section("Restaurant customers()");
    for name in &report.restaurant_customers {
        bullet(name);
    }

    section("Restaurant all_reviews()");
    for line in &report.restaurant_all_reviews {
        bullet(line);
    }

    section("Customer reviews()");
    for review in &report.customer_reviews {
        bullet(&format!("Rating: {} for restaurant ID {}", review.star_rating, review.restaurant_id));
    }

    section("Customer restaurants()");
    for name in &report.customer_restaurants {
        bullet(name);
    }

    section("Customer full_name()");
    bullet(&report.customer_full_name);

    section("Customer favorite_restaurant()");
    match &report.favorite_restaurant {
        Some(restaurant) => bullet(&format!("{} {}", Icons::HEART, restaurant.name)),
        None => bullet(&ui::dim("no reviews")),
    }

    section("Customer add_review()");
    bullet(&format!("Added review {}", report.added_review_id));

    section("Customer delete_reviews()");
    bullet(&format!("Deleted {} review(s)", report.deleted_reviews));

    section("Restaurant fanciest()");
    match &report.fanciest {
        Some(restaurant) => bullet(&format!("{} {} (price {})", Icons::CROWN, restaurant.name, restaurant.price)),
        None => bullet(&ui::dim("no restaurants")),
    }

    println!();
    println!("{}", ui::stats_table(&store.stats()?));
    Ok(())
}

pub fn run_stats(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = Store::open(database)?;
    let stats = store.stats()?;

    if output_mode.is_human() {
        println!("{} Restoreview Statistics ({})", Icons::STATS, database.display());
        println!("{}", ui::stats_table(&stats));
    } else {
        emit_success(output_mode, "stats", serde_json::to_value(stats)?)?;
    }
    Ok(())
}

pub fn run_fanciest(database: &Path, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = Store::open(database)?;
    let fanciest = Restaurant::fanciest(&store)?;

    if output_mode.is_human() {
        match &fanciest {
            Some(restaurant) => {
                header("Fanciest restaurant");
                println!("{}", ui::restaurant_table(std::slice::from_ref(restaurant)));
            }
            None => ui::warn("No restaurants saved yet."),
        }
    } else {
        emit_success(output_mode, "fanciest", serde_json::to_value(&fanciest)?)?;
    }
    Ok(())
}

pub fn run_restaurant(database: &Path, id: i64, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = Store::open(database)?;
    let restaurant = Restaurant::find(&store, id)?
        .ok_or(Error::NotFound { entity: "restaurant", id })?;

    let reviews = restaurant.reviews(&store)?;
    let customers = restaurant.customers(&store)?;
    let lines = restaurant.all_reviews(&store)?;

    if output_mode.is_human() {
        header(&restaurant.name.bold().to_string());
        info("Price", &restaurant.price.to_string());

        section("Reviews");
        if reviews.is_empty() {
            bullet(&ui::dim("no reviews"));
        } else {
            println!("{}", ui::review_table(&reviews));
            for line in &lines {
                bullet(line);
            }
        }

        section("Customers");
        for customer in &customers {
            bullet(&format!("{} {}", Icons::PERSON, customer.full_name()));
        }
    } else {
        emit_success(output_mode, "restaurant", serde_json::json!({
            "restaurant": restaurant,
            "reviews": reviews,
            "customers": customers,
            "all_reviews": lines,
        }))?;
    }
    Ok(())
}

pub fn run_customer(database: &Path, id: i64, output_mode: OutputMode) -> anyhow::Result<()> {
    let store = Store::open(database)?;
    let customer = Customer::find(&store, id)?
        .ok_or(Error::NotFound { entity: "customer", id })?;

    let reviews = customer.reviews(&store)?;
    let restaurants = customer.restaurants(&store)?;
    let favorite = customer.favorite_restaurant(&store)?;

    if output_mode.is_human() {
        header(&customer.full_name().bold().to_string());

        section("Reviews");
        if reviews.is_empty() {
            bullet(&ui::dim("no reviews"));
        } else {
            println!("{}", ui::review_table(&reviews));
        }

        section("Restaurants");
        for name in &restaurants {
            bullet(name);
        }

        section("Favorite");
        match &favorite {
            Some(restaurant) => bullet(&format!("{} {} {}", Icons::HEART, restaurant.name, Icons::STAR)),
            None => bullet(&ui::dim("no reviews")),
        }
    } else {
        emit_success(output_mode, "customer", serde_json::json!({
            "full_name": customer.full_name(),
            "customer": customer,
            "reviews": reviews,
            "restaurants": restaurants,
            "favorite_restaurant": favorite,
        }))?;
    }
    Ok(())
}
