use tabled::{settings::Style, Table, Tabled};
use crate::{Customer, DbStats, Restaurant, ReviewRecord};
use crate::ui::output::star_bar;

#[derive(Tabled)]
struct RestaurantRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Restaurant")]
    name: String,
    #[tabled(rename = "Price")]
    price: i64,
}

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Customer")]
    name: String,
}

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "Review")]
    id: i64,
    #[tabled(rename = "Restaurant")]
    restaurant_id: i64,
    #[tabled(rename = "Customer")]
    customer_id: i64,
    #[tabled(rename = "Rating")]
    rating: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: usize,
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn restaurant_table(restaurants: &[Restaurant]) -> String {
    render(
        restaurants
            .iter()
            .map(|r| RestaurantRow { id: id_cell(r.id()), name: r.name.clone(), price: r.price })
            .collect(),
    )
}

pub fn customer_table(customers: &[Customer]) -> String {
    render(
        customers
            .iter()
            .map(|c| CustomerRow { id: id_cell(c.id()), name: c.full_name() })
            .collect(),
    )
}

pub fn review_table(reviews: &[ReviewRecord]) -> String {
    render(
        reviews
            .iter()
            .map(|r| ReviewRow {
                id: r.id,
                restaurant_id: r.restaurant_id,
                customer_id: r.customer_id,
                rating: format!("{} ({})", star_bar(r.star_rating), r.star_rating),
            })
            .collect(),
    )
}

pub fn stats_table(stats: &DbStats) -> String {
    render(vec![
        StatRow { table: "restaurants".into(), rows: stats.restaurants },
        StatRow { table: "customers".into(), rows: stats.customers },
        StatRow { table: "reviews".into(), rows: stats.reviews },
    ])
}
