//! Database schema definitions

use rusqlite::Connection;
use crate::Result;

/// SQL to create the restaurants table
pub const CREATE_RESTAURANTS_TABLE: &str = r#"
CREATE TABLE restaurants (
    id INTEGER PRIMARY KEY,
    name TEXT,
    price INTEGER
)
"#;

/// SQL to create the customers table
pub const CREATE_CUSTOMERS_TABLE: &str = r#"
CREATE TABLE customers (
    id INTEGER PRIMARY KEY,
    first_name TEXT,
    last_name TEXT
)
"#;

/// SQL to create the reviews table
/// Both references are declared foreign keys; enforcement is switched on per connection.
pub const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE reviews (
    id INTEGER PRIMARY KEY,
    restaurant_id INTEGER,
    customer_id INTEGER,
    star_rating INTEGER,
    FOREIGN KEY(restaurant_id) REFERENCES restaurants(id),
    FOREIGN KEY(customer_id) REFERENCES customers(id)
)
"#;

/// All schema creation statements, in dependency order
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_RESTAURANTS_TABLE,
        CREATE_CUSTOMERS_TABLE,
        CREATE_REVIEWS_TABLE,
    ]
}

/// Check whether a table exists in the connected database
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT count(name) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Create the schema unless `restaurants` already exists.
///
/// All three tables are created in a single transaction. Returns `true` when the
/// tables were created and `false` when the schema was already present.
pub fn initialize(conn: &mut Connection) -> Result<bool> {
    if table_exists(conn, "restaurants")? {
        return Ok(false);
    }

    let tx = conn.transaction()?;
    for stmt in all_schema_statements() {
        tx.execute(stmt, [])?;
    }
    tx.commit()?;

    tracing::info!("Created restaurants, customers and reviews tables");
    Ok(true)
}
