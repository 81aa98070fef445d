//! SQLite storage handle

use std::path::{Path, PathBuf};
use rusqlite::{Connection, Transaction};
use crate::Result;
use super::schema;

/// Caller-owned handle to the review database.
///
/// Holds only the database path. Each logical operation acquires its own
/// connection through [`Store::with_connection`] or [`Store::transaction`]
/// and releases it before returning.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open a database file (creates it and the schema if missing)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = Self::at(path);
        store.initialize_schema()?;
        Ok(store)
    }

    /// A handle for `path` that has not touched the file yet
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the schema if it is not there yet. Returns `true` if tables were created.
    pub fn initialize_schema(&self) -> Result<bool> {
        let mut conn = self.connect()?;
        schema::initialize(&mut conn)
    }

    /// Open a fresh connection with foreign key enforcement switched on
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        tracing::trace!("Opened connection to {}", self.path.display());
        Ok(conn)
    }

    /// Run `f` against a connection scoped to this call
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Run `f` inside a transaction, committing only if it succeeds
    pub fn transaction<T>(&self, f: impl FnOnce(&Transaction<'_>) -> Result<T>) -> Result<T> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Delete all rows, reviews first so foreign keys stay satisfied
    pub fn clear_all(&self) -> Result<()> {
        self.transaction(|tx| {
            tx.execute("DELETE FROM reviews", [])?;
            tx.execute("DELETE FROM customers", [])?;
            tx.execute("DELETE FROM restaurants", [])?;
            Ok(())
        })
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        self.with_connection(|conn| {
            Ok(DbStats {
                restaurants: count_rows(conn, "restaurants")?,
                customers: count_rows(conn, "customers")?,
                reviews: count_rows(conn, "reviews")?,
            })
        })
    }
}

fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
    Ok(count as usize)
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub restaurants: usize,
    pub customers: usize,
    pub reviews: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Restaurants: {}", self.restaurants)?;
        writeln!(f, "  Customers: {}", self.customers)?;
        writeln!(f, "  Reviews: {}", self.reviews)
    }
}
