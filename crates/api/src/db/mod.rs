//! Database layer.
//!
//! # Tables
//!
//! - `users` - registered accounts (email unique, password hash)
//! - `caps` - product catalog
//! - `orders` / `order_items` - placed orders with price snapshots
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and are embedded via
//! [`MIGRATOR`]. Run them with:
//! ```bash
//! cargo run -p caps-store-cli -- migrate
//! ```
//!
//! All queries use runtime binding with `FromRow` row structs that are
//! converted into the domain types in `crate::models`.

pub mod caps;
pub mod orders;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use caps::CapRepository;
pub use orders::{
    OrderRepository, insert_order, insert_order_item, line_snapshot, stock_available,
    try_decrement_stock,
};
pub use users::UserRepository;

/// Embedded migrations from `crates/api/migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created if missing. Foreign keys are enforced and
/// a busy timeout is set so concurrent writers queue instead of failing
/// immediately.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection fails.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Parse a decimal column stored as TEXT.
///
/// `SQLite` has no native decimal type; money columns are decimal strings.
pub(crate) fn parse_decimal(raw: &str, column: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(raw).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid decimal in {column}: {e}"))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_valid() {
        let d = parse_decimal("45.99", "caps.price").unwrap();
        assert_eq!(d.to_string(), "45.99");
    }

    #[test]
    fn test_parse_decimal_invalid() {
        let err = parse_decimal("not-a-number", "caps.price").unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
