//! Database operations for the Catwatch application database.
//!
//! ## Tables
//!
//! - `users` - Application accounts (role, email, password, name)
//! - `issues` - Support issues (status, label, email, question)
//! - `coupons` - Coupons mirrored from Stripe
//!
//! The seeder only replaces rows. The schema is owned by the Catwatch
//! application and is never created or migrated from here.

mod repository;
mod rows;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use repository::SeedRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A typed, nullable column value.
///
/// Nulls keep their column type so they bind correctly in a multi-row insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Text(Option<String>),
    Int(Option<i32>),
    Timestamp(Option<DateTime<Utc>>),
}

impl ColumnValue {
    /// Returns true for a typed null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(
            self,
            Self::Text(None) | Self::Int(None) | Self::Timestamp(None)
        )
    }

    /// The text value, if this is a non-null text column.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => value.as_deref(),
            _ => None,
        }
    }

    /// The integer value, if this is a non-null integer column.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => *value,
            _ => None,
        }
    }
}

/// A record that can be bulk inserted into one table.
///
/// Every row of a batch writes the same column list, in `COLUMNS` order.
pub trait SeedRow {
    /// Target table.
    const TABLE: &'static str;
    /// Human-readable label for status output (e.g., "users").
    const LABEL: &'static str;
    /// Columns written by the seeder; all others keep their defaults.
    const COLUMNS: &'static [&'static str];

    /// Column values in `COLUMNS` order.
    fn values(&self) -> Vec<ColumnValue>;
}

/// Destination for reseeded rows.
pub trait SeedStore {
    /// Replace every row of `T::TABLE` with `rows` and return the
    /// resulting row count.
    ///
    /// Existing rows are discarded even when `rows` is empty.
    fn replace_all<T>(
        &self,
        rows: &[T],
    ) -> impl Future<Output = Result<i64, RepositoryError>> + Send
    where
        T: SeedRow + Sync;
}

/// Create a `PostgreSQL` connection pool.
///
/// The seeder runs one statement at a time, so the pool stays small.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
