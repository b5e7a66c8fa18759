//! Integration tests for the Catwatch seed tools.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory and mocked Stripe tests
//! cargo test -p catwatch-integration-tests
//!
//! # Postgres tests (need DATABASE_URL pointing at a server sqlx can create
//! # throwaway databases on)
//! cargo test -p catwatch-integration-tests -- --ignored
//! ```
//!
//! # Test Doubles
//!
//! - [`MemoryStore`] - `SeedStore` over a map of tables
//! - [`FakeProvider`] - `CouponProvider` that records requests and can fail

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use catwatch_seed::db::{ColumnValue, RepositoryError, SeedRow, SeedStore};
use catwatch_seed::stripe::{CouponProvider, CreateCouponParams, StripeCoupon, StripeError};

/// Tables the seeder writes, as created by the Catwatch application.
pub const SCHEMA: &str = r"
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    created_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    role TEXT NOT NULL DEFAULT 'member',
    active BOOLEAN NOT NULL DEFAULT TRUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL DEFAULT '',
    name TEXT,
    sign_in_count INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE issues (
    id SERIAL PRIMARY KEY,
    created_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    status TEXT NOT NULL DEFAULT 'unread',
    label TEXT NOT NULL DEFAULT 'login',
    email TEXT NOT NULL,
    question TEXT NOT NULL
);

CREATE TABLE coupons (
    id SERIAL PRIMARY KEY,
    created_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_on TIMESTAMPTZ NOT NULL DEFAULT now(),
    code TEXT NOT NULL UNIQUE,
    duration TEXT NOT NULL DEFAULT 'forever',
    amount_off INTEGER,
    percent_off INTEGER,
    currency TEXT,
    duration_in_months INTEGER,
    max_redemptions INTEGER,
    redeem_by TIMESTAMPTZ,
    times_redeemed INTEGER NOT NULL DEFAULT 0,
    valid BOOLEAN NOT NULL DEFAULT TRUE
);
";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory `SeedStore`. Each table is a list of rows in insert order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Vec<ColumnValue>>>>,
    fail: bool,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every replace fails with a database error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Rows currently held for `table`.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Vec<ColumnValue>> {
        lock(&self.tables).get(table).cloned().unwrap_or_default()
    }

    /// Number of rows held for `table`.
    #[must_use]
    pub fn count(&self, table: &str) -> usize {
        lock(&self.tables).get(table).map_or(0, Vec::len)
    }

    /// Values of one column of `T::TABLE`, in insert order.
    #[must_use]
    pub fn column<T: SeedRow>(&self, column: &str) -> Vec<ColumnValue> {
        let Some(index) = T::COLUMNS.iter().position(|c| *c == column) else {
            return Vec::new();
        };
        self.rows(T::TABLE)
            .into_iter()
            .filter_map(|row| row.get(index).cloned())
            .collect()
    }
}

impl SeedStore for MemoryStore {
    async fn replace_all<T>(&self, rows: &[T]) -> Result<i64, RepositoryError>
    where
        T: SeedRow + Sync,
    {
        if self.fail {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }

        let mut tables = lock(&self.tables);
        let table = tables.entry(T::TABLE).or_default();
        table.clear();
        table.extend(rows.iter().map(SeedRow::values));
        Ok(i64::try_from(table.len()).unwrap_or(i64::MAX))
    }
}

/// `CouponProvider` double.
///
/// Echoes each request back as the created coupon, optionally renaming it,
/// and fails every call once `fail_after` calls have succeeded.
#[derive(Debug, Default)]
pub struct FakeProvider {
    created: Mutex<Vec<CreateCouponParams>>,
    fail_after: Option<usize>,
    id_prefix: Option<String>,
}

impl FakeProvider {
    /// A provider that accepts every coupon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that cannot be reached at all.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::failing_after(0)
    }

    /// A provider that accepts `successes` coupons, then fails.
    #[must_use]
    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_after: Some(successes),
            ..Self::default()
        }
    }

    /// A provider that assigns its own ids (`{prefix}{requested id}`).
    #[must_use]
    pub fn renaming(prefix: &str) -> Self {
        Self {
            id_prefix: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    /// Every accepted request, in call order.
    #[must_use]
    pub fn created(&self) -> Vec<CreateCouponParams> {
        lock(&self.created).clone()
    }
}

impl CouponProvider for FakeProvider {
    async fn create_coupon(&self, params: &CreateCouponParams) -> Result<StripeCoupon, StripeError> {
        let mut created = lock(&self.created);
        if self.fail_after.is_some_and(|limit| created.len() >= limit) {
            return Err(StripeError::Request("connection refused".to_string()));
        }
        created.push(params.clone());

        let id = match &self.id_prefix {
            Some(prefix) => format!("{prefix}{}", params.id),
            None => params.id.clone(),
        };

        Ok(StripeCoupon {
            id: Some(id),
            duration: Some(params.duration.to_string()),
            percent_off: params.percent_off.map(f64::from),
            amount_off: params.amount_off.map(i64::from),
            currency: params.currency.map(|c| c.to_string()),
            redeem_by: params.redeem_by,
            max_redemptions: params.max_redemptions.map(i64::from),
            duration_in_months: params.duration_in_months.map(i64::from),
            livemode: false,
        })
    }
}
