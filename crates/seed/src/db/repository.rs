//! Bulk replace repository.
//!
//! Replacing a table is three separate autocommitted statements: delete every
//! row, insert the batch with one multi-row `INSERT`, count. There is no
//! surrounding transaction, so a concurrent reader can observe the table
//! empty between the first two.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

use super::{ColumnValue, RepositoryError, SeedRow, SeedStore};

/// Repository that replaces seeded tables in `PostgreSQL`.
pub struct SeedRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SeedRepository<'a> {
    /// Create a new seed repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Delete every row of `T::TABLE`.
    async fn delete_all<T: SeedRow>(&self) -> Result<u64, RepositoryError> {
        let sql = format!("DELETE FROM {}", T::TABLE);
        let result = sqlx::query(&sql).execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Insert `rows` with a single multi-row statement.
    async fn bulk_insert<T: SeedRow>(&self, rows: &[T]) -> Result<u64, RepositoryError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            T::TABLE,
            T::COLUMNS.join(", ")
        ));

        builder.push_values(rows, |mut row_builder, row| {
            for value in row.values() {
                match value {
                    ColumnValue::Text(v) => {
                        row_builder.push_bind(v);
                    }
                    ColumnValue::Int(v) => {
                        row_builder.push_bind(v);
                    }
                    ColumnValue::Timestamp(v) => {
                        row_builder.push_bind(v);
                    }
                }
            }
        });

        let result = builder.build().execute(self.pool).await?;
        Ok(result.rows_affected())
    }

    /// Count the rows of `T::TABLE`.
    async fn count<T: SeedRow>(&self) -> Result<i64, RepositoryError> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(self.pool).await?;
        Ok(count)
    }
}

impl SeedStore for SeedRepository<'_> {
    #[instrument(skip(self, rows), fields(table = T::TABLE, rows = rows.len()))]
    async fn replace_all<T>(&self, rows: &[T]) -> Result<i64, RepositoryError>
    where
        T: SeedRow + Sync,
    {
        let deleted = self.delete_all::<T>().await?;
        debug!(deleted, "Cleared table");

        let inserted = self.bulk_insert(rows).await?;
        debug!(inserted, "Bulk inserted rows");

        let count = self.count::<T>().await?;
        info!(count, "Created {count} {}", T::LABEL);

        Ok(count)
    }
}
