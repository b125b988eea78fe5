//! Relational reservations table — read-side demo runner.

use sqlx::MySqlPool;
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// A row in the relational `reservations` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Reservation {
    pub id: i64,
    pub name: String,
}

/// Startup demo: select every row from the relational table and log it.
pub struct RelationalTableDemo {
    pool: MySqlPool,
}

impl RelationalTableDemo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Run the query once and log each row. Returns the rows so callers
    /// can inspect what was read.
    pub async fn run(&self) -> StoreResult<Vec<Reservation>> {
        let reservations =
            sqlx::query_as::<_, Reservation>("select * from reservations")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        for reservation in &reservations {
            info!(reservation = ?reservation, "reservation row");
        }
        Ok(reservations)
    }
}
