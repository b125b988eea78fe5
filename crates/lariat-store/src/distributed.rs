//! Distributed reservations table — repository and demo runner.
//!
//! The table lives in a horizontally scaled Postgres-wire database. This
//! module owns the repository abstraction over it and the startup demo
//! that clears the table and re-seeds it with nine named reservations.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Names seeded into the distributed table on every demo run.
pub const DEMO_NAMES: [&str; 9] = [
    "Ray", "Josh", "Olga", "Violetta", "Cornelia", "Dave", "Mark", "Madhura", "Andy",
];

/// A row in the distributed `reservations` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Reservation {
    pub id: String,
    pub name: String,
}

impl Reservation {
    /// Create a reservation with a freshly generated unique id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// Storage operations the distributed-table demo needs.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Delete every row. Returns the number of rows removed.
    async fn delete_all(&self) -> StoreResult<u64>;

    /// Insert one reservation.
    async fn save(&self, reservation: &Reservation) -> StoreResult<()>;

    /// Fetch every row.
    async fn find_all(&self) -> StoreResult<Vec<Reservation>>;
}

/// `ReservationStore` backed by a Postgres-wire connection pool.
pub struct PgReservationStore {
    pool: PgPool,
}

impl PgReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for PgReservationStore {
    async fn delete_all(&self) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM reservations")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Delete(e.to_string()))?;
        Ok(result.rows_affected())
    }

    async fn save(&self, reservation: &Reservation) -> StoreResult<()> {
        sqlx::query("INSERT INTO reservations (id, name) VALUES ($1, $2)")
            .bind(&reservation.id)
            .bind(&reservation.name)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Insert(e.to_string()))?;
        Ok(())
    }

    async fn find_all(&self) -> StoreResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT id, name FROM reservations")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}

/// Startup demo: clear the distributed table, then seed it with
/// [`DEMO_NAMES`], logging each saved record.
pub struct DistributedTableDemo<S> {
    store: S,
}

impl<S: ReservationStore> DistributedTableDemo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the demo once. Each save is an independent call; a mid-sequence
    /// failure leaves the rows inserted so far in place, and the delete at
    /// the start of the next run makes re-running converge on the same set.
    pub async fn run(&self) -> StoreResult<()> {
        let removed = self.store.delete_all().await?;
        info!(removed, "reservations table cleared");

        for name in DEMO_NAMES {
            let reservation = Reservation::new(name);
            self.store.save(&reservation).await?;
            info!(reservation = ?reservation, "reservation saved");
        }
        Ok(())
    }
}
