//! lariat-store — reservation repositories and table demo runners.
//!
//! Two variants of the `reservations` table are exercised at startup:
//!
//! - [`distributed`]: a horizontally scaled Postgres-wire table, cleared
//!   and re-seeded through a repository abstraction.
//! - [`relational`]: a conventional MySQL table, read once and logged.

pub mod distributed;
pub mod error;
pub mod relational;

pub use distributed::{DEMO_NAMES, DistributedTableDemo, PgReservationStore, ReservationStore};
pub use error::{StoreError, StoreResult};
pub use relational::RelationalTableDemo;
