//! Persistence layer for the hotel back-office system.
//!
//! Provides the [`RoomStore`] and [`ReservationStore`] traits with two
//! implementations: an in-memory store for tests and development, and a
//! PostgreSQL store for deployment.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::{InMemoryReservationStore, InMemoryRoomStore};
pub use postgres::PostgresStore;
pub use store::{ReservationStore, RoomStore};
