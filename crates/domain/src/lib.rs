//! Domain layer for the hotel back-office system.
//!
//! This crate provides the document model shared by the stores and the
//! booking lifecycle manager:
//! - Room and Reservation documents with their status state machines
//! - Invoice and HousekeepingTask documents derived from checkouts
//! - Money amounts in cents
//! - StayDates half-open date ranges with overlap detection

pub mod error;
pub mod invoice;
pub mod money;
pub mod reservation;
pub mod room;
pub mod stay;
pub mod task;

pub use error::DomainError;
pub use invoice::{Invoice, PaymentStatus, ServiceCharge};
pub use money::Money;
pub use reservation::{Reservation, ReservationStatus};
pub use room::{Room, RoomStatus, RoomType};
pub use stay::StayDates;
pub use task::{HousekeepingTask, TaskStatus, TaskType};
