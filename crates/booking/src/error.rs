//! Booking lifecycle error types.

use chrono::NaiveDate;
use common::EntityId;
use domain::{DomainError, ReservationStatus, StayDates};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during booking lifecycle operations.
///
/// The taxonomy mirrors what the HTTP layer reports: validation failures,
/// unresolved references, booking conflicts, and disallowed lifecycle
/// transitions, plus store and collaborator failures.
#[derive(Debug, Error)]
pub enum BookingError {
    /// A document failed domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Check-in date lies before today.
    #[error("Check-in {check_in} is in the past (today is {today})")]
    CheckInInPast {
        check_in: NaiveDate,
        today: NaiveDate,
    },

    /// Reservation does not exist.
    #[error("Reservation not found: {0}")]
    ReservationNotFound(EntityId),

    /// Room does not exist.
    #[error("Room not found: {0}")]
    RoomNotFound(EntityId),

    /// Guest reference resolves to neither a guest profile nor a user
    /// owning one.
    #[error("No guest profile found for reference {0}")]
    GuestNotFound(EntityId),

    /// Another active reservation already holds the room for these dates.
    #[error("Room {room_id} already has a reservation overlapping {dates}")]
    OverlappingReservation {
        room_id: EntityId,
        dates: StayDates,
    },

    /// The room is already occupied by another guest.
    #[error("Room {room_id} is currently occupied")]
    RoomOccupied { room_id: EntityId },

    /// Lifecycle operation attempted from a disallowed status.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: ReservationStatus,
        action: &'static str,
    },

    /// An error occurred in the document store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Billing collaborator error.
    #[error("Billing service error: {0}")]
    Billing(String),

    /// Housekeeping collaborator error.
    #[error("Housekeeping service error: {0}")]
    Housekeeping(String),
}

/// Convenience type alias for booking results.
pub type Result<T> = std::result::Result<T, BookingError>;
