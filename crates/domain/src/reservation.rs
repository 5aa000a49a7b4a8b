//! Reservation document and reservation state machine.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::money::Money;
use crate::stay::StayDates;

/// The state of a reservation in its lifecycle.
///
/// State transitions:
/// ```text
/// Confirmed ──► CheckedIn ──► CheckedOut
///     │             │
///     └─────────────┴──► Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booking accepted, guest not yet arrived.
    #[default]
    Confirmed,

    /// Guest is in the room.
    CheckedIn,

    /// Stay completed (terminal state).
    CheckedOut,

    /// Booking was canceled (terminal state).
    Canceled,
}

impl ReservationStatus {
    /// Returns true if the guest can be checked in from this state.
    pub fn can_check_in(&self) -> bool {
        matches!(self, ReservationStatus::Confirmed)
    }

    /// Returns true if the guest can be checked out from this state.
    pub fn can_check_out(&self) -> bool {
        matches!(self, ReservationStatus::CheckedIn)
    }

    /// Returns true if the reservation can be canceled from this state.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        )
    }

    /// Returns true if this is a terminal state (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::CheckedOut | ReservationStatus::Canceled
        )
    }

    /// Returns true if the reservation still holds its room dates.
    ///
    /// Active reservations are the ones consulted by the overlap check.
    pub fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Canceled)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Canceled => "canceled",
        }
    }

    /// Parses a status from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(ReservationStatus::Confirmed),
            "checked_in" => Some(ReservationStatus::CheckedIn),
            "checked_out" => Some(ReservationStatus::CheckedOut),
            "canceled" => Some(ReservationStatus::Canceled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reservation document tying a guest to a room for a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: EntityId,

    /// Resolved guest-profile identifier.
    pub guest_id: EntityId,

    /// Room the stay occupies.
    pub room_id: EntityId,

    /// Half-open stay interval.
    pub dates: StayDates,

    /// Current lifecycle state.
    pub status: ReservationStatus,

    /// Total charge for the stay.
    pub total_amount: Money,
}

impl Reservation {
    /// Creates a confirmed reservation, validating the amount.
    ///
    /// Date ordering is already guaranteed by [`StayDates`]; past-date and
    /// overlap rules are enforced by the booking lifecycle manager, which
    /// owns the calendar context.
    pub fn confirm(
        guest_id: EntityId,
        room_id: EntityId,
        dates: StayDates,
        total_amount: Money,
    ) -> Result<Self, DomainError> {
        if !total_amount.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                cents: total_amount.cents(),
            });
        }

        Ok(Self {
            id: EntityId::new(),
            guest_id,
            room_id,
            dates,
            status: ReservationStatus::Confirmed,
            total_amount,
        })
    }

    /// Returns true if the reservation is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
