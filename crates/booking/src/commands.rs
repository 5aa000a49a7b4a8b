//! Booking and room registry commands.

use chrono::NaiveDate;
use common::EntityId;
use domain::{Money, RoomType};

/// Command to create a new booking.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Opaque guest reference: a guest-profile id, or a user id owning one.
    pub guest_ref: EntityId,

    /// Room to book.
    pub room_id: EntityId,

    /// Arrival date (inclusive).
    pub check_in: NaiveDate,

    /// Departure date (exclusive).
    pub check_out: NaiveDate,

    /// Total charge for the stay.
    pub total_amount: Money,
}

impl NewBooking {
    /// Creates a new NewBooking command.
    pub fn new(
        guest_ref: EntityId,
        room_id: EntityId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        total_amount: Money,
    ) -> Self {
        Self {
            guest_ref,
            room_id,
            check_in,
            check_out,
            total_amount,
        }
    }
}

/// Command to update a booking.
///
/// Only the fields listed here can be changed through an update; status
/// moves exclusively through the lifecycle operations.
#[derive(Debug, Clone, Default)]
pub struct UpdateBooking {
    /// Move the stay to a different room.
    pub room_id: Option<EntityId>,

    /// New arrival date.
    pub check_in: Option<NaiveDate>,

    /// New departure date.
    pub check_out: Option<NaiveDate>,

    /// New total charge.
    pub total_amount: Option<Money>,
}

impl UpdateBooking {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target room.
    pub fn room(mut self, room_id: EntityId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Sets the arrival date.
    pub fn check_in(mut self, check_in: NaiveDate) -> Self {
        self.check_in = Some(check_in);
        self
    }

    /// Sets the departure date.
    pub fn check_out(mut self, check_out: NaiveDate) -> Self {
        self.check_out = Some(check_out);
        self
    }

    /// Sets the total charge.
    pub fn total_amount(mut self, amount: Money) -> Self {
        self.total_amount = Some(amount);
        self
    }

    /// Returns true if the update touches the room or the stay dates,
    /// which forces a fresh overlap check.
    pub fn affects_calendar(&self) -> bool {
        self.room_id.is_some() || self.check_in.is_some() || self.check_out.is_some()
    }
}

/// Command to register a new room.
#[derive(Debug, Clone)]
pub struct NewRoom {
    /// Human-facing room number, unique across the property.
    pub number: String,

    /// Room category.
    pub room_type: RoomType,

    /// Nightly rate.
    pub price_per_night: Money,

    /// Floor the room is on.
    pub floor: u32,

    /// Number of beds.
    pub beds: u32,
}

impl NewRoom {
    /// Creates a new NewRoom command.
    pub fn new(
        number: impl Into<String>,
        room_type: RoomType,
        price_per_night: Money,
        floor: u32,
        beds: u32,
    ) -> Self {
        Self {
            number: number.into(),
            room_type,
            price_per_night,
            floor,
            beds,
        }
    }
}
