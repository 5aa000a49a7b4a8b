use async_trait::async_trait;
use common::EntityId;
use domain::{Reservation, Room, RoomStatus, StayDates};

use crate::Result;

/// Store for room inventory documents.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Inserts a new room.
    ///
    /// Fails with `DuplicateRoomNumber` if the room number is already taken;
    /// room numbers are globally unique across the property.
    async fn insert(&self, room: &Room) -> Result<()>;

    /// Retrieves a room by ID.
    ///
    /// Returns None if the room doesn't exist.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Room>>;

    /// Updates the status of a room.
    ///
    /// Unknown room IDs are ignored; callers resolve the room first.
    async fn update_status(&self, id: EntityId, status: RoomStatus) -> Result<()>;

    /// Lists all rooms, ordered by room number.
    async fn list(&self) -> Result<Vec<Room>>;
}

/// Store for reservation documents.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Inserts a new reservation.
    async fn insert(&self, reservation: &Reservation) -> Result<()>;

    /// Retrieves a reservation by ID.
    ///
    /// Returns None if the reservation doesn't exist.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Reservation>>;

    /// Replaces a stored reservation with the given document.
    async fn update(&self, reservation: &Reservation) -> Result<()>;

    /// Finds non-canceled reservations on a room whose stay overlaps the
    /// given dates.
    ///
    /// `exclude` drops one reservation from consideration, used when
    /// re-checking an existing booking against its own dates.
    async fn find_overlapping(
        &self,
        room_id: EntityId,
        dates: &StayDates,
        exclude: Option<EntityId>,
    ) -> Result<Vec<Reservation>>;

    /// Finds all reservations for a guest, newest stay first.
    async fn find_by_guest(&self, guest_id: EntityId) -> Result<Vec<Reservation>>;
}
