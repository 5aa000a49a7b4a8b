use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use domain::{Reservation, Room, RoomStatus, StayDates};
use tokio::sync::RwLock;

use crate::{
    Result,
    StoreError,
    store::{ReservationStore, RoomStore},
};

/// In-memory room store for testing and development.
///
/// Provides the same interface as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryRoomStore {
    rooms: Arc<RwLock<HashMap<EntityId, Room>>>,
}

impl InMemoryRoomStore {
    /// Creates a new empty in-memory room store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of rooms stored.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn insert(&self, room: &Room) -> Result<()> {
        let mut rooms = self.rooms.write().await;

        if rooms.values().any(|r| r.number == room.number) {
            return Err(StoreError::DuplicateRoomNumber {
                number: room.number.clone(),
            });
        }

        rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Room>> {
        let rooms = self.rooms.read().await;
        Ok(rooms.get(&id).cloned())
    }

    async fn update_status(&self, id: EntityId, status: RoomStatus) -> Result<()> {
        let mut rooms = self.rooms.write().await;
        if let Some(room) = rooms.get_mut(&id) {
            room.status = status;
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Room>> {
        let rooms = self.rooms.read().await;
        let mut all: Vec<Room> = rooms.values().cloned().collect();
        all.sort_by(|a, b| a.number.cmp(&b.number));
        Ok(all)
    }
}

/// In-memory reservation store for testing and development.
#[derive(Clone, Default)]
pub struct InMemoryReservationStore {
    reservations: Arc<RwLock<HashMap<EntityId, Reservation>>>,
}

impl InMemoryReservationStore {
    /// Creates a new empty in-memory reservation store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of reservations stored.
    pub async fn reservation_count(&self) -> usize {
        self.reservations.read().await.len()
    }
}

#[async_trait]
impl ReservationStore for InMemoryReservationStore {
    async fn insert(&self, reservation: &Reservation) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        reservations.insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Reservation>> {
        let reservations = self.reservations.read().await;
        Ok(reservations.get(&id).cloned())
    }

    async fn update(&self, reservation: &Reservation) -> Result<()> {
        let mut reservations = self.reservations.write().await;
        reservations.insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find_overlapping(
        &self,
        room_id: EntityId,
        dates: &StayDates,
        exclude: Option<EntityId>,
    ) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut matching: Vec<Reservation> = reservations
            .values()
            .filter(|r| {
                r.room_id == room_id
                    && r.status.is_active()
                    && exclude != Some(r.id)
                    && r.dates.overlaps(dates)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.dates.check_in());
        Ok(matching)
    }

    async fn find_by_guest(&self, guest_id: EntityId) -> Result<Vec<Reservation>> {
        let reservations = self.reservations.read().await;
        let mut matching: Vec<Reservation> = reservations
            .values()
            .filter(|r| r.guest_id == guest_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| std::cmp::Reverse(r.dates.check_in()));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{Money, ReservationStatus, RoomType};

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stay(start: (i32, u32, u32), end: (i32, u32, u32)) -> StayDates {
        StayDates::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2)).unwrap()
    }

    fn reservation(room_id: EntityId, dates: StayDates) -> Reservation {
        Reservation::confirm(EntityId::new(), room_id, dates, Money::from_cents(20_000)).unwrap()
    }

    #[tokio::test]
    async fn insert_and_find_room() {
        let store = InMemoryRoomStore::new();
        let room = Room::new("101", RoomType::Double, Money::from_cents(10_000), 1, 2).unwrap();

        store.insert(&room).await.unwrap();

        let found = store.find_by_id(room.id).await.unwrap();
        assert_eq!(found, Some(room));
    }

    #[tokio::test]
    async fn duplicate_room_number_rejected() {
        let store = InMemoryRoomStore::new();
        let first = Room::new("101", RoomType::Double, Money::from_cents(10_000), 1, 2).unwrap();
        let second = Room::new("101", RoomType::Single, Money::from_cents(8000), 1, 1).unwrap();

        store.insert(&first).await.unwrap();
        let result = store.insert(&second).await;

        assert!(matches!(
            result,
            Err(StoreError::DuplicateRoomNumber { .. })
        ));
        assert_eq!(store.room_count().await, 1);
    }

    #[tokio::test]
    async fn update_room_status() {
        let store = InMemoryRoomStore::new();
        let room = Room::new("101", RoomType::Double, Money::from_cents(10_000), 1, 2).unwrap();
        store.insert(&room).await.unwrap();

        store
            .update_status(room.id, RoomStatus::Cleaning)
            .await
            .unwrap();

        let found = store.find_by_id(room.id).await.unwrap().unwrap();
        assert_eq!(found.status, RoomStatus::Cleaning);
    }

    #[tokio::test]
    async fn list_rooms_ordered_by_number() {
        let store = InMemoryRoomStore::new();
        for number in ["305", "101", "202"] {
            let room =
                Room::new(number, RoomType::Single, Money::from_cents(8000), 1, 1).unwrap();
            store.insert(&room).await.unwrap();
        }

        let rooms = store.list().await.unwrap();
        let numbers: Vec<&str> = rooms.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "202", "305"]);
    }

    #[tokio::test]
    async fn find_overlapping_filters_by_room_and_dates() {
        let store = InMemoryReservationStore::new();
        let room_a = EntityId::new();
        let room_b = EntityId::new();

        let on_a = reservation(room_a, stay((2024, 6, 1), (2024, 6, 3)));
        let on_b = reservation(room_b, stay((2024, 6, 1), (2024, 6, 3)));
        let later_on_a = reservation(room_a, stay((2024, 6, 10), (2024, 6, 12)));
        store.insert(&on_a).await.unwrap();
        store.insert(&on_b).await.unwrap();
        store.insert(&later_on_a).await.unwrap();

        let hits = store
            .find_overlapping(room_a, &stay((2024, 6, 2), (2024, 6, 4)), None)
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, on_a.id);
    }

    #[tokio::test]
    async fn find_overlapping_ignores_canceled() {
        let store = InMemoryReservationStore::new();
        let room_id = EntityId::new();

        let mut canceled = reservation(room_id, stay((2024, 6, 1), (2024, 6, 3)));
        canceled.status = ReservationStatus::Canceled;
        store.insert(&canceled).await.unwrap();

        let hits = store
            .find_overlapping(room_id, &stay((2024, 6, 2), (2024, 6, 4)), None)
            .await
            .unwrap();

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn find_overlapping_excludes_given_id() {
        let store = InMemoryReservationStore::new();
        let room_id = EntityId::new();

        let existing = reservation(room_id, stay((2024, 6, 1), (2024, 6, 3)));
        store.insert(&existing).await.unwrap();

        let hits = store
            .find_overlapping(room_id, &stay((2024, 6, 1), (2024, 6, 3)), Some(existing.id))
            .await
            .unwrap();

        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn find_by_guest_newest_first() {
        let store = InMemoryReservationStore::new();
        let guest_id = EntityId::new();
        let room_id = EntityId::new();

        let mut early =
            Reservation::confirm(guest_id, room_id, stay((2024, 5, 1), (2024, 5, 3)), Money::from_cents(100))
                .unwrap();
        early.status = ReservationStatus::CheckedOut;
        let late =
            Reservation::confirm(guest_id, room_id, stay((2024, 7, 1), (2024, 7, 3)), Money::from_cents(100))
                .unwrap();
        store.insert(&early).await.unwrap();
        store.insert(&late).await.unwrap();

        let found = store.find_by_guest(guest_id).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, late.id);
        assert_eq!(found[1].id, early.id);
    }

    #[tokio::test]
    async fn update_replaces_document() {
        let store = InMemoryReservationStore::new();
        let room_id = EntityId::new();

        let mut r = reservation(room_id, stay((2024, 6, 1), (2024, 6, 3)));
        store.insert(&r).await.unwrap();

        r.status = ReservationStatus::CheckedIn;
        store.update(&r).await.unwrap();

        let found = store.find_by_id(r.id).await.unwrap().unwrap();
        assert_eq!(found.status, ReservationStatus::CheckedIn);
        assert_eq!(store.reservation_count().await, 1);
    }
}
