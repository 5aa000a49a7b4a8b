//! Integration tests for the booking lifecycle manager.
//!
//! These tests drive the full front-desk flow end to end: registering
//! rooms, booking stays, handling conflicts, and completing check-in and
//! check-out with their derived documents.

use booking::{
    BookingError, BookingService, InMemoryBillingService, InMemoryGuestDirectory,
    InMemoryHousekeepingService, NewBooking, NewRoom, UpdateBooking,
};
use chrono::{Days, NaiveDate, Utc};
use domain::{
    Money, PaymentStatus, ReservationStatus, RoomStatus, RoomType, TaskStatus, TaskType,
};
use store::{InMemoryReservationStore, InMemoryRoomStore};

type Service = BookingService<
    InMemoryReservationStore,
    InMemoryRoomStore,
    InMemoryGuestDirectory,
    InMemoryBillingService,
    InMemoryHousekeepingService,
>;

fn create_service() -> Service {
    BookingService::new(
        InMemoryReservationStore::new(),
        InMemoryRoomStore::new(),
        InMemoryGuestDirectory::new(),
        InMemoryBillingService::new(),
        InMemoryHousekeepingService::new(),
    )
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[tokio::test]
async fn full_front_desk_scenario() {
    let service = create_service();

    // Register room 101, available
    let room = service
        .add_room(NewRoom::new(
            "101",
            RoomType::Double,
            Money::from_cents(10_000),
            1,
            2,
        ))
        .await
        .unwrap();
    assert_eq!(room.status, RoomStatus::Available);

    // Guest books a two-night stay for $200
    let guest = service.guests().register_profile();
    let reservation = service
        .create_booking(NewBooking::new(
            guest,
            room.id,
            today() + Days::new(1),
            today() + Days::new(3),
            Money::from_cents(20_000),
        ))
        .await
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Confirmed);

    // A second booking overlapping the stay is rejected
    let other_guest = service.guests().register_profile();
    let conflict = service
        .create_booking(NewBooking::new(
            other_guest,
            room.id,
            today() + Days::new(2),
            today() + Days::new(4),
            Money::from_cents(20_000),
        ))
        .await;
    assert!(matches!(
        conflict,
        Err(BookingError::OverlappingReservation { .. })
    ));

    // Check-in occupies the room
    service.check_in(reservation.id).await.unwrap();
    let room_doc = service.get_room(room.id).await.unwrap().unwrap();
    assert_eq!(room_doc.status, RoomStatus::Occupied);

    // Check-out completes the stay, queues cleaning, and bills the guest
    let checked_out = service.check_out(reservation.id).await.unwrap();
    assert_eq!(checked_out.status, ReservationStatus::CheckedOut);

    let room_doc = service.get_room(room.id).await.unwrap().unwrap();
    assert_eq!(room_doc.status, RoomStatus::Cleaning);

    let invoice = service.billing().invoice_for(reservation.id).unwrap();
    assert_eq!(invoice.total_amount.cents(), 20_000);
    assert_eq!(invoice.payment_status, PaymentStatus::Pending);
    assert_eq!(service.billing().invoice_count(), 1);

    let tasks = service.housekeeping().tasks_for_room(room.id);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].task_type, TaskType::Cleaning);
    assert_eq!(tasks[0].status, TaskStatus::Pending);

    // Housekeeping finishes and the room returns to service
    let room_doc = service
        .set_room_status(room.id, RoomStatus::Available)
        .await
        .unwrap();
    assert_eq!(room_doc.status, RoomStatus::Available);
}

#[tokio::test]
async fn no_accepted_sequence_produces_overlap() {
    let service = create_service();
    let guest = service.guests().register_profile();

    let room = service
        .add_room(NewRoom::new(
            "201",
            RoomType::Single,
            Money::from_cents(8000),
            2,
            1,
        ))
        .await
        .unwrap();

    // Issue a spread of creates and updates, some valid and some not
    let mut accepted = Vec::new();
    for (from, to) in [(1u64, 3u64), (2, 4), (3, 5), (4, 8), (5, 6)] {
        let result = service
            .create_booking(NewBooking::new(
                guest,
                room.id,
                today() + Days::new(from),
                today() + Days::new(to),
                Money::from_cents(10_000),
            ))
            .await;
        if let Ok(r) = result {
            accepted.push(r.id);
        }
    }

    for id in &accepted {
        // Try to stretch each accepted stay over its neighbors
        let _ = service
            .update_booking(*id, UpdateBooking::new().check_out(today() + Days::new(9)))
            .await;
    }

    // Whatever was accepted, the room calendar holds no overlapping pair
    let mut stays = Vec::new();
    for id in &accepted {
        let r = service.get_booking(*id).await.unwrap().unwrap();
        if r.status.is_active() {
            stays.push(r.dates);
        }
    }

    for (i, a) in stays.iter().enumerate() {
        for b in stays.iter().skip(i + 1) {
            assert!(!a.overlaps(b), "overlapping stays {a} and {b}");
        }
    }
}

#[tokio::test]
async fn back_to_back_and_boundary_dates() {
    let service = create_service();
    let guest = service.guests().register_profile();

    let room = service
        .add_room(NewRoom::new(
            "301",
            RoomType::Suite,
            Money::from_cents(30_000),
            3,
            2,
        ))
        .await
        .unwrap();

    // One-night stay starting today is the earliest acceptable booking
    let first = service
        .create_booking(NewBooking::new(
            guest,
            room.id,
            today(),
            today() + Days::new(1),
            Money::from_cents(30_000),
        ))
        .await
        .unwrap();

    // Back-to-back booking starting on the first stay's check-out date
    let second = service
        .create_booking(NewBooking::new(
            guest,
            room.id,
            today() + Days::new(1),
            today() + Days::new(2),
            Money::from_cents(30_000),
        ))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.dates.check_out(), second.dates.check_in());
}

#[tokio::test]
async fn checkout_retry_after_billing_outage_is_safe() {
    let service = create_service();
    let guest = service.guests().register_profile();

    let room = service
        .add_room(NewRoom::new(
            "401",
            RoomType::Deluxe,
            Money::from_cents(40_000),
            4,
            2,
        ))
        .await
        .unwrap();

    let reservation = service
        .create_booking(NewBooking::new(
            guest,
            room.id,
            today(),
            today() + Days::new(2),
            Money::from_cents(80_000),
        ))
        .await
        .unwrap();
    service.check_in(reservation.id).await.unwrap();

    // Billing outage: checkout fails before any state changes
    service.billing().set_fail_on_issue(true);
    let failed = service.check_out(reservation.id).await;
    assert!(matches!(failed, Err(BookingError::Billing(_))));

    let stored = service.get_booking(reservation.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ReservationStatus::CheckedIn);
    assert_eq!(service.billing().invoice_count(), 0);
    assert_eq!(service.housekeeping().task_count(), 0);

    // Outage over: the retried checkout completes with one of each document
    service.billing().set_fail_on_issue(false);
    service.check_out(reservation.id).await.unwrap();

    assert_eq!(service.billing().invoice_count(), 1);
    assert_eq!(service.housekeeping().task_count(), 1);
    let room_doc = service.get_room(room.id).await.unwrap().unwrap();
    assert_eq!(room_doc.status, RoomStatus::Cleaning);
}
