//! Booking lifecycle manager.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::EntityId;
use domain::{
    DomainError, Invoice, Reservation, ReservationStatus, Room, RoomStatus, ServiceCharge,
    StayDates,
};
use store::{ReservationStore, RoomStore};
use tokio::sync::Mutex;

use crate::commands::{NewBooking, NewRoom, UpdateBooking};
use crate::error::{BookingError, Result};
use crate::services::billing::BillingService;
use crate::services::guests::GuestDirectory;
use crate::services::housekeeping::HousekeepingService;

/// Orchestrates the reservation lifecycle against the room and reservation
/// stores.
///
/// Enforces the state machine (`confirmed → checked_in → checked_out`,
/// `→ canceled` from non-terminal states), keeps room states coherent with
/// it, and drives the checkout side effects (invoice, cleaning task) as a
/// compensating sequence.
///
/// The overlap check and the write it guards run under a per-room mutex, so
/// two near-simultaneous bookings for the same room cannot both pass the
/// check.
pub struct BookingService<R, M, G, B, H>
where
    R: ReservationStore,
    M: RoomStore,
    G: GuestDirectory,
    B: BillingService,
    H: HousekeepingService,
{
    reservations: R,
    rooms: M,
    guests: G,
    billing: B,
    housekeeping: H,
    room_locks: Mutex<HashMap<EntityId, Arc<Mutex<()>>>>,
}

impl<R, M, G, B, H> BookingService<R, M, G, B, H>
where
    R: ReservationStore,
    M: RoomStore,
    G: GuestDirectory,
    B: BillingService,
    H: HousekeepingService,
{
    /// Creates a new booking service over the given stores and collaborators.
    pub fn new(reservations: R, rooms: M, guests: G, billing: B, housekeeping: H) -> Self {
        Self {
            reservations,
            rooms,
            guests,
            billing,
            housekeeping,
            room_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a reference to the billing collaborator.
    pub fn billing(&self) -> &B {
        &self.billing
    }

    /// Returns a reference to the housekeeping collaborator.
    pub fn housekeeping(&self) -> &H {
        &self.housekeeping
    }

    /// Returns a reference to the guest directory.
    pub fn guests(&self) -> &G {
        &self.guests
    }

    // -- Booking lifecycle --

    /// Creates a booking in `confirmed` status.
    ///
    /// Validates the stay dates and amount, resolves the guest reference,
    /// and rejects stays overlapping any active reservation on the room.
    /// The room itself is not touched; it becomes visibly occupied only at
    /// check-in.
    #[tracing::instrument(skip(self))]
    pub async fn create_booking(&self, cmd: NewBooking) -> Result<Reservation> {
        let dates = StayDates::new(cmd.check_in, cmd.check_out)?;

        let today = Utc::now().date_naive();
        if cmd.check_in < today {
            return Err(BookingError::CheckInInPast {
                check_in: cmd.check_in,
                today,
            });
        }

        if !cmd.total_amount.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                cents: cmd.total_amount.cents(),
            }
            .into());
        }

        let guest_id = self
            .guests
            .resolve(cmd.guest_ref)
            .await?
            .ok_or(BookingError::GuestNotFound(cmd.guest_ref))?;

        self.require_room(cmd.room_id).await?;

        let lock = self.room_lock(cmd.room_id).await;
        let _guard = lock.lock().await;

        self.ensure_no_overlap(cmd.room_id, &dates, None).await?;

        let reservation = Reservation::confirm(guest_id, cmd.room_id, dates, cmd.total_amount)?;
        self.reservations.insert(&reservation).await?;

        metrics::counter!("bookings_created_total").increment(1);
        tracing::info!(
            reservation_id = %reservation.id,
            room_id = %cmd.room_id,
            stay = %reservation.dates,
            "booking created"
        );

        Ok(reservation)
    }

    /// Applies an allow-listed update to a booking.
    ///
    /// Room and date changes re-run the overlap check against the effective
    /// target room, excluding the booking itself. Status is never writable
    /// here; lifecycle transitions go through the dedicated operations.
    #[tracing::instrument(skip(self))]
    pub async fn update_booking(&self, id: EntityId, cmd: UpdateBooking) -> Result<Reservation> {
        let mut reservation = self.require_reservation(id).await?;

        if reservation.is_terminal() {
            return Err(BookingError::InvalidStateTransition {
                current_status: reservation.status,
                action: "update",
            });
        }

        let target_room = cmd.room_id.unwrap_or(reservation.room_id);
        let dates = StayDates::new(
            cmd.check_in.unwrap_or_else(|| reservation.dates.check_in()),
            cmd.check_out
                .unwrap_or_else(|| reservation.dates.check_out()),
        )?;
        let total_amount = cmd.total_amount.unwrap_or(reservation.total_amount);
        if !total_amount.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                cents: total_amount.cents(),
            }
            .into());
        }

        let room_changed = target_room != reservation.room_id;
        if room_changed {
            self.require_room(target_room).await?;
        }

        if cmd.affects_calendar() {
            let lock = self.room_lock(target_room).await;
            let _guard = lock.lock().await;

            self.ensure_no_overlap(target_room, &dates, Some(id)).await?;

            let previous_room = reservation.room_id;
            reservation.room_id = target_room;
            reservation.dates = dates;
            reservation.total_amount = total_amount;
            self.reservations.update(&reservation).await?;

            // A checked-in stay physically moves rooms; bookings that never
            // occupied a room leave room states alone
            if room_changed && reservation.status == ReservationStatus::CheckedIn {
                self.rooms
                    .update_status(previous_room, RoomStatus::Available)
                    .await?;
                self.rooms
                    .update_status(target_room, RoomStatus::Occupied)
                    .await?;
            }
        } else {
            reservation.total_amount = total_amount;
            self.reservations.update(&reservation).await?;
        }

        metrics::counter!("bookings_updated_total").increment(1);
        tracing::info!(reservation_id = %id, "booking updated");

        Ok(reservation)
    }

    /// Cancels a booking.
    ///
    /// The room is released to `available` only when this booking was the
    /// one occupying it; canceling a not-yet-arrived booking leaves the room
    /// state alone.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_booking(&self, id: EntityId) -> Result<Reservation> {
        let mut reservation = self.require_reservation(id).await?;

        if !reservation.status.can_cancel() {
            return Err(BookingError::InvalidStateTransition {
                current_status: reservation.status,
                action: "cancel",
            });
        }

        let occupied_room = reservation.status == ReservationStatus::CheckedIn;

        reservation.status = ReservationStatus::Canceled;
        self.reservations.update(&reservation).await?;

        if occupied_room {
            self.rooms
                .update_status(reservation.room_id, RoomStatus::Available)
                .await?;
        }

        metrics::counter!("bookings_canceled_total").increment(1);
        tracing::info!(reservation_id = %id, "booking canceled");

        Ok(reservation)
    }

    /// Checks a guest into their reserved room.
    ///
    /// The reservation must be `confirmed` and the room must not be
    /// occupied by another stay.
    #[tracing::instrument(skip(self))]
    pub async fn check_in(&self, id: EntityId) -> Result<Reservation> {
        let mut reservation = self.require_reservation(id).await?;

        if !reservation.status.can_check_in() {
            return Err(BookingError::InvalidStateTransition {
                current_status: reservation.status,
                action: "check in",
            });
        }

        let lock = self.room_lock(reservation.room_id).await;
        let _guard = lock.lock().await;

        let room = self.require_room(reservation.room_id).await?;
        if !room.status.can_host_check_in() {
            return Err(BookingError::RoomOccupied { room_id: room.id });
        }

        reservation.status = ReservationStatus::CheckedIn;
        self.reservations.update(&reservation).await?;
        self.rooms
            .update_status(room.id, RoomStatus::Occupied)
            .await?;

        metrics::counter!("check_ins_total").increment(1);
        tracing::info!(reservation_id = %id, room_id = %room.id, "guest checked in");

        Ok(reservation)
    }

    /// Checks a guest out, completing the stay.
    ///
    /// Issues the invoice and schedules the cleaning task before committing
    /// the status writes; if a later step fails, earlier effects are
    /// compensated so the checkout can be retried. Both collaborators key
    /// idempotency off the reservation id, so retries cannot produce
    /// duplicate documents.
    #[tracing::instrument(skip(self))]
    pub async fn check_out(&self, id: EntityId) -> Result<Reservation> {
        let checkout_start = std::time::Instant::now();

        let mut reservation = self.require_reservation(id).await?;

        if !reservation.status.can_check_out() {
            return Err(BookingError::InvalidStateTransition {
                current_status: reservation.status,
                action: "check out",
            });
        }

        let invoice = self.billing.issue(&reservation, Vec::new()).await?;

        let task = match self
            .housekeeping
            .schedule_checkout_cleaning(reservation.room_id, reservation.id)
            .await
        {
            Ok(task) => task,
            Err(e) => {
                self.void_invoice_best_effort(invoice.id).await;
                return Err(e);
            }
        };

        reservation.status = ReservationStatus::CheckedOut;
        if let Err(e) = self.reservations.update(&reservation).await {
            self.cancel_task_best_effort(task.id).await;
            self.void_invoice_best_effort(invoice.id).await;
            return Err(e.into());
        }

        if let Err(e) = self
            .rooms
            .update_status(reservation.room_id, RoomStatus::Cleaning)
            .await
        {
            // Put the stay back so the whole checkout can be retried
            reservation.status = ReservationStatus::CheckedIn;
            if let Err(revert) = self.reservations.update(&reservation).await {
                tracing::error!(
                    reservation_id = %id,
                    error = %revert,
                    "failed to restore reservation after room update failure"
                );
            }
            self.cancel_task_best_effort(task.id).await;
            self.void_invoice_best_effort(invoice.id).await;
            return Err(e.into());
        }

        metrics::counter!("check_outs_total").increment(1);
        metrics::histogram!("check_out_duration_seconds")
            .record(checkout_start.elapsed().as_secs_f64());
        tracing::info!(
            reservation_id = %id,
            invoice_id = %invoice.id,
            task_id = %task.id,
            "guest checked out"
        );

        Ok(reservation)
    }

    /// Loads a booking by ID.
    ///
    /// Returns None if the booking doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_booking(&self, id: EntityId) -> Result<Option<Reservation>> {
        Ok(self.reservations.find_by_id(id).await?)
    }

    /// Lists all bookings for a guest profile, newest stay first.
    #[tracing::instrument(skip(self))]
    pub async fn bookings_for_guest(&self, guest_id: EntityId) -> Result<Vec<Reservation>> {
        Ok(self.reservations.find_by_guest(guest_id).await?)
    }

    /// Issues an invoice for a booking with itemized service charges.
    ///
    /// Issuance is idempotent per reservation; the invoice already on file
    /// is returned when one exists.
    #[tracing::instrument(skip(self))]
    pub async fn issue_invoice(
        &self,
        id: EntityId,
        services: Vec<ServiceCharge>,
    ) -> Result<Invoice> {
        let reservation = self.require_reservation(id).await?;
        self.billing.issue(&reservation, services).await
    }

    // -- Room registry --

    /// Registers a new room in `available` status.
    #[tracing::instrument(skip(self))]
    pub async fn add_room(&self, cmd: NewRoom) -> Result<Room> {
        let room = Room::new(
            cmd.number,
            cmd.room_type,
            cmd.price_per_night,
            cmd.floor,
            cmd.beds,
        )?;
        self.rooms.insert(&room).await?;

        tracing::info!(room_id = %room.id, number = %room.number, "room registered");
        Ok(room)
    }

    /// Loads a room by ID.
    ///
    /// Returns None if the room doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_room(&self, id: EntityId) -> Result<Option<Room>> {
        Ok(self.rooms.find_by_id(id).await?)
    }

    /// Lists all rooms, ordered by room number.
    #[tracing::instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.rooms.list().await?)
    }

    /// Sets a room's operational status directly.
    ///
    /// Housekeeping and maintenance flows use this to move rooms between
    /// `cleaning`, `maintenance`, and `available`.
    #[tracing::instrument(skip(self))]
    pub async fn set_room_status(&self, id: EntityId, status: RoomStatus) -> Result<Room> {
        let mut room = self.require_room(id).await?;
        self.rooms.update_status(id, status).await?;
        room.status = status;

        tracing::info!(room_id = %id, status = %status, "room status set");
        Ok(room)
    }

    // -- Internals --

    async fn require_reservation(&self, id: EntityId) -> Result<Reservation> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or(BookingError::ReservationNotFound(id))
    }

    async fn require_room(&self, id: EntityId) -> Result<Room> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or(BookingError::RoomNotFound(id))
    }

    async fn ensure_no_overlap(
        &self,
        room_id: EntityId,
        dates: &StayDates,
        exclude: Option<EntityId>,
    ) -> Result<()> {
        let conflicts = self
            .reservations
            .find_overlapping(room_id, dates, exclude)
            .await?;

        if !conflicts.is_empty() {
            metrics::counter!("booking_conflicts_total").increment(1);
            return Err(BookingError::OverlappingReservation {
                room_id,
                dates: *dates,
            });
        }

        Ok(())
    }

    /// Returns the mutex serializing calendar writes for a room.
    async fn room_lock(&self, room_id: EntityId) -> Arc<Mutex<()>> {
        let mut locks = self.room_locks.lock().await;
        locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
