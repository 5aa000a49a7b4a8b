//! Booking lifecycle endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use booking::{
    BookingService, InMemoryBillingService, InMemoryGuestDirectory, InMemoryHousekeepingService,
    NewBooking, UpdateBooking,
};
use chrono::NaiveDate;
use common::EntityId;
use domain::{Invoice, Money, Reservation, ServiceCharge};
use serde::{Deserialize, Serialize};
use store::{ReservationStore, RoomStore};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R, M>
where
    R: ReservationStore,
    M: RoomStore,
{
    pub bookings: BookingService<
        R,
        M,
        InMemoryGuestDirectory,
        InMemoryBillingService,
        InMemoryHousekeepingService,
    >,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub guest_ref: String,
    pub room_id: String,
    pub check_in: String,
    pub check_out: String,
    pub total_amount_cents: i64,
}

#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub room_id: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub total_amount_cents: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct GuestQuery {
    pub guest: String,
}

#[derive(Deserialize, Default)]
pub struct IssueInvoiceRequest {
    #[serde(default)]
    pub services: Vec<ServiceChargeRequest>,
}

#[derive(Deserialize)]
pub struct ServiceChargeRequest {
    pub description: String,
    pub amount_cents: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub guest_id: String,
    pub room_id: String,
    pub check_in: String,
    pub check_out: String,
    pub status: String,
    pub total_amount_cents: i64,
}

impl From<&Reservation> for BookingResponse {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            guest_id: r.guest_id.to_string(),
            room_id: r.room_id.to_string(),
            check_in: r.dates.check_in().to_string(),
            check_out: r.dates.check_out().to_string(),
            status: r.status.to_string(),
            total_amount_cents: r.total_amount.cents(),
        }
    }
}

#[derive(Serialize)]
pub struct ServiceChargeResponse {
    pub description: String,
    pub amount_cents: i64,
}

#[derive(Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub reservation_id: String,
    pub guest_id: String,
    pub room_charges_cents: i64,
    pub services: Vec<ServiceChargeResponse>,
    pub total_amount_cents: i64,
    pub payment_status: String,
    pub issued_at: String,
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.to_string(),
            reservation_id: invoice.reservation_id.to_string(),
            guest_id: invoice.guest_id.to_string(),
            room_charges_cents: invoice.room_charges.cents(),
            services: invoice
                .services
                .iter()
                .map(|s| ServiceChargeResponse {
                    description: s.description.clone(),
                    amount_cents: s.amount.cents(),
                })
                .collect(),
            total_amount_cents: invoice.total_amount.cents(),
            payment_status: invoice.payment_status.to_string(),
            issued_at: invoice.issued_at.to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /bookings — create a new booking.
#[tracing::instrument(skip(state, req))]
pub async fn create<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(axum::http::StatusCode, Json<BookingResponse>), ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let cmd = NewBooking::new(
        parse_entity_id("guest_ref", &req.guest_ref)?,
        parse_entity_id("room_id", &req.room_id)?,
        parse_date("check_in", &req.check_in)?,
        parse_date("check_out", &req.check_out)?,
        Money::from_cents(req.total_amount_cents),
    );

    let reservation = state.bookings.create_booking(cmd).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(BookingResponse::from(&reservation)),
    ))
}

/// GET /bookings/{id} — load a booking by ID.
#[tracing::instrument(skip(state))]
pub async fn get<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let booking_id = parse_entity_id("id", &id)?;
    let reservation = state
        .bookings
        .get_booking(booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Booking {id} not found")))?;

    Ok(Json(BookingResponse::from(&reservation)))
}

/// GET /bookings?guest= — list a guest's bookings, newest stay first.
#[tracing::instrument(skip(state))]
pub async fn list_for_guest<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Query(query): Query<GuestQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let guest_id = parse_entity_id("guest", &query.guest)?;
    let reservations = state.bookings.bookings_for_guest(guest_id).await?;

    Ok(Json(
        reservations.iter().map(BookingResponse::from).collect(),
    ))
}

/// PATCH /bookings/{id} — update booking fields.
///
/// Only room, dates, and total amount are updatable; status moves through
/// the lifecycle endpoints.
#[tracing::instrument(skip(state, req))]
pub async fn update<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let booking_id = parse_entity_id("id", &id)?;

    let mut cmd = UpdateBooking::new();
    if let Some(ref room_id) = req.room_id {
        cmd = cmd.room(parse_entity_id("room_id", room_id)?);
    }
    if let Some(ref check_in) = req.check_in {
        cmd = cmd.check_in(parse_date("check_in", check_in)?);
    }
    if let Some(ref check_out) = req.check_out {
        cmd = cmd.check_out(parse_date("check_out", check_out)?);
    }
    if let Some(cents) = req.total_amount_cents {
        cmd = cmd.total_amount(Money::from_cents(cents));
    }

    let reservation = state.bookings.update_booking(booking_id, cmd).await?;

    Ok(Json(BookingResponse::from(&reservation)))
}

/// POST /bookings/{id}/cancel — cancel a booking.
#[tracing::instrument(skip(state))]
pub async fn cancel<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let booking_id = parse_entity_id("id", &id)?;
    let reservation = state.bookings.cancel_booking(booking_id).await?;

    Ok(Json(BookingResponse::from(&reservation)))
}

/// POST /bookings/{id}/check-in — check the guest in.
#[tracing::instrument(skip(state))]
pub async fn check_in<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let booking_id = parse_entity_id("id", &id)?;
    let reservation = state.bookings.check_in(booking_id).await?;

    Ok(Json(BookingResponse::from(&reservation)))
}

/// POST /bookings/{id}/check-out — check the guest out.
///
/// Completing the stay also issues the invoice and queues the cleaning
/// task for the room.
#[tracing::instrument(skip(state))]
pub async fn check_out<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let booking_id = parse_entity_id("id", &id)?;
    let reservation = state.bookings.check_out(booking_id).await?;

    Ok(Json(BookingResponse::from(&reservation)))
}

/// POST /bookings/{id}/invoice — issue an invoice with service charges.
#[tracing::instrument(skip(state, req))]
pub async fn invoice<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
    Json(req): Json<IssueInvoiceRequest>,
) -> Result<(axum::http::StatusCode, Json<InvoiceResponse>), ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let booking_id = parse_entity_id("id", &id)?;

    let services: Vec<ServiceCharge> = req
        .services
        .into_iter()
        .map(|s| ServiceCharge::new(s.description, Money::from_cents(s.amount_cents)))
        .collect();

    let invoice = state.bookings.issue_invoice(booking_id, services).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(InvoiceResponse::from(&invoice)),
    ))
}

pub(crate) fn parse_entity_id(field: &str, value: &str) -> Result<EntityId, ApiError> {
    let uuid = uuid::Uuid::parse_str(value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid {field}: {e}")))?;
    Ok(EntityId::from(uuid))
}

pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {field} date: {e}")))
}
