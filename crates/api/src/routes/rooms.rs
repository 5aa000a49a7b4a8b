//! Room registry endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use booking::NewRoom;
use domain::{Money, Room, RoomStatus, RoomType};
use serde::{Deserialize, Serialize};
use store::{ReservationStore, RoomStore};

use crate::error::ApiError;
use crate::routes::bookings::{AppState, parse_entity_id};

// -- Request types --

#[derive(Deserialize)]
pub struct CreateRoomRequest {
    pub number: String,
    pub room_type: String,
    pub price_per_night_cents: i64,
    pub floor: u32,
    pub beds: u32,
}

#[derive(Deserialize)]
pub struct UpdateRoomStatusRequest {
    pub status: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct RoomResponse {
    pub id: String,
    pub number: String,
    pub room_type: String,
    pub price_per_night_cents: i64,
    pub floor: u32,
    pub beds: u32,
    pub status: String,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            number: room.number.clone(),
            room_type: room.room_type.to_string(),
            price_per_night_cents: room.price_per_night.cents(),
            floor: room.floor,
            beds: room.beds,
            status: room.status.to_string(),
        }
    }
}

// -- Handlers --

/// POST /rooms — register a new room.
#[tracing::instrument(skip(state, req))]
pub async fn create<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<(axum::http::StatusCode, Json<RoomResponse>), ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let room_type = RoomType::parse(&req.room_type)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid room_type: {}", req.room_type)))?;

    let cmd = NewRoom::new(
        req.number,
        room_type,
        Money::from_cents(req.price_per_night_cents),
        req.floor,
        req.beds,
    );

    let room = state.bookings.add_room(cmd).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(RoomResponse::from(&room)),
    ))
}

/// GET /rooms — list all rooms.
#[tracing::instrument(skip(state))]
pub async fn list<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
) -> Result<Json<Vec<RoomResponse>>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let rooms = state.bookings.list_rooms().await?;
    Ok(Json(rooms.iter().map(RoomResponse::from).collect()))
}

/// GET /rooms/{id} — load a room by ID.
#[tracing::instrument(skip(state))]
pub async fn get<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
) -> Result<Json<RoomResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let room_id = parse_entity_id("id", &id)?;
    let room = state
        .bookings
        .get_room(room_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Room {id} not found")))?;

    Ok(Json(RoomResponse::from(&room)))
}

/// PUT /rooms/{id}/status — set a room's operational status.
///
/// Used by housekeeping and maintenance flows, e.g. returning a cleaned
/// room to `available` or taking a room out of service.
#[tracing::instrument(skip(state, req))]
pub async fn set_status<R, M>(
    State(state): State<Arc<AppState<R, M>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoomStatusRequest>,
) -> Result<Json<RoomResponse>, ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let room_id = parse_entity_id("id", &id)?;
    let status = RoomStatus::parse(&req.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid status: {}", req.status)))?;

    let room = state.bookings.set_room_status(room_id, status).await?;

    Ok(Json(RoomResponse::from(&room)))
}
