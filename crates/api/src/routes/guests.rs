//! Guest registration endpoint for the in-memory guest directory.
//!
//! Identity management proper lives in a separate service; this endpoint
//! is the registration seam for deployments running on the bundled
//! in-memory directory.

use std::sync::Arc;

use axum::Json;
use serde::Serialize;
use store::{ReservationStore, RoomStore};

use crate::error::ApiError;
use crate::routes::bookings::AppState;

#[derive(Serialize)]
pub struct GuestRegisteredResponse {
    pub guest_id: String,
}

/// POST /guests — register a guest profile and return its id.
#[tracing::instrument(skip(state))]
pub async fn register<R, M>(
    state: axum::extract::State<Arc<AppState<R, M>>>,
) -> Result<(axum::http::StatusCode, Json<GuestRegisteredResponse>), ApiError>
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let guest_id = state.bookings.guests().register_profile();

    Ok((
        axum::http::StatusCode::CREATED,
        Json(GuestRegisteredResponse {
            guest_id: guest_id.to_string(),
        }),
    ))
}
