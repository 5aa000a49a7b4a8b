//! HTTP API server with observability for the hotel back-office system.
//!
//! Provides REST endpoints for room inventory and the booking lifecycle,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post, put};
use booking::{
    BookingService, InMemoryBillingService, InMemoryGuestDirectory, InMemoryHousekeepingService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{InMemoryReservationStore, InMemoryRoomStore, ReservationStore, RoomStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::bookings::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R, M>(state: Arc<AppState<R, M>>, metrics_handle: PrometheusHandle) -> Router
where
    R: ReservationStore + 'static,
    M: RoomStore + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/guests", post(routes::guests::register::<R, M>))
        .route("/rooms", post(routes::rooms::create::<R, M>))
        .route("/rooms", get(routes::rooms::list::<R, M>))
        .route("/rooms/{id}", get(routes::rooms::get::<R, M>))
        .route("/rooms/{id}/status", put(routes::rooms::set_status::<R, M>))
        .route("/bookings", post(routes::bookings::create::<R, M>))
        .route("/bookings", get(routes::bookings::list_for_guest::<R, M>))
        .route("/bookings/{id}", get(routes::bookings::get::<R, M>))
        .route("/bookings/{id}", patch(routes::bookings::update::<R, M>))
        .route(
            "/bookings/{id}/cancel",
            post(routes::bookings::cancel::<R, M>),
        )
        .route(
            "/bookings/{id}/check-in",
            post(routes::bookings::check_in::<R, M>),
        )
        .route(
            "/bookings/{id}/check-out",
            post(routes::bookings::check_out::<R, M>),
        )
        .route(
            "/bookings/{id}/invoice",
            post(routes::bookings::invoice::<R, M>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over the given stores, wiring the in-memory
/// collaborator services.
pub fn create_state<R, M>(reservations: R, rooms: M) -> Arc<AppState<R, M>>
where
    R: ReservationStore,
    M: RoomStore,
{
    let bookings = BookingService::new(
        reservations,
        rooms,
        InMemoryGuestDirectory::new(),
        InMemoryBillingService::new(),
        InMemoryHousekeepingService::new(),
    );

    Arc::new(AppState { bookings })
}

/// Creates application state backed entirely by in-memory stores.
pub fn create_default_state() -> Arc<AppState<InMemoryReservationStore, InMemoryRoomStore>> {
    create_state(InMemoryReservationStore::new(), InMemoryRoomStore::new())
}
