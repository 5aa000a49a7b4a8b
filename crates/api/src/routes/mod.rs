//! HTTP route handlers.

pub mod bookings;
pub mod guests;
pub mod health;
pub mod metrics;
pub mod rooms;
