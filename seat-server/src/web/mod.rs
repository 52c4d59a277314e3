//! Web layer for the seat booking server.
//!
//! JSON endpoints for stations, scheduled trips, seat availability and
//! bookings.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
