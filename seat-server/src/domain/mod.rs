//! Domain types for the seat reservation engine.
//!
//! Reference data (stations, routes, buses, departures) enforces its
//! invariants at construction time, so the availability engine can trust
//! any value it receives.

mod booking;
mod bus;
mod departure;
mod error;
mod ids;
mod ordinal;
mod route;
mod station;

pub use booking::{Booking, BookingStatus};
pub use bus::{Bus, Seat};
pub use departure::{DepartureStatus, ScheduledDeparture};
pub use error::DomainError;
pub use ids::{BookingId, BusId, DepartureId, RouteId, SeatId, StationId};
pub use ordinal::Ordinal;
pub use route::{Route, Stop};
pub use station::Station;
