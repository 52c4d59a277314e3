//! Storage collaborator for the availability engine.
//!
//! The engine never touches storage directly; it reads through the
//! `Directory` trait. `MemoryDirectory` is the in-process implementation
//! used by the server and by tests, and `seed` loads it from JSON.

mod error;
mod filter;
mod memory;
pub mod seed;

use std::sync::Arc;

pub use error::DirectoryError;
pub use filter::DepartureFilter;
pub use memory::MemoryDirectory;

use crate::domain::{
    Booking, BookingId, BookingStatus, Bus, BusId, DepartureId, Route, RouteId, ScheduledDeparture,
    SeatId, Station, StationId,
};

/// Read access to reference data and the booking ledger.
///
/// This abstraction allows the engine to be tested with in-memory data.
/// Lookups return `Ok(None)` for unknown ids; `Err` is reserved for
/// failures of the store itself.
pub trait Directory {
    fn station(&self, id: StationId) -> Result<Option<Station>, DirectoryError>;

    /// All stations, ordered by name.
    fn stations(&self) -> Result<Vec<Station>, DirectoryError>;

    fn route(&self, id: RouteId) -> Result<Option<Arc<Route>>, DirectoryError>;

    fn departure(&self, id: DepartureId) -> Result<Option<ScheduledDeparture>, DirectoryError>;

    /// Departures matching `filter`, ordered by departure time then id.
    fn departures(&self, filter: &DepartureFilter)
    -> Result<Vec<ScheduledDeparture>, DirectoryError>;

    /// A bus together with its seat roster.
    fn bus(&self, id: BusId) -> Result<Option<Arc<Bus>>, DirectoryError>;

    /// The bus a seat is fitted to.
    fn seat_owner(&self, seat: SeatId) -> Result<Option<BusId>, DirectoryError>;

    /// Confirmed bookings for one seat on one departure.
    fn confirmed_bookings(
        &self,
        departure: DepartureId,
        seat: SeatId,
    ) -> Result<Vec<Booking>, DirectoryError>;

    fn booking(&self, id: BookingId) -> Result<Option<Booking>, DirectoryError>;
}

/// Write access to the booking ledger.
///
/// Writers hold `&mut self`, so a check made through the `Directory`
/// half and the write that follows it cannot interleave with another
/// writer.
pub trait BookingStore: Directory {
    /// Allocates an id for a new booking.
    fn next_booking_id(&mut self) -> BookingId;

    /// Records a booking.
    fn insert_booking(&mut self, booking: Booking) -> Result<(), DirectoryError>;

    /// Changes a booking's status, returning the updated booking.
    fn set_booking_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, DirectoryError>;
}
