//! Domain error types.
//!
//! These errors are raised when reference data is authored, never while
//! answering an availability query. A value that made it past construction
//! can be trusted by the engine.

use super::{BusId, DepartureId, RouteId, SeatId, StationId};

/// Invariant violations in routes, buses and departures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A route needs an origin and a destination.
    #[error("{route} has {stops} stop(s); at least 2 are required")]
    RouteTooShort { route: RouteId, stops: usize },

    /// A station may appear at most once per route.
    #[error("{station} appears more than once on {route}")]
    DuplicateStation { route: RouteId, station: StationId },

    /// Stop orders must be exactly 0..N-1.
    #[error("stop orders on {route} are not contiguous from 0")]
    NonContiguousOrder { route: RouteId },

    /// The scheduled arrival precedes the scheduled departure.
    #[error("{0} arrives before it departs")]
    ArrivalBeforeDeparture(DepartureId),

    /// More seats were registered than the bus holds.
    #[error("{bus} has {seats} seats but a capacity of {capacity}")]
    SeatsExceedCapacity { bus: BusId, seats: usize, capacity: u32 },

    /// The same seat was registered twice on a bus.
    #[error("{seat} is registered twice on {bus}")]
    DuplicateSeat { bus: BusId, seat: SeatId },
}
