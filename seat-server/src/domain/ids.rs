//! Newtype wrappers for record identifiers.
//!
//! Every entity the engine reads is keyed by a numeric id. Wrapping each one
//! keeps a `SeatId` from being passed where a `StationId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw numeric id.
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                $name(n)
            }
        }
    };
}

record_id!(
    /// Identifies a station.
    StationId,
    "station#"
);
record_id!(
    /// Identifies a route (a named, ordered sequence of stops).
    RouteId,
    "route#"
);
record_id!(
    /// Identifies one timed run of a route on a bus.
    DepartureId,
    "departure#"
);
record_id!(
    /// Identifies a bus.
    BusId,
    "bus#"
);
record_id!(
    /// Identifies a seat. Seat ids are unique across all buses.
    SeatId,
    "seat#"
);
record_id!(
    /// Identifies a booking.
    BookingId,
    "booking#"
);
