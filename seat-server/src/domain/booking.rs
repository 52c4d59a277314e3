//! Seat reservations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{BookingId, DepartureId, SeatId, StationId};

/// Reservation status. Only confirmed bookings hold a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// A seat held from one station to another on a scheduled departure.
///
/// Stations are stored, not ordinals: the engine re-resolves them against
/// the departure's route on every check. A booking whose stations no longer
/// resolve, or resolve in the wrong order, holds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: BookingId,
    pub departure: DepartureId,
    pub seat: SeatId,
    /// Boarding station
    pub start_station: StationId,
    /// Alighting station
    pub end_station: StationId,
    pub status: BookingStatus,
    pub booked_at: NaiveDateTime,
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn only_confirmed_counts() {
        let mut booking = Booking {
            id: BookingId(1),
            departure: DepartureId(1),
            seat: SeatId(1),
            start_station: StationId(1),
            end_station: StationId(2),
            status: BookingStatus::Confirmed,
            booked_at: NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };
        assert!(booking.is_confirmed());

        booking.status = BookingStatus::Cancelled;
        assert!(!booking.is_confirmed());
        assert_eq!(booking.status.as_str(), "cancelled");
    }
}
