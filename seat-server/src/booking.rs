//! Booking creation and cancellation.
//!
//! The availability check and the insert that follows it run against one
//! `&mut` borrow of the store, so no other writer can book the same seat
//! in between.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::availability::{AvailabilityConfig, SeatAvailability};
use crate::directory::{BookingStore, DirectoryError};
use crate::domain::{Booking, BookingId, BookingStatus, DepartureId, SeatId, StationId};

/// A request to hold one seat between two stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub departure: DepartureId,
    pub seat: SeatId,
    pub start_station: StationId,
    pub end_station: StationId,
}

/// Reasons a reservation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("start and end station are both {0}")]
    SameStation(StationId),

    #[error("unknown departure {0}")]
    UnknownDeparture(DepartureId),

    #[error("departure {departure} is {status} and cannot be booked")]
    DepartureNotBookable {
        departure: DepartureId,
        status: &'static str,
    },

    #[error("seat {seat} is not available from {start} to {end} on {departure}")]
    SeatUnavailable {
        departure: DepartureId,
        seat: SeatId,
        start: StationId,
        end: StationId,
    },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Reasons a cancellation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancellationError {
    #[error("unknown booking {0}")]
    UnknownBooking(BookingId),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Books a seat if it is free for the requested segment.
///
/// The new booking is always `Confirmed` and stamped with `now`.
pub fn reserve_seat<S: BookingStore + ?Sized>(
    store: &mut S,
    config: &AvailabilityConfig,
    request: NewBooking,
    now: NaiveDateTime,
) -> Result<Booking, ReservationError> {
    if request.start_station == request.end_station {
        return Err(ReservationError::SameStation(request.start_station));
    }

    let departure = store
        .departure(request.departure)?
        .ok_or(ReservationError::UnknownDeparture(request.departure))?;
    if !departure.is_scheduled() {
        return Err(ReservationError::DepartureNotBookable {
            departure: departure.id(),
            status: departure.status().as_str(),
        });
    }

    let free = SeatAvailability::new(&*store, config).is_seat_available(
        request.departure,
        request.seat,
        request.start_station,
        request.end_station,
    )?;
    if !free {
        debug!(
            departure = %request.departure,
            seat = %request.seat,
            "seat taken or segment invalid"
        );
        return Err(ReservationError::SeatUnavailable {
            departure: request.departure,
            seat: request.seat,
            start: request.start_station,
            end: request.end_station,
        });
    }

    let booking = Booking {
        id: store.next_booking_id(),
        departure: request.departure,
        seat: request.seat,
        start_station: request.start_station,
        end_station: request.end_station,
        status: BookingStatus::Confirmed,
        booked_at: now,
    };
    store.insert_booking(booking.clone())?;
    info!(
        booking = %booking.id,
        departure = %booking.departure,
        seat = %booking.seat,
        "booking confirmed"
    );
    Ok(booking)
}

/// Marks a booking cancelled. Cancelling twice is harmless.
pub fn cancel_booking<S: BookingStore + ?Sized>(
    store: &mut S,
    id: BookingId,
) -> Result<Booking, CancellationError> {
    let booking = store
        .set_booking_status(id, BookingStatus::Cancelled)?
        .ok_or(CancellationError::UnknownBooking(id))?;
    info!(booking = %id, "booking cancelled");
    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{Directory, MemoryDirectory};
    use crate::domain::{
        Bus, BusId, DepartureStatus, Route, RouteId, ScheduledDeparture, Seat, Station,
    };
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn store() -> MemoryDirectory {
        let mut dir = MemoryDirectory::new();
        for (id, name) in [(1, "Cairo"), (2, "Giza"), (3, "AlMinya"), (4, "Asyut")] {
            dir.insert_station(Station::new(StationId(id), name)).unwrap();
        }
        dir.insert_route(
            Route::from_stations(
                RouteId(1),
                "Cairo-Asyut",
                vec![StationId(1), StationId(2), StationId(3), StationId(4)],
            )
            .unwrap(),
        )
        .unwrap();
        dir.insert_bus(
            Bus::new(
                BusId(1),
                "A01",
                None,
                2,
                vec![Seat::new(SeatId(1), "S1"), Seat::new(SeatId(2), "S2")],
            )
            .unwrap(),
        )
        .unwrap();
        let departs = now() + Duration::days(1);
        for (id, status) in [
            (1, DepartureStatus::Scheduled),
            (2, DepartureStatus::Cancelled),
        ] {
            dir.insert_departure(
                ScheduledDeparture::new(
                    DepartureId(id),
                    RouteId(1),
                    BusId(1),
                    departs,
                    departs + Duration::hours(6),
                    status,
                )
                .unwrap(),
            )
            .unwrap();
        }
        dir
    }

    fn request(seat: u64, from: u64, to: u64) -> NewBooking {
        NewBooking {
            departure: DepartureId(1),
            seat: SeatId(seat),
            start_station: StationId(from),
            end_station: StationId(to),
        }
    }

    #[test]
    fn reserve_confirms_free_seat() {
        let mut dir = store();
        let config = AvailabilityConfig::default();

        let booking = reserve_seat(&mut dir, &config, request(1, 1, 3), now()).unwrap();

        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.booked_at, now());
        assert_eq!(dir.booking(booking.id).unwrap(), Some(booking));
    }

    #[test]
    fn second_overlapping_reservation_conflicts() {
        let mut dir = store();
        let config = AvailabilityConfig::default();
        reserve_seat(&mut dir, &config, request(1, 1, 3), now()).unwrap();

        let err = reserve_seat(&mut dir, &config, request(1, 2, 4), now()).unwrap_err();
        assert!(matches!(err, ReservationError::SeatUnavailable { .. }));
        assert_eq!(dir.booking_count(), 1);
    }

    #[test]
    fn adjacent_reservations_both_succeed() {
        let mut dir = store();
        let config = AvailabilityConfig::default();

        let first = reserve_seat(&mut dir, &config, request(1, 1, 3), now()).unwrap();
        let second = reserve_seat(&mut dir, &config, request(1, 3, 4), now()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn same_station_is_rejected() {
        let mut dir = store();
        let config = AvailabilityConfig::default();
        assert_eq!(
            reserve_seat(&mut dir, &config, request(1, 2, 2), now()),
            Err(ReservationError::SameStation(StationId(2)))
        );
    }

    #[test]
    fn reversed_stations_are_unavailable() {
        let mut dir = store();
        let config = AvailabilityConfig::default();
        let err = reserve_seat(&mut dir, &config, request(1, 4, 1), now()).unwrap_err();
        assert!(matches!(err, ReservationError::SeatUnavailable { .. }));
    }

    #[test]
    fn unknown_and_cancelled_departures_are_rejected() {
        let mut dir = store();
        let config = AvailabilityConfig::default();

        let mut unknown = request(1, 1, 2);
        unknown.departure = DepartureId(9);
        assert_eq!(
            reserve_seat(&mut dir, &config, unknown, now()),
            Err(ReservationError::UnknownDeparture(DepartureId(9)))
        );

        let mut cancelled = request(1, 1, 2);
        cancelled.departure = DepartureId(2);
        assert_eq!(
            reserve_seat(&mut dir, &config, cancelled, now()),
            Err(ReservationError::DepartureNotBookable {
                departure: DepartureId(2),
                status: "cancelled",
            })
        );
    }

    #[test]
    fn cancelling_frees_the_seat() {
        let mut dir = store();
        let config = AvailabilityConfig::default();
        let booking = reserve_seat(&mut dir, &config, request(2, 1, 4), now()).unwrap();

        let cancelled = cancel_booking(&mut dir, booking.id).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        // Idempotent
        assert_eq!(cancel_booking(&mut dir, booking.id).unwrap().status, BookingStatus::Cancelled);

        assert!(reserve_seat(&mut dir, &config, request(2, 2, 3), now()).is_ok());
    }

    #[test]
    fn cancelling_unknown_booking_fails() {
        let mut dir = store();
        assert_eq!(
            cancel_booking(&mut dir, BookingId(42)),
            Err(CancellationError::UnknownBooking(BookingId(42)))
        );
    }
}
