//! Seat availability over ordinal segments.
//!
//! Answers two questions against the confirmed-booking ledger:
//! is one seat free for a segment of one departure, and which seats are
//! free on every departure serving a station pair. Nothing is cached or
//! reserved; every call re-reads the directory.
//!
//! Expected "no" answers (unknown departure, station off the route,
//! stations in the wrong order, seat on another bus) come back as
//! `Ok(false)` or an omitted report. Only directory failures are `Err`.

use tracing::{debug, trace, warn};

use super::config::{AvailabilityConfig, UnresolvedBookingPolicy};
use super::estimate::estimate_segment_times;
use super::report::{AvailabilityReport, BusSummary, RouteSummary, SeatQuery, SegmentSummary};
use super::resolver::resolve_segment;
use super::segment::Segment;
use crate::directory::{DepartureFilter, Directory, DirectoryError};
use crate::domain::{
    DepartureId, DepartureStatus, Route, ScheduledDeparture, SeatId, StationId,
};

/// Availability checks over a directory.
///
/// Holds borrowed handles only; cheap to build per request.
pub struct SeatAvailability<'a, D: ?Sized> {
    directory: &'a D,
    config: &'a AvailabilityConfig,
}

impl<'a, D: Directory + ?Sized> SeatAvailability<'a, D> {
    pub fn new(directory: &'a D, config: &'a AvailabilityConfig) -> Self {
        Self { directory, config }
    }

    /// Returns true if `seat` is free from `start` to `end` on `departure`.
    ///
    /// Read-only: a `true` answer is advisory and reserves nothing. Callers
    /// that go on to book must check and insert under one exclusive lock
    /// (see `booking::reserve_seat`).
    pub fn is_seat_available(
        &self,
        departure: DepartureId,
        seat: SeatId,
        start: StationId,
        end: StationId,
    ) -> Result<bool, DirectoryError> {
        let Some(departure) = self.directory.departure(departure)? else {
            debug!(%departure, "unknown departure");
            return Ok(false);
        };
        let Some(route) = self.directory.route(departure.route())? else {
            warn!(departure = %departure.id(), route = %departure.route(), "departure references missing route");
            return Ok(false);
        };
        let Some(requested) = resolve_segment(route.stops(), start, end) else {
            debug!(%start, %end, route = %route.id(), "stations do not form a segment on route");
            return Ok(false);
        };
        let Some(bus) = self.directory.bus(departure.bus())? else {
            warn!(departure = %departure.id(), bus = %departure.bus(), "departure references missing bus");
            return Ok(false);
        };
        if !bus.has_seat(seat) {
            debug!(%seat, bus = %bus.id(), "seat is not on this bus");
            return Ok(false);
        }

        self.seat_is_free(&departure, &route, seat, requested)
    }

    /// Lists free seats on every scheduled departure serving the query.
    ///
    /// Candidates are scheduled departures whose route calls at both
    /// stations and that leave on `query.date`, or strictly after `now`
    /// when no date is given. A candidate that visits the stations in the
    /// wrong order, or has no free seat, is left out. Reports are ordered
    /// by departure time.
    pub fn list_available_seats(
        &self,
        query: &SeatQuery,
        now: chrono::NaiveDateTime,
    ) -> Result<Vec<AvailabilityReport>, DirectoryError> {
        let filter = DepartureFilter::new()
            .with_status(DepartureStatus::Scheduled)
            .through(query.start_station)
            .through(query.end_station);
        let filter = match query.date {
            Some(date) => filter.on_date(date),
            None => filter.departing_after(now),
        };

        let candidates = self.directory.departures(&filter)?;
        debug!(
            start = %query.start_station,
            end = %query.end_station,
            candidates = candidates.len(),
            "evaluating departures"
        );

        let mut reports = Vec::new();
        for departure in &candidates {
            if let Some(report) = self.report_for(departure, query)? {
                reports.push(report);
            }
        }
        reports.sort_by_key(|r| (r.trip_departure_time, r.scheduled_departure_id));
        Ok(reports)
    }

    /// Builds the report for one candidate, or `None` if it does not qualify.
    fn report_for(
        &self,
        departure: &ScheduledDeparture,
        query: &SeatQuery,
    ) -> Result<Option<AvailabilityReport>, DirectoryError> {
        let Some(route) = self.directory.route(departure.route())? else {
            warn!(departure = %departure.id(), "departure references missing route");
            return Ok(None);
        };
        let Some(requested) =
            resolve_segment(route.stops(), query.start_station, query.end_station)
        else {
            trace!(departure = %departure.id(), "route runs the other way; skipping");
            return Ok(None);
        };
        let Some(bus) = self.directory.bus(departure.bus())? else {
            warn!(departure = %departure.id(), "departure references missing bus");
            return Ok(None);
        };

        let mut available_seats = Vec::new();
        for seat in bus.seats() {
            if self.seat_is_free(departure, &route, seat.id, requested)? {
                available_seats.push(seat.clone());
            }
        }
        if available_seats.is_empty() {
            debug!(departure = %departure.id(), "no free seats; omitting");
            return Ok(None);
        }

        let Some((segment_departure, segment_arrival)) =
            estimate_segment_times(departure, route.stop_count(), requested)
        else {
            return Ok(None);
        };

        let stations = (
            self.directory.station(query.start_station)?,
            self.directory.station(query.end_station)?,
            self.directory.station(route.origin())?,
            self.directory.station(route.destination())?,
        );
        let (Some(from), Some(to), Some(origin), Some(destination)) = stations else {
            warn!(departure = %departure.id(), "route references missing station");
            return Ok(None);
        };

        Ok(Some(AvailabilityReport {
            scheduled_departure_id: departure.id(),
            route: RouteSummary {
                id: route.id(),
                name: route.name().to_string(),
                origin,
                destination,
            },
            segment: SegmentSummary {
                from,
                to,
                ordinals: requested,
                departure_time: segment_departure,
                arrival_time: segment_arrival,
            },
            bus: BusSummary {
                id: bus.id(),
                name: bus.name().to_string(),
                license_plate: bus.license_plate().map(str::to_string),
                capacity: bus.capacity(),
            },
            trip_departure_time: departure.departure_time(),
            trip_arrival_time: departure.arrival_time(),
            available_seats,
        }))
    }

    /// Scans the seat's confirmed bookings for one that overlaps `requested`.
    ///
    /// Each booking's stations are resolved afresh against `route`.
    fn seat_is_free(
        &self,
        departure: &ScheduledDeparture,
        route: &Route,
        seat: SeatId,
        requested: Segment,
    ) -> Result<bool, DirectoryError> {
        let bookings = self.directory.confirmed_bookings(departure.id(), seat)?;

        for booking in bookings.iter().filter(|b| b.is_confirmed()) {
            match resolve_segment(route.stops(), booking.start_station, booking.end_station) {
                Some(held) if held.overlaps(&requested) => {
                    trace!(%seat, booking = %booking.id, %held, %requested, "conflict");
                    return Ok(false);
                }
                Some(_) => {}
                None => match self.config.unresolved_bookings {
                    UnresolvedBookingPolicy::Ignore => {
                        debug!(booking = %booking.id, route = %route.id(), "booking does not resolve on route; ignoring");
                    }
                    UnresolvedBookingPolicy::Block => {
                        debug!(booking = %booking.id, route = %route.id(), "booking does not resolve on route; blocking seat");
                        return Ok(false);
                    }
                },
            }
        }

        Ok(true)
    }
}
