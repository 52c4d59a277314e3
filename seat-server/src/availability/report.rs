//! Availability report types.

use chrono::{NaiveDate, NaiveDateTime};

use super::segment::Segment;
use crate::domain::{BusId, DepartureId, RouteId, Seat, Station, StationId};

/// A route query: which seats are free from `start_station` to
/// `end_station`, on a given date or on any future departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatQuery {
    pub start_station: StationId,
    pub end_station: StationId,
    /// Restrict to departures leaving on this date. `None` means every
    /// departure strictly after the current instant.
    pub date: Option<NaiveDate>,
}

impl SeatQuery {
    pub fn new(start_station: StationId, end_station: StationId) -> Self {
        Self {
            start_station,
            end_station,
            date: None,
        }
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// The route a departure runs, with its terminal stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub id: RouteId,
    pub name: String,
    pub origin: Station,
    pub destination: Station,
}

/// The requested span of the journey with estimated times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSummary {
    pub from: Station,
    pub to: Station,
    /// Resolved ordinals on the route
    pub ordinals: Segment,
    /// Estimated departure from `from`
    pub departure_time: NaiveDateTime,
    /// Estimated arrival at `to`
    pub arrival_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusSummary {
    pub id: BusId,
    pub name: String,
    pub license_plate: Option<String>,
    pub capacity: u32,
}

/// Free seats on one scheduled departure for the queried segment.
///
/// Only built when at least one seat is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub scheduled_departure_id: DepartureId,
    pub route: RouteSummary,
    pub segment: SegmentSummary,
    pub bus: BusSummary,
    /// Scheduled departure from the route origin
    pub trip_departure_time: NaiveDateTime,
    /// Scheduled arrival at the route destination
    pub trip_arrival_time: NaiveDateTime,
    /// Free seats, in roster order
    pub available_seats: Vec<Seat>,
}

impl AvailabilityReport {
    /// Number of free seats; always `available_seats.len()`.
    pub fn available_seats_count(&self) -> usize {
        self.available_seats.len()
    }
}
