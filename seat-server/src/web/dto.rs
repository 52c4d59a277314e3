//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityReport;
use crate::domain::{
    Booking, BookingId, Bus, BusId, DepartureId, Route, RouteId, ScheduledDeparture, Seat, SeatId,
    Station, StationId,
};

/// Wire format for every timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Envelope around every successful JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }
    }
}

/// Envelope around every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,

    pub message: String,

    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

// ─── Requests ───
//
// Query fields arrive as strings so that missing or malformed values can be
// reported per field instead of as an extractor rejection.

/// Query for scheduled trips.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduledTripsRequest {
    /// Date in YYYY-MM-DD format
    pub date: Option<String>,
}

/// Query for free seats between two stations.
#[derive(Debug, Default, Deserialize)]
pub struct AvailableSeatsRequest {
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,

    /// Date in YYYY-MM-DD format (defaults to every future departure)
    pub date: Option<String>,
}

/// Query for one seat's availability on a trip.
#[derive(Debug, Default, Deserialize)]
pub struct SeatSegmentRequest {
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
}

/// Body of a booking request.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookingRequest {
    pub scheduled_trip_id: Option<u64>,
    pub seat_id: Option<u64>,
    pub start_station_id: Option<u64>,
    pub end_station_id: Option<u64>,
}

// ─── Responses ───

/// A station.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: StationId,
    pub name: String,
    pub city: Option<String>,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id,
            name: station.name.clone(),
            city: station.city.clone(),
        }
    }
}

/// A stop on a route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub stop_order: usize,
    pub station: StationResult,
}

/// A route with its terminals and, where requested, its stops.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub id: RouteId,
    pub name: String,
    pub origin_station: StationResult,
    pub destination_station: StationResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<StopResult>>,
}

impl TripResult {
    /// Builds the route view. `station` looks up each stop's station.
    ///
    /// Returns `None` if any station is missing.
    pub fn from_route(route: &Route, station: impl Fn(StationId) -> Option<Station>) -> Option<Self> {
        let stops = route
            .stops()
            .iter()
            .map(|stop| {
                station(stop.station).map(|s| StopResult {
                    stop_order: stop.order.0,
                    station: StationResult::from_station(&s),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            id: route.id(),
            name: route.name().to_string(),
            origin_station: StationResult::from_station(&station(route.origin())?),
            destination_station: StationResult::from_station(&station(route.destination())?),
            stops: Some(stops),
        })
    }
}

/// A bus.
#[derive(Debug, Serialize)]
pub struct BusResult {
    pub id: BusId,
    pub name: String,
    pub license_plate: Option<String>,
    pub capacity: u32,
}

impl BusResult {
    pub fn from_bus(bus: &Bus) -> Self {
        Self {
            id: bus.id(),
            name: bus.name().to_string(),
            license_plate: bus.license_plate().map(str::to_string),
            capacity: bus.capacity(),
        }
    }
}

/// A scheduled trip.
#[derive(Debug, Serialize)]
pub struct ScheduledTripResult {
    pub id: DepartureId,
    pub status: &'static str,
    pub departure_time: String,
    pub arrival_time: String,
    pub trip: TripResult,
    pub bus: BusResult,
}

impl ScheduledTripResult {
    pub fn from_departure(departure: &ScheduledDeparture, trip: TripResult, bus: &Bus) -> Self {
        Self {
            id: departure.id(),
            status: departure.status().as_str(),
            departure_time: format_timestamp(departure.departure_time()),
            arrival_time: format_timestamp(departure.arrival_time()),
            trip,
            bus: BusResult::from_bus(bus),
        }
    }
}

/// A free seat.
#[derive(Debug, Serialize)]
pub struct SeatResult {
    pub seat_id: SeatId,
    pub seat_number: String,
}

impl SeatResult {
    pub fn from_seat(seat: &Seat) -> Self {
        Self {
            seat_id: seat.id,
            seat_number: seat.label.clone(),
        }
    }
}

/// The requested span of a trip.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub from_station: StationResult,
    pub to_station: StationResult,

    /// Estimated departure from `from_station`
    pub departure_time: String,

    /// Estimated arrival at `to_station`
    pub arrival_time: String,
}

/// Free seats on one trip for the requested segment.
#[derive(Debug, Serialize)]
pub struct AvailabilityResult {
    pub scheduled_trip_id: DepartureId,
    pub trip: TripResult,
    pub segment: SegmentResult,
    pub bus: BusResult,
    pub trip_departure_time: String,
    pub trip_arrival_time: String,
    pub available_seats_count: usize,
    pub available_seats: Vec<SeatResult>,
}

impl AvailabilityResult {
    pub fn from_report(report: &AvailabilityReport) -> Self {
        Self {
            scheduled_trip_id: report.scheduled_departure_id,
            trip: TripResult {
                id: report.route.id,
                name: report.route.name.clone(),
                origin_station: StationResult::from_station(&report.route.origin),
                destination_station: StationResult::from_station(&report.route.destination),
                stops: None,
            },
            segment: SegmentResult {
                from_station: StationResult::from_station(&report.segment.from),
                to_station: StationResult::from_station(&report.segment.to),
                departure_time: format_timestamp(report.segment.departure_time),
                arrival_time: format_timestamp(report.segment.arrival_time),
            },
            bus: BusResult {
                id: report.bus.id,
                name: report.bus.name.clone(),
                license_plate: report.bus.license_plate.clone(),
                capacity: report.bus.capacity,
            },
            trip_departure_time: format_timestamp(report.trip_departure_time),
            trip_arrival_time: format_timestamp(report.trip_arrival_time),
            available_seats_count: report.available_seats_count(),
            available_seats: report.available_seats.iter().map(SeatResult::from_seat).collect(),
        }
    }
}

/// Answer for a single seat check.
#[derive(Debug, Serialize)]
pub struct SeatAvailabilityResult {
    pub scheduled_trip_id: DepartureId,
    pub seat_id: SeatId,
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub available: bool,
}

/// A booking.
#[derive(Debug, Serialize)]
pub struct BookingResult {
    pub id: BookingId,
    pub status: &'static str,
    pub booked_at: String,
    pub scheduled_trip_id: DepartureId,
    pub seat_id: SeatId,

    /// Seat label, if the seat is still on the bus
    pub seat_number: Option<String>,

    pub start_station: StationResult,
    pub end_station: StationResult,
}

impl BookingResult {
    pub fn from_booking(
        booking: &Booking,
        seat_number: Option<String>,
        start: &Station,
        end: &Station,
    ) -> Self {
        Self {
            id: booking.id,
            status: booking.status.as_str(),
            booked_at: format_timestamp(booking.booked_at),
            scheduled_trip_id: booking.departure,
            seat_id: booking.seat,
            seat_number,
            start_station: StationResult::from_station(start),
            end_station: StationResult::from_station(end),
        }
    }
}
