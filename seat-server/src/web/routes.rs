//! HTTP route handlers.

use std::collections::{BTreeMap, HashMap};

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::availability::{SeatAvailability, SeatQuery};
use crate::booking::{self, CancellationError, NewBooking, ReservationError};
use crate::directory::{DepartureFilter, Directory, DirectoryError, MemoryDirectory};
use crate::domain::{
    Booking, BookingId, DepartureId, DepartureStatus, SeatId, Station, StationId,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/stations", get(list_stations))
        .route("/api/v1/stations/:id", get(show_station))
        .route("/api/v1/trips/scheduled", get(scheduled_trips))
        .route("/api/v1/trips/available-seats", get(available_seats))
        .route(
            "/api/v1/trips/:id/seats/:seat_id/availability",
            get(seat_availability),
        )
        .route("/api/v1/bookings", post(create_booking))
        .route("/api/v1/bookings/:id", get(show_booking))
        .route("/api/v1/bookings/:id/cancel", post(cancel_booking))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The wall clock, read once per request.
fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stations, ordered by name.
async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StationResult>>>, AppError> {
    let directory = state.directory.read().await;
    let stations = directory
        .stations()?
        .iter()
        .map(StationResult::from_station)
        .collect();
    Ok(Json(ApiResponse::ok(
        stations,
        "Stations retrieved successfully.",
    )))
}

async fn show_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<StationResult>>, AppError> {
    let directory = state.directory.read().await;
    let station = directory
        .station(StationId(id))?
        .ok_or_else(|| AppError::not_found("Station not found."))?;
    Ok(Json(ApiResponse::ok(
        StationResult::from_station(&station),
        "Station retrieved successfully.",
    )))
}

/// Scheduled trips leaving from now on, optionally on one date.
async fn scheduled_trips(
    State(state): State<AppState>,
    Query(req): Query<ScheduledTripsRequest>,
) -> Result<Json<ApiResponse<Vec<ScheduledTripResult>>>, AppError> {
    let now = now();
    let mut v = Validator::default();
    let date = v.date("date", req.date.as_deref(), now.date());
    v.finish()?;

    let directory = state.directory.read().await;
    let mut filter = DepartureFilter::new()
        .with_status(DepartureStatus::Scheduled)
        .departing_from(now);
    if let Some(date) = date {
        filter = filter.on_date(date);
    }

    let stations: HashMap<StationId, Station> = directory
        .stations()?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let mut trips = Vec::new();
    for departure in directory.departures(&filter)? {
        let route = directory.route(departure.route())?;
        let bus = directory.bus(departure.bus())?;
        let trip = route
            .as_deref()
            .and_then(|r| TripResult::from_route(r, |id| stations.get(&id).cloned()));
        match (trip, bus) {
            (Some(trip), Some(bus)) => {
                trips.push(ScheduledTripResult::from_departure(&departure, trip, &bus));
            }
            _ => warn!(departure = %departure.id(), "departure has dangling references; skipping"),
        }
    }

    Ok(Json(ApiResponse::ok(
        trips,
        "Scheduled trips retrieved successfully.",
    )))
}

/// Free seats on every trip serving a station pair.
async fn available_seats(
    State(state): State<AppState>,
    Query(req): Query<AvailableSeatsRequest>,
) -> Result<Json<ApiResponse<Vec<AvailabilityResult>>>, AppError> {
    let now = now();
    let directory = state.directory.read().await;

    let mut v = Validator::default();
    let (start, end) = v.station_pair(
        &*directory,
        req.start_station_id.as_deref(),
        req.end_station_id.as_deref(),
    )?;
    let date = v.date("date", req.date.as_deref(), now.date());
    let query = match (start, end) {
        (Some(start), Some(end)) if v.is_empty() => SeatQuery {
            start_station: start,
            end_station: end,
            date,
        },
        _ => return Err(v.into_error()),
    };

    let reports = SeatAvailability::new(&*directory, &state.config)
        .list_available_seats(&query, now)?;
    let results = reports.iter().map(AvailabilityResult::from_report).collect();

    Ok(Json(ApiResponse::ok(
        results,
        "Available seats retrieved successfully.",
    )))
}

/// Whether one seat is free for a segment of one trip.
async fn seat_availability(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(u64, u64)>,
    Query(req): Query<SeatSegmentRequest>,
) -> Result<Json<ApiResponse<SeatAvailabilityResult>>, AppError> {
    let directory = state.directory.read().await;
    let departure = DepartureId(id);
    if directory.departure(departure)?.is_none() {
        return Err(AppError::not_found("Scheduled trip not found."));
    }

    let mut v = Validator::default();
    let (start, end) = v.station_pair(
        &*directory,
        req.start_station_id.as_deref(),
        req.end_station_id.as_deref(),
    )?;
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) if v.is_empty() => (start, end),
        _ => return Err(v.into_error()),
    };

    let available = SeatAvailability::new(&*directory, &state.config).is_seat_available(
        departure,
        SeatId(seat_id),
        start,
        end,
    )?;

    Ok(Json(ApiResponse::ok(
        SeatAvailabilityResult {
            scheduled_trip_id: departure,
            seat_id: SeatId(seat_id),
            start_station_id: start,
            end_station_id: end,
            available,
        },
        "Seat availability retrieved successfully.",
    )))
}

/// Book a seat for a segment.
async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: CreateBookingRequest = serde_json::from_slice(&body).map_err(|e| {
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    // Held across validation, check and insert
    let mut directory = state.directory.write().await;

    let mut v = Validator::default();
    let departure = match req.scheduled_trip_id.map(DepartureId) {
        None => {
            v.fail("scheduled_trip_id", "The scheduled trip ID is required.");
            None
        }
        Some(id) => {
            if directory.departure(id)?.is_none() {
                v.fail(
                    "scheduled_trip_id",
                    "The selected scheduled trip does not exist.",
                );
                None
            } else {
                Some(id)
            }
        }
    };
    let seat = match req.seat_id.map(SeatId) {
        None => {
            v.fail("seat_id", "The seat ID is required.");
            None
        }
        Some(id) => {
            if directory.seat_owner(id)?.is_none() {
                v.fail("seat_id", "The selected seat does not exist.");
                None
            } else {
                Some(id)
            }
        }
    };
    let start = req.start_station_id.map(|id| id.to_string());
    let end = req.end_station_id.map(|id| id.to_string());
    let (start, end) = v.station_pair(&*directory, start.as_deref(), end.as_deref())?;

    let request = match (departure, seat, start, end) {
        (Some(departure), Some(seat), Some(start), Some(end)) if v.is_empty() => NewBooking {
            departure,
            seat,
            start_station: start,
            end_station: end,
        },
        _ => return Err(v.into_error()),
    };

    let booking = booking::reserve_seat(&mut *directory, &state.config, request, now())?;
    let result = booking_result(&*directory, &booking)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(result, "Booking created successfully.")),
    )
        .into_response())
}

async fn show_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<BookingResult>>, AppError> {
    let directory = state.directory.read().await;
    let booking = directory
        .booking(BookingId(id))?
        .ok_or_else(|| AppError::not_found("Booking not found."))?;
    Ok(Json(ApiResponse::ok(
        booking_result(&*directory, &booking)?,
        "Booking retrieved successfully.",
    )))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<BookingResult>>, AppError> {
    let mut directory = state.directory.write().await;
    let booking = booking::cancel_booking(&mut *directory, BookingId(id))?;
    Ok(Json(ApiResponse::ok(
        booking_result(&*directory, &booking)?,
        "Booking cancelled successfully.",
    )))
}

/// Resolves the stations and seat label a booking refers to.
fn booking_result(
    directory: &MemoryDirectory,
    booking: &Booking,
) -> Result<BookingResult, AppError> {
    let seat_number = match directory.departure(booking.departure)? {
        Some(departure) => directory.bus(departure.bus())?.and_then(|bus| {
            bus.seats()
                .iter()
                .find(|s| s.id == booking.seat)
                .map(|s| s.label.clone())
        }),
        None => None,
    };
    let (Some(start), Some(end)) = (
        directory.station(booking.start_station)?,
        directory.station(booking.end_station)?,
    ) else {
        return Err(AppError::Internal {
            message: format!("{} references a missing station", booking.id),
        });
    };
    Ok(BookingResult::from_booking(booking, seat_number, &start, &end))
}

/// Collects per-field validation failures.
#[derive(Debug, Default)]
struct Validator {
    errors: BTreeMap<String, Vec<String>>,
}

impl Validator {
    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn finish(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    fn into_error(self) -> AppError {
        AppError::Validation {
            errors: self.errors,
        }
    }

    /// A required station id that must exist.
    fn station(
        &mut self,
        directory: &impl Directory,
        field: &str,
        label: &str,
        value: Option<&str>,
    ) -> Result<Option<StationId>, DirectoryError> {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            self.fail(field, &format!("The {label} ID is required."));
            return Ok(None);
        };
        let Ok(id) = value.parse::<u64>() else {
            self.fail(field, &format!("The {label} ID must be an integer."));
            return Ok(None);
        };
        if directory.station(StationId(id))?.is_none() {
            self.fail(field, &format!("The selected {label} does not exist."));
            return Ok(None);
        }
        Ok(Some(StationId(id)))
    }

    /// `start_station_id` and `end_station_id`, which must differ.
    fn station_pair(
        &mut self,
        directory: &impl Directory,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(Option<StationId>, Option<StationId>), DirectoryError> {
        let start = self.station(directory, "start_station_id", "start station", start)?;
        let end = self.station(directory, "end_station_id", "end station", end)?;
        if start.is_some() && start == end {
            self.fail(
                "end_station_id",
                "The end station must be different from the start station.",
            );
        }
        Ok((start, end))
    }

    /// An optional YYYY-MM-DD date no earlier than `today`.
    fn date(&mut self, field: &str, value: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
        let value = value.filter(|v| !v.is_empty())?;
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) if date >= today => Some(date),
            Ok(_) => {
                self.fail(field, "The date must be a date after or equal to today.");
                None
            }
            Err(_) => {
                self.fail(field, "The date is not a valid date.");
                None
            }
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Validation { errors: BTreeMap<String, Vec<String>> },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl AppError {
    fn not_found(message: &str) -> Self {
        AppError::NotFound {
            message: message.to_string(),
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        match e {
            ReservationError::SameStation(_) => AppError::Validation {
                errors: BTreeMap::from([(
                    "end_station_id".to_string(),
                    vec!["The end station must be different from the start station.".to_string()],
                )]),
            },
            ReservationError::UnknownDeparture(_) => AppError::not_found("Scheduled trip not found."),
            ReservationError::DepartureNotBookable { .. } => AppError::Conflict {
                message: e.to_string(),
            },
            ReservationError::SeatUnavailable { .. } => AppError::Conflict {
                message: "The selected seat is no longer available for this trip segment."
                    .to_string(),
            },
            ReservationError::Directory(e) => e.into(),
        }
    }
}

impl From<CancellationError> for AppError {
    fn from(e: CancellationError) -> Self {
        match e {
            CancellationError::UnknownBooking(_) => AppError::not_found("Booking not found."),
            CancellationError::Directory(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::Validation { errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed.".to_string(),
                Some(errors),
            ),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message, None),
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            errors,
        });
        (status, body).into_response()
    }
}
