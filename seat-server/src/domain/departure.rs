//! Scheduled departures: one timed run of a route on a bus.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{BusId, DepartureId, DomainError, RouteId};

/// Lifecycle of a scheduled departure.
///
/// Only `Scheduled` departures are offered for booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl DepartureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DepartureStatus::Scheduled => "scheduled",
            DepartureStatus::Completed => "completed",
            DepartureStatus::Cancelled => "cancelled",
        }
    }
}

/// A route run on a specific bus at specific times.
///
/// # Invariants
///
/// - `arrival_time >= departure_time`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledDeparture {
    id: DepartureId,
    route: RouteId,
    bus: BusId,
    departure_time: NaiveDateTime,
    arrival_time: NaiveDateTime,
    status: DepartureStatus,
}

impl ScheduledDeparture {
    /// Creates a departure, rejecting an arrival earlier than the departure.
    pub fn new(
        id: DepartureId,
        route: RouteId,
        bus: BusId,
        departure_time: NaiveDateTime,
        arrival_time: NaiveDateTime,
        status: DepartureStatus,
    ) -> Result<Self, DomainError> {
        if arrival_time < departure_time {
            return Err(DomainError::ArrivalBeforeDeparture(id));
        }
        Ok(Self {
            id,
            route,
            bus,
            departure_time,
            arrival_time,
            status,
        })
    }

    pub fn id(&self) -> DepartureId {
        self.id
    }

    pub fn route(&self) -> RouteId {
        self.route
    }

    pub fn bus(&self) -> BusId {
        self.bus
    }

    /// Departure from the route's origin.
    pub fn departure_time(&self) -> NaiveDateTime {
        self.departure_time
    }

    /// Arrival at the route's destination.
    pub fn arrival_time(&self) -> NaiveDateTime {
        self.arrival_time
    }

    pub fn status(&self) -> DepartureStatus {
        self.status
    }

    /// Total scheduled running time, origin to destination (never negative).
    pub fn duration(&self) -> Duration {
        self.arrival_time.signed_duration_since(self.departure_time)
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == DepartureStatus::Scheduled
    }
}
