//! Departure selection criteria.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{DepartureStatus, Route, ScheduledDeparture, StationId};

/// Criteria for selecting scheduled departures.
///
/// Every populated field must match. An empty filter matches everything.
///
/// # Examples
///
/// ```
/// use seat_server::directory::DepartureFilter;
/// use seat_server::domain::{DepartureStatus, StationId};
///
/// let filter = DepartureFilter::new()
///     .with_status(DepartureStatus::Scheduled)
///     .through(StationId(1))
///     .through(StationId(5));
///
/// assert_eq!(filter.through.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureFilter {
    /// Required lifecycle status
    pub status: Option<DepartureStatus>,
    /// Stations the route must call at (in any order)
    pub through: Vec<StationId>,
    /// Calendar date the departure must leave on
    pub on_date: Option<NaiveDate>,
    /// Instant the departure must leave strictly after
    pub departing_after: Option<NaiveDateTime>,
    /// Instant the departure must leave at or after
    pub departing_from: Option<NaiveDateTime>,
}

impl DepartureFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: DepartureStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requires the route to call at `station`.
    pub fn through(mut self, station: StationId) -> Self {
        self.through.push(station);
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.on_date = Some(date);
        self
    }

    pub fn departing_after(mut self, instant: NaiveDateTime) -> Self {
        self.departing_after = Some(instant);
        self
    }

    pub fn departing_from(mut self, instant: NaiveDateTime) -> Self {
        self.departing_from = Some(instant);
        self
    }

    /// Returns true if `departure`, running `route`, satisfies every criterion.
    pub fn matches(&self, departure: &ScheduledDeparture, route: &Route) -> bool {
        if self.status.is_some_and(|s| s != departure.status()) {
            return false;
        }
        if self
            .on_date
            .is_some_and(|d| departure.departure_time().date() != d)
        {
            return false;
        }
        if self
            .departing_after
            .is_some_and(|t| departure.departure_time() <= t)
        {
            return false;
        }
        if self
            .departing_from
            .is_some_and(|t| departure.departure_time() < t)
        {
            return false;
        }
        self.through.iter().all(|&s| route.calls_at(s))
    }
}
