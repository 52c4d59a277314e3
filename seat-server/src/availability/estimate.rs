//! Proportional segment time estimates.
//!
//! Intermediate stops have no timetable of their own. Their times are
//! interpolated linearly across the whole run: the instant at ordinal `k`
//! on an `N`-stop route is `departure + duration * k / (N - 1)`, always
//! measured from the origin departure.

use chrono::{Duration, NaiveDateTime};

use super::segment::Segment;
use crate::domain::{Ordinal, ScheduledDeparture};

/// Estimated instant the bus reaches `ordinal`, for a run leaving the
/// origin at `departure` and taking `duration` end to end.
///
/// Returns `None` for routes shorter than two stops, where the formula is
/// undefined. Computed in whole seconds, rounding towards the origin.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use seat_server::availability::estimate_time_at;
/// use seat_server::domain::Ordinal;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let departs = day.and_hms_opt(8, 0, 0).unwrap();
///
/// // Five stops, six hours: 90 minutes per leg
/// let giza = estimate_time_at(departs, Duration::hours(6), 5, Ordinal(1)).unwrap();
/// assert_eq!(giza, day.and_hms_opt(9, 30, 0).unwrap());
/// ```
pub fn estimate_time_at(
    departure: NaiveDateTime,
    duration: Duration,
    route_len: usize,
    ordinal: Ordinal,
) -> Option<NaiveDateTime> {
    if route_len < 2 {
        return None;
    }
    let total = duration.num_seconds();
    let legs = i64::try_from(route_len - 1).ok()?;
    let k = i64::try_from(ordinal.0).ok()?;
    let offset = total.checked_mul(k)? / legs;
    departure.checked_add_signed(Duration::seconds(offset))
}

/// Estimated boarding and alighting instants for `segment`.
pub fn estimate_segment_times(
    departure: &ScheduledDeparture,
    route_len: usize,
    segment: Segment,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (departs, duration) = (departure.departure_time(), departure.duration());
    let board = estimate_time_at(departs, duration, route_len, segment.start())?;
    let alight = estimate_time_at(departs, duration, route_len, segment.end())?;
    Some((board, alight))
}
