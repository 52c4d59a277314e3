//! Station-to-ordinal resolution.

use super::segment::Segment;
use crate::domain::{Ordinal, StationId, Stop};

/// Returns the order of `station` within `stops`, or `None` if the route
/// does not call there.
///
/// Looks up by station identity, not by slice position, so `stops` need
/// not be sorted. If a station were listed twice the first match wins;
/// `Route` rejects such sequences when it is built.
///
/// # Examples
///
/// ```
/// use seat_server::availability::ordinal_of;
/// use seat_server::domain::{Ordinal, StationId, Stop};
///
/// let stops = [
///     Stop::new(StationId(20), Ordinal(1)),
///     Stop::new(StationId(10), Ordinal(0)),
/// ];
/// assert_eq!(ordinal_of(&stops, StationId(20)), Some(Ordinal(1)));
/// assert_eq!(ordinal_of(&stops, StationId(30)), None);
/// ```
pub fn ordinal_of(stops: &[Stop], station: StationId) -> Option<Ordinal> {
    stops.iter().find(|s| s.station == station).map(|s| s.order)
}

/// Resolves a boarding and alighting station to a segment on `stops`.
///
/// Returns `None` if either station is absent or the route visits them in
/// the wrong order (or they are the same station).
pub fn resolve_segment(stops: &[Stop], start: StationId, end: StationId) -> Option<Segment> {
    let start = ordinal_of(stops, start)?;
    let end = ordinal_of(stops, end)?;
    Segment::new(start, end).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(ids: &[u64]) -> Vec<Stop> {
        ids.iter()
            .enumerate()
            .map(|(i, &id)| Stop::new(StationId(id), Ordinal(i)))
            .collect()
    }

    #[test]
    fn finds_each_position() {
        let route = stops(&[1, 2, 3, 4, 5]);
        for (i, id) in (1..=5).enumerate() {
            assert_eq!(ordinal_of(&route, StationId(id)), Some(Ordinal(i)));
        }
    }

    #[test]
    fn absent_station() {
        assert_eq!(ordinal_of(&stops(&[1, 2]), StationId(3)), None);
        assert_eq!(ordinal_of(&[], StationId(1)), None);
    }

    #[test]
    fn first_match_wins() {
        let raw = vec![
            Stop::new(StationId(7), Ordinal(0)),
            Stop::new(StationId(8), Ordinal(1)),
            Stop::new(StationId(7), Ordinal(2)),
        ];
        assert_eq!(ordinal_of(&raw, StationId(7)), Some(Ordinal(0)));
    }

    #[test]
    fn resolve_forward_segment() {
        let route = stops(&[1, 2, 3, 4, 5]);
        let seg = resolve_segment(&route, StationId(2), StationId(4)).unwrap();
        assert_eq!((seg.start(), seg.end()), (Ordinal(1), Ordinal(3)));
    }

    #[test]
    fn resolve_rejects_reverse_and_same_station() {
        let route = stops(&[1, 2, 3]);
        assert!(resolve_segment(&route, StationId(3), StationId(1)).is_none());
        assert!(resolve_segment(&route, StationId(2), StationId(2)).is_none());
    }

    #[test]
    fn resolve_rejects_unknown_station() {
        let route = stops(&[1, 2, 3]);
        assert!(resolve_segment(&route, StationId(1), StationId(9)).is_none());
        assert!(resolve_segment(&route, StationId(9), StationId(3)).is_none());
    }
}
