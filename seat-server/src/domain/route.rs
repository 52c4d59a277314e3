//! Routes and their ordered stops.
//!
//! A `Route` is the authoring-time guard for stop sequences: once built, its
//! stops are sorted, their orders run 0..N-1 without gaps, every station
//! appears at most once, and there are at least two of them. The availability
//! engine relies on these facts instead of re-checking them per query.

use std::collections::HashSet;

use super::{DomainError, Ordinal, RouteId, StationId};

/// A station's position on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stop {
    /// The station called at
    pub station: StationId,
    /// Position along the route
    pub order: Ordinal,
}

impl Stop {
    pub fn new(station: StationId, order: Ordinal) -> Self {
        Self { station, order }
    }
}

/// A named route through an ordered sequence of stations.
///
/// # Invariants
///
/// - At least two stops
/// - Stop orders are exactly `0..N-1`, stored in order
/// - Each station appears once
///
/// # Examples
///
/// ```
/// use seat_server::domain::{Route, RouteId, StationId};
///
/// let route = Route::from_stations(
///     RouteId(1),
///     "Cairo-Asyut Express",
///     vec![StationId(1), StationId(2), StationId(3)],
/// )
/// .unwrap();
///
/// assert_eq!(route.stop_count(), 3);
/// assert_eq!(route.origin(), StationId(1));
/// assert_eq!(route.destination(), StationId(3));
///
/// // A station may not be visited twice
/// assert!(Route::from_stations(RouteId(2), "Loop", vec![StationId(1), StationId(2), StationId(1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    id: RouteId,
    name: String,
    stops: Vec<Stop>,
}

impl Route {
    /// Builds a route from explicit stops, in any order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are fewer than two stops, a station repeats,
    /// or the orders are not exactly `0..N-1`.
    pub fn new(id: RouteId, name: impl Into<String>, mut stops: Vec<Stop>) -> Result<Self, DomainError> {
        if stops.len() < 2 {
            return Err(DomainError::RouteTooShort {
                route: id,
                stops: stops.len(),
            });
        }

        let mut seen = HashSet::with_capacity(stops.len());
        for stop in &stops {
            if !seen.insert(stop.station) {
                return Err(DomainError::DuplicateStation {
                    route: id,
                    station: stop.station,
                });
            }
        }

        stops.sort_by_key(|s| s.order);
        if stops.iter().enumerate().any(|(i, s)| s.order != Ordinal(i)) {
            return Err(DomainError::NonContiguousOrder { route: id });
        }

        Ok(Self {
            id,
            name: name.into(),
            stops,
        })
    }

    /// Builds a route whose stop orders follow the given station sequence.
    pub fn from_stations(
        id: RouteId,
        name: impl Into<String>,
        stations: Vec<StationId>,
    ) -> Result<Self, DomainError> {
        let stops = stations
            .into_iter()
            .enumerate()
            .map(|(i, station)| Stop::new(station, Ordinal(i)))
            .collect();
        Self::new(id, name, stops)
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stops in route order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the number of stops (always at least 2).
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Returns the first station.
    pub fn origin(&self) -> StationId {
        // Safe: at least two stops, validated at construction
        self.stops[0].station
    }

    /// Returns the last station.
    pub fn destination(&self) -> StationId {
        self.stops[self.stops.len() - 1].station
    }

    /// Returns true if the route calls at `station`.
    pub fn calls_at(&self, station: StationId) -> bool {
        self.stops.iter().any(|s| s.station == station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations(ids: &[u64]) -> Vec<StationId> {
        ids.iter().copied().map(StationId).collect()
    }

    #[test]
    fn sorts_stops_by_order() {
        let stops = vec![
            Stop::new(StationId(30), Ordinal(2)),
            Stop::new(StationId(10), Ordinal(0)),
            Stop::new(StationId(20), Ordinal(1)),
        ];
        let route = Route::new(RouteId(1), "R", stops).unwrap();

        let order: Vec<_> = route.stops().iter().map(|s| s.station).collect();
        assert_eq!(order, stations(&[10, 20, 30]));
        assert_eq!(route.origin(), StationId(10));
        assert_eq!(route.destination(), StationId(30));
    }

    #[test]
    fn rejects_single_stop() {
        let err = Route::from_stations(RouteId(1), "R", stations(&[1])).unwrap_err();
        assert_eq!(
            err,
            DomainError::RouteTooShort {
                route: RouteId(1),
                stops: 1
            }
        );
        assert!(Route::from_stations(RouteId(1), "R", vec![]).is_err());
    }

    #[test]
    fn rejects_duplicate_station() {
        let err = Route::from_stations(RouteId(4), "R", stations(&[1, 2, 1])).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateStation {
                route: RouteId(4),
                station: StationId(1)
            }
        );
    }

    #[test]
    fn rejects_gap_in_orders() {
        let stops = vec![
            Stop::new(StationId(1), Ordinal(0)),
            Stop::new(StationId(2), Ordinal(2)),
        ];
        assert_eq!(
            Route::new(RouteId(1), "R", stops).unwrap_err(),
            DomainError::NonContiguousOrder { route: RouteId(1) }
        );
    }

    #[test]
    fn rejects_orders_not_starting_at_zero() {
        let stops = vec![
            Stop::new(StationId(1), Ordinal(1)),
            Stop::new(StationId(2), Ordinal(2)),
        ];
        assert!(Route::new(RouteId(1), "R", stops).is_err());
    }

    #[test]
    fn rejects_repeated_order() {
        let stops = vec![
            Stop::new(StationId(1), Ordinal(0)),
            Stop::new(StationId(2), Ordinal(0)),
        ];
        assert!(Route::new(RouteId(1), "R", stops).is_err());
    }

    #[test]
    fn calls_at() {
        let route = Route::from_stations(RouteId(1), "R", stations(&[1, 2, 3])).unwrap();
        assert!(route.calls_at(StationId(2)));
        assert!(!route.calls_at(StationId(9)));
    }
}
