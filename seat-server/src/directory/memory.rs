//! In-memory directory.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::{BookingStore, DepartureFilter, Directory, DirectoryError};
use crate::domain::{
    Booking, BookingId, BookingStatus, Bus, BusId, DepartureId, Route, RouteId, ScheduledDeparture,
    SeatId, Station, StationId,
};

/// Directory backed by ordered maps.
///
/// Inserts check referential integrity the way foreign keys would: a route
/// may only name known stations, a departure a known route and bus, and a
/// booking a known departure, known stations and a seat on that departure's
/// bus.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    stations: BTreeMap<StationId, Station>,
    routes: BTreeMap<RouteId, Arc<Route>>,
    buses: BTreeMap<BusId, Arc<Bus>>,
    /// Which bus each seat is fitted to.
    seat_owner: HashMap<SeatId, BusId>,
    departures: BTreeMap<DepartureId, ScheduledDeparture>,
    bookings: BTreeMap<BookingId, Booking>,
    next_booking: u64,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_station(&mut self, station: Station) -> Result<(), DirectoryError> {
        if self.stations.contains_key(&station.id) {
            return Err(DirectoryError::Duplicate {
                kind: "station",
                id: station.id.get(),
            });
        }
        self.stations.insert(station.id, station);
        Ok(())
    }

    pub fn insert_route(&mut self, route: Route) -> Result<(), DirectoryError> {
        if self.routes.contains_key(&route.id()) {
            return Err(DirectoryError::Duplicate {
                kind: "route",
                id: route.id().get(),
            });
        }
        for stop in route.stops() {
            self.require_station(stop.station)?;
        }
        self.routes.insert(route.id(), Arc::new(route));
        Ok(())
    }

    pub fn insert_bus(&mut self, bus: Bus) -> Result<(), DirectoryError> {
        if self.buses.contains_key(&bus.id()) {
            return Err(DirectoryError::Duplicate {
                kind: "bus",
                id: bus.id().get(),
            });
        }
        if let Some(seat) = bus.seats().iter().find(|s| self.seat_owner.contains_key(&s.id)) {
            return Err(DirectoryError::Duplicate {
                kind: "seat",
                id: seat.id.get(),
            });
        }
        for seat in bus.seats() {
            self.seat_owner.insert(seat.id, bus.id());
        }
        self.buses.insert(bus.id(), Arc::new(bus));
        Ok(())
    }

    pub fn insert_departure(&mut self, departure: ScheduledDeparture) -> Result<(), DirectoryError> {
        if self.departures.contains_key(&departure.id()) {
            return Err(DirectoryError::Duplicate {
                kind: "departure",
                id: departure.id().get(),
            });
        }
        if !self.routes.contains_key(&departure.route()) {
            return Err(DirectoryError::UnknownReference {
                kind: "route",
                id: departure.route().get(),
            });
        }
        if !self.buses.contains_key(&departure.bus()) {
            return Err(DirectoryError::UnknownReference {
                kind: "bus",
                id: departure.bus().get(),
            });
        }
        self.departures.insert(departure.id(), departure);
        Ok(())
    }

    /// Number of bookings in the ledger, whatever their status.
    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn require_station(&self, id: StationId) -> Result<(), DirectoryError> {
        if self.stations.contains_key(&id) {
            Ok(())
        } else {
            Err(DirectoryError::UnknownReference {
                kind: "station",
                id: id.get(),
            })
        }
    }
}

impl Directory for MemoryDirectory {
    fn station(&self, id: StationId) -> Result<Option<Station>, DirectoryError> {
        Ok(self.stations.get(&id).cloned())
    }

    fn stations(&self) -> Result<Vec<Station>, DirectoryError> {
        let mut stations: Vec<Station> = self.stations.values().cloned().collect();
        stations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(stations)
    }

    fn route(&self, id: RouteId) -> Result<Option<Arc<Route>>, DirectoryError> {
        Ok(self.routes.get(&id).cloned())
    }

    fn departure(&self, id: DepartureId) -> Result<Option<ScheduledDeparture>, DirectoryError> {
        Ok(self.departures.get(&id).cloned())
    }

    fn departures(
        &self,
        filter: &DepartureFilter,
    ) -> Result<Vec<ScheduledDeparture>, DirectoryError> {
        let mut matching: Vec<ScheduledDeparture> = self
            .departures
            .values()
            .filter(|d| {
                self.routes
                    .get(&d.route())
                    .is_some_and(|route| filter.matches(d, route))
            })
            .cloned()
            .collect();
        matching.sort_by_key(|d| (d.departure_time(), d.id()));
        Ok(matching)
    }

    fn bus(&self, id: BusId) -> Result<Option<Arc<Bus>>, DirectoryError> {
        Ok(self.buses.get(&id).cloned())
    }

    fn seat_owner(&self, seat: SeatId) -> Result<Option<BusId>, DirectoryError> {
        Ok(self.seat_owner.get(&seat).copied())
    }

    fn confirmed_bookings(
        &self,
        departure: DepartureId,
        seat: SeatId,
    ) -> Result<Vec<Booking>, DirectoryError> {
        Ok(self
            .bookings
            .values()
            .filter(|b| b.departure == departure && b.seat == seat && b.is_confirmed())
            .cloned()
            .collect())
    }

    fn booking(&self, id: BookingId) -> Result<Option<Booking>, DirectoryError> {
        Ok(self.bookings.get(&id).cloned())
    }
}

impl BookingStore for MemoryDirectory {
    fn next_booking_id(&mut self) -> BookingId {
        let highest = self.bookings.keys().next_back().map_or(0, |id| id.get());
        self.next_booking = self.next_booking.max(highest) + 1;
        BookingId(self.next_booking)
    }

    fn insert_booking(&mut self, booking: Booking) -> Result<(), DirectoryError> {
        if self.bookings.contains_key(&booking.id) {
            return Err(DirectoryError::Duplicate {
                kind: "booking",
                id: booking.id.get(),
            });
        }
        let Some(departure) = self.departures.get(&booking.departure) else {
            return Err(DirectoryError::UnknownReference {
                kind: "departure",
                id: booking.departure.get(),
            });
        };
        // The seat must be fitted to the bus running this departure
        if self.seat_owner.get(&booking.seat) != Some(&departure.bus()) {
            return Err(DirectoryError::UnknownReference {
                kind: "seat",
                id: booking.seat.get(),
            });
        }
        self.require_station(booking.start_station)?;
        self.require_station(booking.end_station)?;

        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    fn set_booking_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, DirectoryError> {
        Ok(self.bookings.get_mut(&id).map(|booking| {
            booking.status = status;
            booking.clone()
        }))
    }
}
