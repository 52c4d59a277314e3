//! Seed documents for the in-memory directory.
//!
//! A seed is a JSON document listing stations, routes, buses, departures
//! and bookings. Records are inserted in dependency order, so a seed that
//! references an unknown id is rejected as a whole.

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{BookingStore, DirectoryError, MemoryDirectory};
use crate::domain::{
    Booking, BookingId, BookingStatus, Bus, BusId, DepartureId, DepartureStatus, Route, RouteId,
    ScheduledDeparture, Seat, SeatId, Station, StationId,
};

/// Errors raised while loading a seed.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid seed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed rejected: {0}")]
    Directory(#[from] DirectoryError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
}

/// A route; stop orders follow the position in `stations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: RouteId,
    pub name: String,
    pub stations: Vec<StationId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub id: SeatId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub id: BusId,
    pub name: String,
    #[serde(default)]
    pub license_plate: Option<String>,
    pub capacity: u32,
    pub seats: Vec<SeatRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureRecord {
    pub id: DepartureId,
    pub route: RouteId,
    pub bus: BusId,
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    #[serde(default = "default_departure_status")]
    pub status: DepartureStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub departure: DepartureId,
    pub seat: SeatId,
    pub start_station: StationId,
    pub end_station: StationId,
    #[serde(default = "default_booking_status")]
    pub status: BookingStatus,
    pub booked_at: NaiveDateTime,
}

fn default_departure_status() -> DepartureStatus {
    DepartureStatus::Scheduled
}

fn default_booking_status() -> BookingStatus {
    BookingStatus::Confirmed
}

/// A complete seed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub stations: Vec<StationRecord>,
    #[serde(default)]
    pub routes: Vec<RouteRecord>,
    #[serde(default)]
    pub buses: Vec<BusRecord>,
    #[serde(default)]
    pub departures: Vec<DepartureRecord>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

impl MemoryDirectory {
    /// Builds a directory from a seed, validating every record.
    pub fn from_seed(seed: SeedData) -> Result<Self, SeedError> {
        let mut dir = MemoryDirectory::new();

        for s in seed.stations {
            let mut station = Station::new(s.id, s.name);
            station.city = s.city;
            dir.insert_station(station)?;
        }

        for r in seed.routes {
            let route = Route::from_stations(r.id, r.name, r.stations).map_err(DirectoryError::from)?;
            dir.insert_route(route)?;
        }

        for b in seed.buses {
            let seats = b
                .seats
                .into_iter()
                .map(|s| Seat::new(s.id, s.label))
                .collect();
            let bus = Bus::new(b.id, b.name, b.license_plate, b.capacity, seats)
                .map_err(DirectoryError::from)?;
            dir.insert_bus(bus)?;
        }

        for d in seed.departures {
            let departure = ScheduledDeparture::new(
                d.id,
                d.route,
                d.bus,
                d.departure_time,
                d.arrival_time,
                d.status,
            )
            .map_err(DirectoryError::from)?;
            dir.insert_departure(departure)?;
        }

        for b in seed.bookings {
            dir.insert_booking(Booking {
                id: b.id,
                departure: b.departure,
                seat: b.seat,
                start_station: b.start_station,
                end_station: b.end_station,
                status: b.status,
                booked_at: b.booked_at,
            })?;
        }

        Ok(dir)
    }
}

/// Reads and validates a seed file.
pub fn load_seed(path: impl AsRef<Path>) -> Result<MemoryDirectory, SeedError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let seed: SeedData = serde_json::from_str(&json)?;
    let dir = MemoryDirectory::from_seed(seed)?;
    info!(path = %path.display(), bookings = dir.booking_count(), "loaded seed");
    Ok(dir)
}

/// Seats per demo bus.
const DEMO_CAPACITY: u32 = 12;

/// How many days of demo departures to schedule.
const DEMO_DAYS: i64 = 7;

/// Demo network: the Cairo-Asyut corridor in both directions.
///
/// For each of the `DEMO_DAYS` days after `today` there is an 08:00-14:00
/// and an 18:00-00:00 run towards Asyut, and a 10:00-16:00 run back to
/// Cairo, each on its own 12-seat bus.
pub fn demo_seed(today: NaiveDate) -> SeedData {
    let stations: Vec<StationRecord> = [
        (1, "Cairo", "Cairo"),
        (2, "Giza", "Giza"),
        (3, "AlFayyum", "Faiyum"),
        (4, "AlMinya", "Minya"),
        (5, "Asyut", "Asyut"),
    ]
    .into_iter()
    .map(|(id, name, city)| StationRecord {
        id: StationId(id),
        name: name.to_string(),
        city: Some(city.to_string()),
    })
    .collect();

    let outbound: Vec<StationId> = (1..=5).map(StationId).collect();
    let inbound: Vec<StationId> = outbound.iter().rev().copied().collect();
    let routes = vec![
        RouteRecord {
            id: RouteId(1),
            name: "Cairo-Asyut Express".to_string(),
            stations: outbound,
        },
        RouteRecord {
            id: RouteId(2),
            name: "Asyut-Cairo Express".to_string(),
            stations: inbound,
        },
    ];

    let buses = ["Bus A01", "Bus A02", "Bus B01"]
        .into_iter()
        .zip(1u64..)
        .map(|(name, id)| BusRecord {
            id: BusId(id),
            name: name.to_string(),
            license_plate: None,
            capacity: DEMO_CAPACITY,
            seats: (1..=u64::from(DEMO_CAPACITY))
                .map(|n| SeatRecord {
                    id: SeatId((id - 1) * u64::from(DEMO_CAPACITY) + n),
                    label: format!("S{n}"),
                })
                .collect(),
        })
        .collect();

    // (route, bus, departs at hour, running hours)
    let runs = [(1, 1, 8, 6), (1, 2, 18, 6), (2, 3, 10, 6)];
    let mut departures = Vec::new();
    let mut next_id = 1;
    for day in 1..=DEMO_DAYS {
        let date = today + Duration::days(day);
        for (route, bus, hour, hours) in runs {
            let departure_time = date.and_time(NaiveTime::MIN) + Duration::hours(hour);
            departures.push(DepartureRecord {
                id: DepartureId(next_id),
                route: RouteId(route),
                bus: BusId(bus),
                departure_time,
                arrival_time: departure_time + Duration::hours(hours),
                status: DepartureStatus::Scheduled,
            });
            next_id += 1;
        }
    }

    SeedData {
        stations,
        routes,
        buses,
        departures,
        bookings: Vec::new(),
    }
}
