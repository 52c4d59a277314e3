//! Buses and their seat rosters.

use std::collections::HashSet;

use super::{BusId, DomainError, SeatId};

/// A bookable seat. Belongs to exactly one bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seat {
    /// Seat id
    pub id: SeatId,
    /// Label shown to passengers (e.g. "S4")
    pub label: String,
}

impl Seat {
    pub fn new(id: SeatId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// A vehicle and its flat seat list.
///
/// # Invariants
///
/// - No seat id appears twice
/// - The roster never exceeds `capacity`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    id: BusId,
    name: String,
    license_plate: Option<String>,
    capacity: u32,
    seats: Vec<Seat>,
}

impl Bus {
    /// Creates a bus, validating its seat roster against its capacity.
    pub fn new(
        id: BusId,
        name: impl Into<String>,
        license_plate: Option<String>,
        capacity: u32,
        seats: Vec<Seat>,
    ) -> Result<Self, DomainError> {
        if seats.len() > capacity as usize {
            return Err(DomainError::SeatsExceedCapacity {
                bus: id,
                seats: seats.len(),
                capacity,
            });
        }

        let mut seen = HashSet::with_capacity(seats.len());
        for seat in &seats {
            if !seen.insert(seat.id) {
                return Err(DomainError::DuplicateSeat { bus: id, seat: seat.id });
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            license_plate,
            capacity,
            seats,
        })
    }

    pub fn id(&self) -> BusId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn license_plate(&self) -> Option<&str> {
        self.license_plate.as_deref()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the seat roster in registration order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Returns true if `seat` is on this bus.
    pub fn has_seat(&self, seat: SeatId) -> bool {
        self.seats.iter().any(|s| s.id == seat)
    }
}
