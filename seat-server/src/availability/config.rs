//! Availability engine configuration.

/// What to do with a confirmed booking whose stations no longer resolve on
/// the departure's route (for example after a stop was removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedBookingPolicy {
    /// Treat the booking as holding nothing.
    #[default]
    Ignore,
    /// Treat the seat as taken for the whole route.
    Block,
}

/// Configuration parameters for availability checks.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityConfig {
    /// Handling of bookings that fail to resolve.
    pub unresolved_bookings: UnresolvedBookingPolicy,
}

impl AvailabilityConfig {
    pub fn new(unresolved_bookings: UnresolvedBookingPolicy) -> Self {
        Self {
            unresolved_bookings,
        }
    }
}
