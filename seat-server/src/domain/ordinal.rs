//! Stop positions within a route.

use std::fmt;

/// Zero-based position of a station within a route's stop sequence.
///
/// Overlap is computed on ordinals, never on timestamps: two bookings on the
/// same seat conflict when their ordinal ranges intersect.
///
/// # Examples
///
/// ```
/// use seat_server::domain::Ordinal;
///
/// let giza = Ordinal(1);
/// assert!(giza < Ordinal(3));
/// assert_eq!(giza.to_string(), "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ordinal(pub usize);

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
