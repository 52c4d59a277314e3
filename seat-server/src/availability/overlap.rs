//! Segment overlap rule.

use crate::domain::Ordinal;

/// Returns true if an existing `[existing_start, existing_end)` and a
/// requested `[requested_start, requested_end)` need the seat over a
/// common leg.
///
/// Intervals are half-open: a seat vacated at a stop may be taken again
/// from that same stop. Both spans must already satisfy `start < end`;
/// use `Segment` to carry that guarantee.
///
/// # Examples
///
/// ```
/// use seat_server::availability::segments_overlap;
/// use seat_server::domain::Ordinal;
///
/// // Cairo(0) -> Minya(3) against Giza(1) -> Fayyum(2)
/// assert!(segments_overlap(Ordinal(0), Ordinal(3), Ordinal(1), Ordinal(2)));
///
/// // Cairo(0) -> Minya(3) against Minya(3) -> Asyut(4)
/// assert!(!segments_overlap(Ordinal(0), Ordinal(3), Ordinal(3), Ordinal(4)));
/// ```
pub fn segments_overlap(
    existing_start: Ordinal,
    existing_end: Ordinal,
    requested_start: Ordinal,
    requested_end: Ordinal,
) -> bool {
    existing_start < requested_end && existing_end > requested_start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(existing: (usize, usize), requested: (usize, usize)) -> bool {
        segments_overlap(
            Ordinal(existing.0),
            Ordinal(existing.1),
            Ordinal(requested.0),
            Ordinal(requested.1),
        )
    }

    #[test]
    fn boundary_cases() {
        // Requested ends where existing starts
        assert!(!check((2, 4), (0, 2)));
        // Requested starts where existing ends
        assert!(!check((0, 2), (2, 4)));
        // One shared leg at either end
        assert!(check((2, 4), (0, 3)));
        assert!(check((0, 2), (1, 4)));
    }

    #[test]
    fn containment() {
        assert!(check((0, 4), (1, 2)));
        assert!(check((1, 2), (0, 4)));
    }
}
